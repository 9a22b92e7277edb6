use crate::card::{Card, Rank, Suit};

/// All commands a player can issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Click a card: select it, or land the current selection on it.
    Pick(Card),
    /// Move a card onto the card `distance` places earlier in one step.
    Move { card: Card, distance: usize },
    /// Undo the last move.
    Undo,
    /// List every legal move.
    Moves,
    /// Toggle rank hint filters.
    RankHint(Vec<Rank>),
    /// Toggle suit hint filters.
    SuitHint(Vec<Suit>),
    /// Toggle the "can move 1" / "can move 3" hint filter.
    MoveHint(usize),
    /// Switch hint combination between AND and OR.
    ToggleMode,
    /// Clear every hint filter.
    ResetHints,
    /// Print the display state as JSON.
    State,
    /// Give up and start a new game.
    NewGame,
    /// Quit the game.
    Quit,
    /// Print help.
    Help,
}

/// Parse a single line of text input into a `Command`.
///
/// Syntax reference (case-insensitive):
/// ```text
/// pick <card> | p <card>     -- Select a card / cover the highlighted card
/// move <card> 1|3            -- Cover the card 1 or 3 places back
/// moves                      -- List legal moves
/// rank <r>...                -- Toggle rank hints (A 2 .. 10 J Q K)
/// suit <s>...                -- Toggle suit hints (d h s c)
/// hint 1|3                   -- Toggle move hints
/// mode                       -- Toggle AND/OR hint combination
/// reset                      -- Clear all hints
/// state                      -- Dump display state as JSON
/// undo                       -- Undo last move
/// new                        -- New game
/// quit | q                   -- Quit
/// help | h | ?               -- Help
/// ```
pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }

    let tokens: Vec<&str> = input.split_whitespace().collect();
    let cmd = tokens[0].to_lowercase();

    match cmd.as_str() {
        "pick" | "p" => {
            if tokens.len() < 2 {
                return Err("Usage: pick <card>".to_string());
            }
            Ok(Command::Pick(tokens[1].parse()?))
        }
        "move" | "m" => {
            if tokens.len() < 3 {
                return Err("Usage: move <card> 1|3".to_string());
            }
            Ok(Command::Move {
                card: tokens[1].parse()?,
                distance: parse_distance(tokens[2])?,
            })
        }
        "rank" | "r" => {
            if tokens.len() < 2 {
                return Err("Usage: rank <r>...".to_string());
            }
            let ranks = tokens[1..]
                .iter()
                .map(|t| t.parse())
                .collect::<Result<Vec<Rank>, String>>()?;
            Ok(Command::RankHint(ranks))
        }
        "suit" | "s" => {
            if tokens.len() < 2 {
                return Err("Usage: suit <s>...".to_string());
            }
            let suits = tokens[1..]
                .iter()
                .map(|t| t.parse())
                .collect::<Result<Vec<Suit>, String>>()?;
            Ok(Command::SuitHint(suits))
        }
        "hint" => {
            if tokens.len() < 2 {
                return Err("Usage: hint 1|3".to_string());
            }
            Ok(Command::MoveHint(parse_distance(tokens[1])?))
        }

        "moves" | "ls" => Ok(Command::Moves),
        "mode" | "and" | "or" => Ok(Command::ToggleMode),
        "reset" => Ok(Command::ResetHints),
        "state" => Ok(Command::State),
        "undo" | "u" => Ok(Command::Undo),
        "new" | "n" => Ok(Command::NewGame),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "help" | "h" | "?" => Ok(Command::Help),
        _ => Err(format!("Unknown command '{}'. Type 'help' for help.", tokens[0])),
    }
}

fn parse_distance(s: &str) -> Result<usize, String> {
    match s {
        "1" => Ok(1),
        "3" => Ok(3),
        _ => Err(format!("'{}' is not a valid distance. Use 1 or 3.", s)),
    }
}
