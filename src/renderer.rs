use crossterm::style::{Stylize, style};

use crate::card::Card;
use crate::deck::MovePair;
use crate::hints::Tag;
use crate::session::Session;

/// Cards per printed row.
const ROW_WIDTH: usize = 13;

/// Trait that abstracts the rendering layer.
///
/// The game loop only talks to this trait; it never inspects tags itself.
pub trait Renderer {
    /// Render the card sequence and hint panel.
    fn render(&mut self, session: &Session);
    /// List legal moves at distance 1 and 3.
    fn moves(&mut self, session: &Session, one: &[MovePair], three: &[MovePair]);
    /// Display an informational message.
    fn info(&mut self, msg: &str);
    /// Display an error message.
    fn error(&mut self, msg: &str);
    /// Display the help text.
    fn help(&mut self);
    /// Display the win screen.
    fn win(&mut self);
}

// ---------------------------------------------------------------------------
// CLI Renderer
// ---------------------------------------------------------------------------

/// A plain terminal renderer using crossterm styling.
pub struct CliRenderer;

impl CliRenderer {
    pub fn new() -> Self {
        CliRenderer
    }

    /// One fixed-width cell: a marker column then the right-aligned label.
    fn card_cell(&self, card: Card, tags: &[Tag]) -> String {
        let marker = if tags.contains(&Tag::Selected) {
            '>'
        } else if tags.contains(&Tag::MoveOne) {
            '1'
        } else if tags.contains(&Tag::MoveThree) {
            '3'
        } else if tags.contains(&Tag::Hint) {
            '*'
        } else {
            ' '
        };

        let mut label = style(format!("{:>3}", card.label()));
        if card.is_red() {
            label = label.red();
        }
        if tags.contains(&Tag::NoHint) {
            label = label.dim();
        }
        if tags.contains(&Tag::Hint) {
            label = label.bold();
        }
        if tags.contains(&Tag::Selected) {
            label = label.reverse();
        }
        if tags.contains(&Tag::MoveOne) || tags.contains(&Tag::MoveThree) {
            label = label.underlined();
        }

        let marker = match marker {
            ' ' => " ".to_string(),
            m => m.to_string().yellow().bold().to_string(),
        };
        format!("{}{}", marker, label)
    }
}

impl Renderer for CliRenderer {
    fn render(&mut self, session: &Session) {
        let deck = session.deck();
        let state = session.display_state();

        println!();
        println!("  CARDS LEFT: {}", deck.len());
        println!();

        for row in deck.cards().chunks(ROW_WIDTH) {
            print!("  ");
            for card in row {
                let tags: Vec<Tag> = state
                    .get(&card.id)
                    .map(|t| t.iter().copied().collect())
                    .unwrap_or_default();
                print!(" {}", self.card_cell(*card, &tags));
            }
            println!();
        }

        // ---- Hint panel ----
        let filters = &session.filters;
        println!();
        if filters.is_empty() {
            println!("  HINTS: (none)");
        } else {
            let ranks: Vec<&str> = filters.ranks.iter().map(|r| r.symbol()).collect();
            let suits: Vec<&str> = filters.suits.iter().map(|s| s.symbol()).collect();
            let mut moves = Vec::new();
            if filters.move_one {
                moves.push("1");
            }
            if filters.move_three {
                moves.push("3");
            }
            println!(
                "  HINTS [{}]: rank {{{}}}  suit {{{}}}  move {{{}}}",
                session.combination.name(),
                ranks.join(" "),
                suits.join(" "),
                moves.join(" ")
            );
        }
        if let Some(card) = session.selected().and_then(|id| deck.card(id)) {
            println!("  SELECTED: {}  (pick a card marked 1 or 3)", card);
        }
        if session.can_undo() {
            println!("  (undo available)");
        }
        println!();
    }

    fn moves(&mut self, session: &Session, one: &[MovePair], three: &[MovePair]) {
        let label = |id| {
            session
                .deck()
                .card(id)
                .map(|c| c.label())
                .unwrap_or_else(|| "??".to_string())
        };
        for (distance, pairs) in [(1, one), (3, three)] {
            if pairs.is_empty() {
                println!("  {} back: none", distance);
                continue;
            }
            let listed: Vec<String> = pairs
                .iter()
                .map(|m| format!("{}→{}", label(m.clicked), label(m.covered)))
                .collect();
            println!("  {} back: {}", distance, listed.join("  "));
        }
    }

    fn info(&mut self, msg: &str) {
        println!("{} {}", "[INFO]".cyan(), msg);
    }

    fn error(&mut self, msg: &str) {
        println!("{} {}", "[ERR ]".red(), msg);
    }

    fn help(&mut self) {
        println!(
            r#"
╔══════════════════════════════════════════════════════════════╗
║               ACCORDION PATIENCE – CLI Help                  ║
╠══════════════════════════════════════════════════════════════╣
║  GOAL: Squeeze the 52-card row down to a single card.        ║
║                                                              ║
║  RULES:                                                      ║
║    · A card may cover the card 1 or 3 places to its left     ║
║      when the two share a rank or a suit.                    ║
║    · The covered card leaves the game; the row closes up.    ║
╠══════════════════════════════════════════════════════════════╣
║  COMMANDS (case-insensitive, cards like QS, 10H, TD):        ║
║                                                              ║
║  pick <card>        Select a card, then pick a marked target ║
║                     (1 = one back, 3 = three back)           ║
║  move <card> 1|3    Cover directly                           ║
║  moves              List every legal move                    ║
║  rank <r>...        Toggle rank hints   (A 2 .. 10 J Q K)    ║
║  suit <s>...        Toggle suit hints   (d h s c)            ║
║  hint 1|3           Toggle "can move" hints                  ║
║  mode               Switch hint combination AND / OR         ║
║  reset              Clear all hints                          ║
║  state              Print the display state as JSON          ║
║  undo               Undo last move                           ║
║  new                Start a new game                         ║
║  quit               Exit                                     ║
║  help | h | ?       Show this help                           ║
╚══════════════════════════════════════════════════════════════╝
"#
        );
    }

    fn win(&mut self) {
        println!(
            "\n  {}  Type 'new' for another game or 'undo' to step back.\n",
            "Congratulations! One card left.".yellow().bold()
        );
    }
}
