use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;

use crate::card::Card;
use crate::command::{Command, parse_command};
use crate::renderer::Renderer;
use crate::session::{ClickOutcome, Session};

/// The main game loop.  `renderer` is injected so the engine stays
/// renderer-agnostic.
pub struct Game<R: Renderer> {
    session: Session,
    renderer: R,
    rng: SmallRng,
}

impl<R: Renderer> Game<R> {
    /// Wrap a session. `rng` deals every later game started with `new`.
    pub fn new(session: Session, renderer: R, rng: SmallRng) -> Self {
        Game {
            session,
            renderer,
            rng,
        }
    }

    /// Run the interactive game loop until the player quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        self.renderer.render(&self.session);

        loop {
            print!("> ");
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF
                break;
            }

            match parse_command(&line) {
                Err(e) => self.renderer.error(&e),
                Ok(cmd) => {
                    let quit = self.handle(cmd);
                    if quit {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Dispatch a command.  Returns `true` if the game should exit.
    fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Quit => {
                self.renderer.info("Thanks for playing. Goodbye!");
                return true;
            }
            Command::Help => {
                self.renderer.help();
                return false;
            }
            Command::Moves => {
                let one = self.session.deck().ids_of_move(1);
                let three = self.session.deck().ids_of_move(3);
                self.renderer.moves(&self.session, &one, &three);
                return false;
            }
            Command::State => {
                match serde_json::to_string_pretty(&self.session.display_state()) {
                    Ok(json) => println!("{}", json),
                    Err(e) => self.renderer.error(&e.to_string()),
                }
                return false;
            }
            Command::NewGame => {
                self.session.restart(&mut self.rng);
                self.renderer.info("A new game has been dealt.");
            }
            Command::Undo => match self.session.undo() {
                Ok(true) => self.renderer.info("Undo successful."),
                Ok(false) => self.renderer.error("Nothing to undo."),
                Err(e) => self.renderer.error(&e.to_string()),
            },
            Command::Pick(card) => self.pick(card),
            Command::Move { card, distance } => match self.session.play(card.id, distance) {
                Ok(Some(_)) => self.after_move(),
                Ok(None) => self.renderer.error(&format!(
                    "{} cannot cover the card {} back.",
                    card, distance
                )),
                Err(e) => self.renderer.error(&e.to_string()),
            },
            Command::RankHint(ranks) => {
                for rank in ranks {
                    self.session.filters.toggle_rank(rank);
                }
            }
            Command::SuitHint(suits) => {
                for suit in suits {
                    self.session.filters.toggle_suit(suit);
                }
            }
            Command::MoveHint(distance) => {
                if let Err(e) = self.session.filters.toggle_move(distance) {
                    self.renderer.error(&e);
                }
            }
            Command::ToggleMode => {
                self.session.combination = self.session.combination.toggled();
                self.renderer.info(&format!(
                    "Hints now combine with {}.",
                    self.session.combination.name()
                ));
            }
            Command::ResetHints => self.session.filters.clear(),
        }

        self.renderer.render(&self.session);
        false
    }

    fn pick(&mut self, card: Card) {
        match self.session.click(card.id) {
            Ok(ClickOutcome::Selected(id)) => {
                let deck = self.session.deck();
                if deck.cover_target(id, 1).is_none() && deck.cover_target(id, 3).is_none() {
                    self.renderer.info(&format!("{} has no move; pick again to cancel.", card));
                }
            }
            Ok(ClickOutcome::Moved(record)) => {
                self.renderer.info(&format!("{} covers {}.", record.moved, record.covered));
                self.after_move();
            }
            Ok(ClickOutcome::Deselected) => self.renderer.info("Selection cleared."),
            Err(e) => self.renderer.error(&e.to_string()),
        }
    }

    fn after_move(&mut self) {
        if self.session.is_over() {
            self.renderer.win();
        }
    }
}
