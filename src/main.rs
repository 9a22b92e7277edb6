mod card;
mod command;
mod config;
mod deck;
mod error;
mod game;
mod hints;
mod logging;
mod renderer;
mod session;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;

use config::Config;
use deck::Deck;
use game::Game;
use renderer::CliRenderer;
use session::Session;

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init_logging(&config.log_level)?;

    println!(
        r#"
┌─────────────────────────────────────────┐
│   Accordion Patience (CLI Edition)      │
│   Type 'help' or '?' for commands.      │
└─────────────────────────────────────────┘
"#
    );

    // A seed makes the first deal and every later `new` reproducible.
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    info!(seed = ?config.seed, hints = config.hints.name(), "starting");

    let session = Session::new(Deck::shuffled(&mut rng), config.hints);
    let mut game = Game::new(session, CliRenderer::new(), rng);
    game.run()?;
    Ok(())
}
