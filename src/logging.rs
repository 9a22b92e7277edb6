use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. Diagnostics go to stderr so they never
/// interleave with the board on stdout.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level '{}'", level))?,
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    // Ignore error if a global subscriber is already set.
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}
