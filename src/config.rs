use clap::Parser;

use crate::hints::HintCombination;

/// Command-line options.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "accordion-rs",
    version,
    about = "Accordion patience in the terminal: cover a card 1 or 3 places back by rank or suit."
)]
pub struct Config {
    /// Seed for a reproducible deal (random when omitted).
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// How active hint filters are combined.
    #[arg(long, value_enum, default_value_t = HintCombination::Or)]
    pub hints: HintCombination,

    /// Log level for stderr diagnostics; RUST_LOG takes precedence.
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["accordion-rs"]).unwrap();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.hints, HintCombination::Or);
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn overrides() {
        let cfg = Config::try_parse_from(["accordion-rs", "--seed", "12", "--hints", "and"]).unwrap();
        assert_eq!(cfg.seed, Some(12));
        assert_eq!(cfg.hints, HintCombination::And);
        assert!(Config::try_parse_from(["accordion-rs", "--hints", "xor"]).is_err());
    }
}
