use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// Path to a custom configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Countdown length in seconds, overriding the configuration
    #[arg(short, long, allow_negative_numbers = true)]
    pub duration: Option<f64>,
    /// Start the countdown right away
    #[arg(short, long)]
    pub start: bool,
    /// Don't show a desktop notification when the countdown finishes
    #[arg(long)]
    pub no_notify: bool,
    /// Maximum logging level the subscriber should use
    #[arg(short, long, default_value_t = Level::WARN)]
    pub verbosity: Level,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn arguments_parse() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn arguments_negative_duration() {
        let args = Arguments::try_parse_from(["pausable-timer", "--duration", "-5"]).unwrap();
        assert_eq!(args.duration, Some(-5.0));
        assert!(!args.start);
        assert_eq!(args.verbosity, Level::WARN);
    }
}
