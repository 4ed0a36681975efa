use clap::Parser;
use std::path::PathBuf;

/// Replays the hero page's load and scroll choreography as CSS frames
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Read settings from this file instead of the platform config directory
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the current settings out and exit
    #[arg(long = "write-config")]
    pub write_config: bool,

    /// Print the resolved scroll schedule and exit
    #[arg(long = "schedule")]
    pub schedule: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from(["heroreel", "--schedule", "-c", "/tmp/hero.toml"]).unwrap();
        assert!(args.schedule);
        assert!(!args.write_config);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/hero.toml")));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Args::try_parse_from(["heroreel", "--shedule"]).is_err());
    }
}
