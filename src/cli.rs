use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::settings::ProtocolOverrides;

#[derive(Debug, Parser)]
#[command(
    name = "handwash-monitor",
    version,
    about = "Guided WHO hand-wash sessions with a simulated watch and a history dashboard"
)]
pub struct Cli {
    /// Where the database, settings and identity live
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in (creates the account on first use)
    Login { email: String },

    /// Sign out
    Logout,

    /// Show who is signed in
    Status,

    /// Today's stats and the most recent sessions
    Dashboard,

    /// Run one guided session on the simulated watch
    Simulate {
        /// Run at a tenth of the normal cadence
        #[arg(long)]
        fast: bool,

        /// Skip vibration cues
        #[arg(long)]
        no_haptics: bool,

        /// Seed the placeholder scorer for a reproducible score
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show the saved protocol timing, or change it
    Settings {
        #[command(flatten)]
        overrides: ProtocolOverrides,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simulate_flags() {
        let cli = Cli::parse_from(["handwash-monitor", "--data-dir", "/tmp/hw", "simulate", "--fast", "--seed", "4"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/hw")));
        match cli.command {
            Commands::Simulate { fast, no_haptics, seed } => {
                assert!(fast);
                assert!(!no_haptics);
                assert_eq!(seed, Some(4));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_settings_overrides() {
        let cli = Cli::parse_from([
            "handwash-monitor",
            "settings",
            "--detection-window-ms",
            "2500",
            "--haptics",
            "false",
        ]);
        match cli.command {
            Commands::Settings { overrides } => {
                assert_eq!(overrides.detection_window_ms, Some(2_500));
                assert_eq!(overrides.haptics, Some(false));
                assert_eq!(overrides.settle_delay_ms, None);
                assert!(!overrides.reset);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn login_requires_email() {
        assert!(Cli::try_parse_from(["handwash-monitor", "login"]).is_err());
    }
}
