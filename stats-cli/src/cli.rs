use std::path::PathBuf;

use clap::{Parser, Subcommand};
use models::{Horizon, Series, Window};

#[derive(Debug, Parser)]
#[command(name = "minestats")]
#[command(about = "Dashboard statistics: levels, time buckets and forecasts")]
#[command(arg_required_else_help = true)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Classify a capacity (th) into a level with progress")]
    Level {
        #[arg(value_name = "TH", help = "Capacity value, e.g. 4914 or \"4914.5\"")]
        th: String,
    },
    #[command(about = "Print the level threshold table with its version and checksum")]
    Levels,
    #[command(about = "Aggregate a daily series into day/week/month buckets")]
    Bucket {
        #[arg(
            long,
            value_name = "FILE",
            help = "JSON array of {date, count} samples (use - for stdin)"
        )]
        input: PathBuf,

        #[arg(long, default_value = "day", value_name = "day|week|month")]
        window: Window,
    },
    #[command(about = "Project a daily series forward")]
    Forecast {
        #[arg(
            long,
            value_name = "FILE",
            help = "JSON array of {date, count} samples (use - for stdin)"
        )]
        input: PathBuf,

        #[arg(long, default_value = "day", value_name = "day|week|month")]
        horizon: Horizon,

        #[arg(long, value_name = "N", help = "Seed for the damping RNG")]
        seed: Option<u64>,

        #[arg(
            long,
            value_name = "DD.MM.YY",
            help = "Day the forecast starts after (defaults to today in DASHBOARD_TZ)"
        )]
        today: Option<String>,
    },
    #[command(about = "Rank leaderboard rows by capacity")]
    Leaderboard {
        #[arg(
            long,
            value_name = "FILE",
            help = "JSON array of {person_id, name?, th} rows (use - for stdin)"
        )]
        input: PathBuf,

        #[arg(long, value_name = "0..10", help = "Only rows at this level")]
        level: Option<u8>,

        #[arg(long, help = "Print head counts per level instead of rows")]
        distribution: bool,
    },
    #[command(about = "Fetch a series from the upstream webhook and bucket it")]
    Fetch {
        #[arg(long, value_name = "users|wallets|referrals|pools")]
        series: Series,

        #[arg(long, default_value = "day", value_name = "day|week|month")]
        window: Window,

        #[arg(long, value_name = "ID", help = "Restrict the series to one person")]
        person_id: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bucket_args() {
        let args =
            RootArgs::try_parse_from(["minestats", "bucket", "--input", "-", "--window", "week"])
                .unwrap();
        match args.command {
            Command::Bucket { input, window } => {
                assert_eq!(input, PathBuf::from("-"));
                assert_eq!(window, Window::Week);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_window() {
        assert!(RootArgs::try_parse_from([
            "minestats",
            "bucket",
            "--input",
            "a.json",
            "--window",
            "year"
        ])
        .is_err());
    }

    #[test]
    fn forecast_defaults() {
        let args = RootArgs::try_parse_from(["minestats", "forecast", "--input", "a.json"]).unwrap();
        match args.command {
            Command::Forecast {
                horizon,
                seed,
                today,
                ..
            } => {
                assert_eq!(horizon, Horizon::Day);
                assert_eq!(seed, None);
                assert_eq!(today, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
