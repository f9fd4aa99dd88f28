mod cli;
mod input;

use clap::Parser;
use eyre::WrapErr;
use serde::Serialize;

use cli::{Command, RootArgs};
use input::{read_json, resolve_today};
use minestats_core::level::{
    level_table_checksum, LEVEL_FLOORS, LEVEL_TABLE_VERSION, TOP_LEVEL_CEILING,
};
use minestats_core::{
    bucket, chronological, damping_rng, filter_by_level, forecast, level_distribution,
    level_progress, parse_capacity, rank, Level,
};
use minestats_http_client::WebhookClient;
use models::config::WebhookConfig;
use models::{LeaderboardPayload, SeriesPayload};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = RootArgs::parse();

    match args.command {
        Command::Level { th } => {
            let th = parse_capacity(&th).wrap_err("parse capacity")?;
            print_json(&level_report(th)?)?;
        }
        Command::Levels => {
            print_json(&serde_json::json!({
                "version": LEVEL_TABLE_VERSION,
                "checksum": level_table_checksum(),
                "floors": LEVEL_FLOORS,
                "top_ceiling": TOP_LEVEL_CEILING,
            }))?;
        }
        Command::Bucket { input, window } => {
            let samples = read_json::<SeriesPayload>(&input)?.into_samples();
            let buckets = bucket(&samples, window).wrap_err("bucket samples")?;
            print_json(&buckets)?;
        }
        Command::Forecast {
            input,
            horizon,
            seed,
            today,
        } => {
            let samples = read_json::<SeriesPayload>(&input)?.into_samples();
            let samples = chronological(&samples).wrap_err("order samples")?;
            let today = resolve_today(today.as_deref())?;

            let points = forecast(&samples, horizon, today, &mut damping_rng(seed));
            if points.is_none() {
                tracing::warn!(
                    samples = samples.len(),
                    "not enough history to forecast (need 7 days)"
                );
            }
            print_json(&points)?;
        }
        Command::Leaderboard {
            input,
            level,
            distribution,
        } => {
            let rows = read_json::<LeaderboardPayload>(&input)?.into_rows();
            if distribution {
                print_json(&level_distribution(&rows))?;
            } else {
                let ranked = rank(&rows);
                match level {
                    Some(raw) => {
                        let level = Level::new(raw)
                            .ok_or_else(|| eyre::eyre!("--level must be in 0..=10"))?;
                        print_json(&filter_by_level(&ranked, level))?;
                    }
                    None => print_json(&ranked)?,
                }
            }
        }
        Command::Fetch {
            series,
            window,
            person_id,
        } => {
            let config = WebhookConfig::from_env().wrap_err("load webhook config")?;
            let client = WebhookClient::new(&config).wrap_err("initialize webhook client")?;

            let samples = client
                .fetch_series(series, person_id.as_deref())
                .await
                .wrap_err("fetch series")?;
            tracing::info!(%series, samples = samples.len(), "fetched");

            let buckets = bucket(&samples, window).wrap_err("bucket samples")?;
            print_json(&buckets)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Level with progress, or `{"level": null, "th": ..}` below the level-0 floor.
fn level_report(th: f64) -> eyre::Result<serde_json::Value> {
    match level_progress(th) {
        Some(progress) => serde_json::to_value(progress).wrap_err("serialize level"),
        None => Ok(serde_json::json!({ "level": null, "th": th })),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> eyre::Result<String> {
    serde_json::to_string_pretty(value).wrap_err("serialize json")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> eyre::Result<()> {
    println!("{}", to_json(value)?);
    Ok(())
}
