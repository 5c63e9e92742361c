use anyhow::Result;
use wxlog_analytics::{daily_stats_figure, weekly_high_low_figure, Figure};
use wxlog_core::{AppError, Config, ConfigError};
use wxlog_services::WeatherApp;

use crate::cli::args::{Cli, Commands};

pub async fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path().map_err(config_failure)?,
    };
    let created = !config_path.exists();
    let (mut config, validation) =
        Config::load_validated(Some(&config_path)).map_err(config_failure)?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    wxlog_core::init_logging(level)?;
    if created {
        tracing::info!("Wrote default configuration to {}", config_path.display());
    }
    for warning in validation.warnings() {
        tracing::warn!("Config warning: {}", warning);
    }

    if let Some(db) = cli.db {
        config.database.path = db;
    }

    let app = WeatherApp::open(&config).map_err(report)?;
    let outcome = execute(&app, cli.command).await;
    app.shutdown().map_err(report)?;
    outcome
}

async fn execute(app: &WeatherApp, command: Commands) -> Result<()> {
    match command {
        Commands::Fetch {
            name,
            lat,
            lon,
            start,
            end,
        } => {
            let ingested = app
                .ingest(&name, lat, lon, &start, &end)
                .await
                .map_err(|e| report(e.into()))?;
            println!("{}", ingested);
            if ingested.inserted < ingested.fetched {
                println!(
                    "Skipped {} readings already stored",
                    ingested.fetched - ingested.inserted
                );
            }
        }

        Commands::Daily {
            name,
            start,
            end,
            json,
        } => {
            let stats = app
                .daily_summary(&name, &start, &end)
                .map_err(|e| report(e.into()))?;
            print_figure(&daily_stats_figure(&stats), json)?;
        }

        Commands::Weekly {
            name,
            start,
            end,
            json,
        } => {
            if json {
                let high_low = app
                    .weekly_high_low_summary(&name, &start, &end)
                    .map_err(|e| report(e.into()))?;
                print_figure(&weekly_high_low_figure(high_low), true)?;
            } else {
                println!("{}", app.weekly_high_low_message(&name, &start, &end));
            }
        }

        Commands::Locations => {
            let locations = app.locations().map_err(report)?;
            if locations.is_empty() {
                println!("No locations stored yet");
            }
            for loc in locations {
                println!("{:<24} {:>9.4} {:>10.4}", loc.name, loc.latitude, loc.longitude);
            }
        }
    }

    Ok(())
}

fn print_figure(figure: &Figure, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(figure)?);
    } else {
        print!("{}", figure.render_text());
    }
    Ok(())
}

/// Log the full error and turn it into the one error `main` prints.
///
/// The short user message leads; the detail follows in the cause chain.
fn report(e: AppError) -> anyhow::Error {
    tracing::error!("{}", e);
    let message = e.user_message();
    match e {
        AppError::Other(inner) => inner.context(message),
        other => anyhow::Error::new(other).context(message),
    }
}

/// Config errors arrive before logging is up, so they are reported directly.
fn config_failure(e: anyhow::Error) -> anyhow::Error {
    match e.downcast::<ConfigError>() {
        Ok(config_error) => {
            let message = config_error.user_message();
            anyhow::Error::new(config_error).context(message)
        }
        Err(other) => other,
    }
}
