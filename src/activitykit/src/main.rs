#[macro_use]
extern crate log;

use activitykit::{ActivityKit, DatabaseHandler, active_calorie_sample, display};
use anyhow::anyhow;
use chrono::{TimeDelta, Utc};
use clap::{Parser, Subcommand};
use dotenv::dotenv;

#[derive(Parser)]
pub struct ActivityCli {
    #[arg(env, long)]
    pub database_url: String,
    #[clap(subcommand)]
    pub subcommand: ActivityCommand,
}

#[derive(Subcommand)]
pub enum ActivityCommand {
    ///
    /// Request read/write access to the health store
    ///
    Authorize,
    ///
    /// Print bucketed statistics, one row per interval
    ///
    Intervals {
        #[arg(long, default_value_t = 1)]
        days: i64,
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(i64).range(1..))]
        bucket_minutes: i64,
    },
    ///
    /// Print raw samples merged by timestamp, one row each
    ///
    Samples {
        #[arg(long, default_value_t = 1)]
        days: i64,
    },
    ///
    /// Save one active-calorie sample
    ///
    WriteCalories {
        /// ISO-8601 timestamp, e.g. 2024-01-01T00:00:00Z
        #[arg(long)]
        timestamp: String,
        /// Decimal kilocalorie value
        #[arg(long)]
        calories: String,
        #[arg(long, default_value = "activitykit")]
        source: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("sqlx::query", log::LevelFilter::Off)
        .filter_module("sea_orm_migration::migrator", log::LevelFilter::Off)
        .init();

    let cli = ActivityCli::parse();
    let store = match DatabaseHandler::connect(cli.database_url).await {
        Ok(store) => store,
        Err(error) => {
            error!("health store unreachable: {error}");
            return Err(anyhow!(activitykit::ActivityError::StoreUnavailable));
        }
    };
    let mut kit = ActivityKit::new(store);

    match cli.subcommand {
        ActivityCommand::Authorize => {
            kit.authorize().await?;
            println!("Access granted");
            Ok(())
        }
        ActivityCommand::Intervals {
            days,
            bucket_minutes,
        } => {
            kit.bucket_minutes = bucket_minutes;
            let since = Utc::now().naive_utc() - TimeDelta::days(days);

            let intervals = kit.interval_data(Some(since)).await?;
            for interval in &intervals {
                println!("{}", display::interval_row(interval));
            }
            Ok(())
        }
        ActivityCommand::Samples { days } => {
            let since = Utc::now().naive_utc() - TimeDelta::days(days);

            let samples = kit.sample_data(Some(since)).await?;
            for sample in &samples {
                println!("{}", display::sample_row(sample));
            }
            Ok(())
        }
        ActivityCommand::WriteCalories {
            timestamp,
            calories,
            source,
        } => {
            let sample = active_calorie_sample(&timestamp, &calories, &source)?;
            kit.save_sample(&sample).await?;
            println!("Saved {} kcal at {}", sample.value, sample.start);
            Ok(())
        }
    }
}
