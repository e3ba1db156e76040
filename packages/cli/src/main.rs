#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the waste-grid analytics engine.
//!
//! Every subcommand seeds an in-memory store with the demo dataset and
//! drives the engines against it, printing JSON results. `run` starts
//! the recurring scheduler on top of the same dataset; production
//! deployments embed the engine crates behind the real document-store
//! adapter and API layer instead.

mod seed;

use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use waste_grid_ai::create_predictor_from_env;
use waste_grid_alerts as alerts;
use waste_grid_circular::value_waste;
use waste_grid_jobs::{JobContext, Schedule, Scheduler};
use waste_grid_policy as policy;
use waste_grid_prediction::{predict_local, predict_ward};
use waste_grid_routing::{hotspots_from_reports, optimize_route};
use waste_grid_store::{DocLocks, DocumentStore, MemoryStore, collections, typed};
use waste_grid_store_models::{Truck, Ward, WasteReport};
use waste_grid_waste_models::WasteType;

#[derive(Parser)]
#[command(name = "waste-grid", about = "Municipal waste analytics engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the recurring scheduler over the demo dataset.
    Run,
    /// Predict overflow for one ward.
    Predict {
        /// Target ward number.
        #[arg(long)]
        ward: u32,
        /// Use the AI service (needs GEMINI_API_KEY) instead of the
        /// local estimate.
        #[arg(long)]
        ai: bool,
    },
    /// Generate alerts with truck escalation.
    Alerts,
    /// Plan a collection route through a ward's open hotspots.
    Route {
        /// Target ward number.
        #[arg(long)]
        ward: u32,
    },
    /// Value a collected load.
    Value {
        /// Waste type, e.g. `plastic`, `e-waste`.
        #[arg(long)]
        waste_type: WasteType,
        /// Weight in kilograms.
        #[arg(long)]
        weight: f64,
    },
    /// Generate policy recommendations for one ward.
    Policy {
        /// Target ward number.
        #[arg(long)]
        ward: u32,
        /// Incident lookback in days.
        #[arg(long, default_value_t = policy::DEFAULT_LOOKBACK_DAYS)]
        lookback: i64,
    },
    /// Print the command-center snapshot.
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    let store = Arc::new(MemoryStore::new());
    let locks = Arc::new(DocLocks::new());
    let now = Utc::now();
    seed::seed(store.as_ref(), now).await?;

    match cli.command {
        Command::Run => {
            let predictor = Arc::from(create_predictor_from_env()?);
            let scheduler = Scheduler::new(
                Arc::clone(&store) as Arc<dyn DocumentStore>,
                predictor,
            )
            .with_schedule(Schedule::from_env());
            let handles = scheduler.spawn();
            log::info!("Scheduler running with {} jobs; Ctrl-C to stop", handles.len());
            tokio::signal::ctrl_c().await?;
            for handle in handles {
                handle.abort();
            }
        }
        Command::Predict { ward, ai } => {
            if ai {
                let predictor = create_predictor_from_env()?;
                let response = predict_ward(store.as_ref(), predictor.as_ref(), ward, now).await?;
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                let wards: Vec<Ward> = typed::all(store.as_ref(), collections::WARDS).await?;
                let target = wards
                    .iter()
                    .find(|w| w.ward_number == ward)
                    .ok_or_else(|| format!("ward {ward} not found"))?;
                let reports: Vec<WasteReport> =
                    typed::all(store.as_ref(), collections::REPORTS).await?;
                let prediction = predict_local(target, &reports, now);
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            }
        }
        Command::Alerts => {
            let generated = alerts::generate_alerts(store.as_ref(), &locks, now).await?;
            println!("{}", serde_json::to_string_pretty(&generated)?);
        }
        Command::Route { ward } => {
            let reports: Vec<WasteReport> =
                typed::all(store.as_ref(), collections::REPORTS).await?;
            let hotspots = hotspots_from_reports(&reports, ward);
            let truck = alerts::claim_truck(store.as_ref(), &locks, ward)
                .await?
                .map_or_else(|| "unassigned".to_string(), |t| t.id);
            match optimize_route(&truck, &hotspots) {
                Some(route) => println!("{}", serde_json::to_string_pretty(&route)?),
                None => println!("No open hotspots in ward {ward}"),
            }
        }
        Command::Value { waste_type, weight } => {
            let valuation = value_waste(waste_type, weight)?;
            println!("{}", serde_json::to_string_pretty(&valuation)?);
        }
        Command::Policy { ward, lookback } => {
            let docs = policy::generate_for_ward(store.as_ref(), ward, lookback, now).await?;
            println!("{}", serde_json::to_string_pretty(&docs)?);
        }
        Command::Dashboard => {
            // Run the scoring passes first so the snapshot reflects
            // derived state, the way the scheduler would have left it.
            let ctx = JobContext::at(
                Arc::clone(&store) as Arc<dyn DocumentStore>,
                Arc::clone(&locks),
                now,
            );
            waste_grid_jobs::cleanliness::run(&ctx).await?;

            let generated = alerts::generate_alerts(store.as_ref(), &locks, now).await?;
            let wards: Vec<Ward> = typed::all(store.as_ref(), collections::WARDS).await?;
            let reports: Vec<WasteReport> =
                typed::all(store.as_ref(), collections::REPORTS).await?;
            let trucks: Vec<Truck> = typed::all(store.as_ref(), collections::TRUCKS).await?;
            let snapshot = alerts::snapshot(&wards, &reports, &trucks, generated, now);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    Ok(())
}
