//! `stroke-risk` command-line entry point.
//!
//! # Environment Variables
//! - `STROKE_RISK_ENCODER`: encoder artifact path (default: "models/encoder.json")
//! - `STROKE_RISK_CLASSIFIER`: classifier artifact path (default: "models/classifier.json")
//! - `STROKE_RISK_ENCODER_SHA256`, `STROKE_RISK_CLASSIFIER_SHA256`: optional pinned digests
//! - `RUST_LOG`: log filter
//!
//! A `.env` file in the working directory is read first.

mod args;
mod commands;

use clap::Parser;
use stroke_risk_core::RiskEngine;

use args::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stroke_risk=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = cli.artifacts.to_config()?;
    let engine = RiskEngine::load(&config)?;

    match cli.command {
        Commands::Assess {
            name,
            details,
            format,
            out,
        } => {
            commands::assess_to_file(&engine, name, details.into(), format, out.as_deref())?;
        }
        Commands::Inspect => {
            println!("{}", serde_json::to_string_pretty(&commands::describe(&engine))?);
        }
    }

    Ok(())
}
