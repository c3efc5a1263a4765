//! Register pipeline binary.
//!
//! Runs one full batch: ingest, normalize, validate, graph, descriptor,
//! manifest. Intended to be driven by a scheduler (e.g. a nightly job);
//! concurrent invocations against the same output paths must be
//! serialized externally.
//!
//! ## Configuration
//!
//! - `--config`: YAML configuration file (default: `config.yaml`)
//! - `--input`: override the register input file
//! - `VT_PRIVATE_KEY_PEM`: RSA private key for manifest signing (optional)
//! - `RUST_LOG`: log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use register_graph::{pipeline, PipelineConfig, PipelineError};

/// Build a deterministic JSON-LD register graph and signed manifest.
#[derive(Debug, Parser)]
#[command(name = "register-graph", version)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the register input file from the configuration.
    #[arg(long)]
    input: Option<PathBuf>,
}

fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "register_graph=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "pipeline failed");
            // Full cause chain for the operator.
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                error!(cause = %cause, "caused by");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), PipelineError> {
    let mut cfg = PipelineConfig::from_yaml_file(&cli.config)?;
    if let Some(input) = &cli.input {
        cfg.input_file = input.clone();
    }

    let summary = pipeline::run(&cfg)?;
    info!(
        firms = summary.firm_count,
        offices = summary.office_count,
        rejected = summary.rejection_count,
        manifest_entries = summary.manifest_entries,
        signed = summary.signed,
        "done"
    );
    Ok(())
}
