//! CLI entry point for places.

mod cli;

use clap::Parser;
use places::api::PlacesClient;
use places::build_info;
use places::config::load_config;
use places::error::PlacesError;
use places::logging::init_logging;
use places::types::ResponseEnvelope;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    if args.version {
        println!("{}", build_info::version_text());
        return;
    }

    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: cli::Args) -> Result<(), PlacesError> {
    let Some(command) = args.command.as_ref() else {
        eprintln!("usage: places <nearby|text|details|radar> [OPTIONS]");
        std::process::exit(2);
    };

    let mut config = load_config(args.config.as_deref())?;

    // CLI overrides.
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(sensor) = args.sensor_override() {
        config.api.sensor = sensor;
    }
    if let Some(language) = &args.language {
        config.api.language = Some(language.clone());
    }
    let retry = args.retry.resolve(config.retry.take())?;

    if config.api.api_key.is_empty() {
        tracing::warn!("no API key configured; the service will likely answer REQUEST_DENIED");
    }

    let client = PlacesClient::new(
        &config.api,
        Duration::from_secs(config.network.timeout_secs),
    );
    let envelope = client.execute(&command.to_request(), retry.as_ref()).await?;
    println!("{}", render(envelope)?);
    Ok(())
}

fn render(envelope: ResponseEnvelope) -> Result<String, PlacesError> {
    serde_json::to_string_pretty(&envelope.into_value()).map_err(PlacesError::Render)
}
