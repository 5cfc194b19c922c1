use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use geo_integration::{
    GoogleMapsConfig, GoogleMapsService, LocationService, MissingLocationService,
};
use picker_core::{LocationPicker, StrategyKind};
use shared::{domain::Coordinates, protocol::PickerProps};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod host;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Interactive,
    Simple,
}

impl From<StrategyArg> for StrategyKind {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Interactive => StrategyKind::Interactive,
            StrategyArg::Simple => StrategyKind::Simple,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Drive a location picker from stdin; notifications go to stdout")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
    /// Initial address handed down by the parent.
    #[arg(long, default_value = "")]
    value: String,
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lng: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(strategy) = args.strategy {
        settings.picker.strategy = strategy.into();
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let service = build_service(&settings)?;
    let picker = LocationPicker::new_with_dependencies(
        settings.picker.clone(),
        Arc::new(host::JsonLinesSink),
        service,
        Arc::new(host::TracingRenderer),
    );
    host::spawn_warning_printer(picker.subscribe_events());

    let coordinates = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng)?.known(),
        _ => None,
    };
    let status = picker
        .mount(PickerProps::new(args.value, coordinates))
        .await;
    info!(?status, strategy = ?settings.picker.strategy, "picker mounted; type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match commands::parse_command(&line) {
            Ok(Some(command)) => {
                if !host::execute(&picker, command).await {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => warn!("{err:#}"),
        }
    }

    picker.shutdown().await;
    Ok(())
}

fn build_service(settings: &config::Settings) -> Result<Arc<dyn LocationService>> {
    let Some(api_key) = settings.api_key() else {
        warn!("no maps API key configured; running with manual entry only");
        return Ok(Arc::new(MissingLocationService));
    };

    let mut maps_config = GoogleMapsConfig::new(api_key);
    maps_config.language = Some(settings.picker.locale.language_tag().to_string());
    if let Some(base_url) = settings.maps_base_url()? {
        maps_config = maps_config.with_base_url(base_url);
    }
    Ok(Arc::new(GoogleMapsService::new(maps_config)?))
}
