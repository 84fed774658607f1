use std::io::Write;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod device;
mod error;
mod location;
mod models;
mod render;
mod reports;
mod scene;
mod screen;

use config::{Config, OutputFormat};
use device::SimulatedDevice;
use location::LocationController;
use reports::{FileReports, ReportSource, StaticReports};
use screen::{MapScreen, ScreenState};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = Config::load()?;

    // one cooperative thread drives acquisition, like a UI thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(config))
}

async fn async_main(config: Config) -> anyhow::Result<()> {
    let reports: Box<dyn ReportSource> = match &config.reports_file {
        Some(path) => Box::new(FileReports::new(path)),
        None => Box::new(StaticReports),
    };

    let device = Arc::new(SimulatedDevice::new(&config.device));
    let controller = LocationController::new(device, config.fallback);
    info!("fallback region centered at {}", controller.fallback());

    let mut screen = MapScreen::new(config.title.clone(), controller, reports);
    screen.load().await;

    let json = render_output(&config, screen.state())?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}

/// Static-map request when asked for and the scene is ready, otherwise the screen state itself.
fn render_output(config: &Config, state: &ScreenState) -> anyhow::Result<String> {
    let json = match (config.output, state) {
        (OutputFormat::Staticmap, ScreenState::Ready { scene, .. }) => {
            serde_json::to_string_pretty(&render::static_map_request(scene, &config.render))?
        }
        _ => serde_json::to_string_pretty(state)?,
    };
    Ok(json)
}
