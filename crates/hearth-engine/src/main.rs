//! Hearth terminal binary.
//!
//! Startup sequence:
//!
//! 1. Load run settings (`HEARTH_CONFIG`, else `hearth.yaml`, else defaults)
//! 2. Initialize structured logging on stderr
//! 3. Bootstrap the world
//! 4. Install the Ctrl-C handler, which requests an operator stop
//! 5. Run the tick loop, drawing frames to stdout
//! 6. Print the final frame and why the run ended

mod error;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use hearth_core::config::LoggingConfig;
use hearth_core::runner::log_simulation_end;
use hearth_core::{OperatorState, Simulation, SimulationConfig, run_simulation};

use crate::error::EngineError;
use crate::render::TerminalRenderer;

/// Environment variable naming an explicit config file.
const CONFIG_ENV: &str = "HEARTH_CONFIG";

/// Config file picked up from the working directory when present.
const DEFAULT_CONFIG_FILE: &str = "hearth.yaml";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        source = %source.as_deref().map_or_else(|| "defaults".into(), Path::to_string_lossy),
        width = config.world.width,
        height = config.world.height,
        seed = ?config.world.seed,
        tick_interval_ms = config.simulation.tick_interval_ms,
        "hearth-engine starting"
    );

    // 3. Bootstrap.
    let mut sim = Simulation::new(&config)?;

    // 4. Ctrl-C requests a clean stop between ticks.
    let operator = Arc::new(OperatorState::new(&config.simulation));
    let stopper = Arc::clone(&operator);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping after this tick");
            stopper.request_stop();
        }
    });

    // 5. Run.
    let mut renderer = TerminalRenderer::new(&config.presentation);
    renderer.start()?;
    let result = run_simulation(&mut sim, &operator, &mut renderer).await?;
    log_simulation_end(&result);

    // 6. Final frame.
    renderer.finish(&sim, result.end_reason)?;
    Ok(())
}

/// Find and load the run settings, returning the file they came from.
fn load_config() -> Result<(SimulationConfig, Option<PathBuf>), EngineError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        let config = SimulationConfig::from_file(&path)?;
        return Ok((config, Some(path)));
    }
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if path.exists() {
        let config = SimulationConfig::from_file(path)?;
        return Ok((config, Some(path.to_path_buf())));
    }
    Ok((SimulationConfig::default(), None))
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
