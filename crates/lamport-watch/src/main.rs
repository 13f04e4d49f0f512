mod bootstrap;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use lamport_core::settings::Settings;
use lamport_core::time_utils;
use lamport_runtime::store::StateStore;
use lamport_sim::{Simulation, SimulationConfig};
use lamport_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();
    settings.validate()?;

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("lamport-watch v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Processes: {}, Theme: {}, Timezone: {}",
        settings.processes,
        settings.theme,
        settings.timezone
    );

    let timezone = time_utils::resolve_timezone(&settings.timezone);

    // The store hands one end of the render channel to the UI; every other
    // component only ever sees the store.
    let (store, rx) = StateStore::new(settings.processes);
    store.append_log(format!(
        "Visualization started with {} processes",
        settings.processes
    ));

    let sim = Simulation::spawn(
        SimulationConfig {
            processes: settings.processes,
            step: Duration::from_millis(settings.step_ms),
            failure_chance: settings.failure_chance,
        },
        Arc::clone(&store),
    )?;

    let app = App::new(&settings.theme, settings.processes, timezone);

    // Run the TUI event loop. The loop exits on 'q' / Ctrl+C inside the TUI.
    // We also listen for Ctrl+C at the OS level so that signals received
    // while the terminal is in raw mode are handled cleanly.
    tokio::select! {
        result = app.run(rx) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down");
        }
    }

    tracing::info!("stopping simulation actors");
    sim.stop();

    Ok(())
}
