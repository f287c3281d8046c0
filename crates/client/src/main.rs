//! Loot simulator binary.
//!
//! Composition root: reads settings from the environment, sets up logging,
//! loads content and runs the simulation for the configured number of ticks.
//!
//! ```bash
//! LOOT_DATA_DIR=data LOOT_SCENARIO=yard LOOT_TICKS=40 RUST_LOG=loot=debug \
//!     cargo run -p loot-sim
//! ```

use anyhow::Result;

use loot_sim::{SimConfig, Simulation, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = logging::setup_logging(config.session_id.as_deref())?;

    let (loot_config, scenario) = config.load_content()?;

    tracing::info!(
        agents = scenario.agents.len(),
        objects = scenario.objects.len(),
        ticks = config.ticks,
        "Starting loot simulation"
    );

    let mut simulation = Simulation::from_scenario(&scenario, loot_config, &config)?;
    let summary = simulation.run(config.ticks).await?;

    tracing::info!(
        targets = summary.targets_claimed,
        containers = summary.containers_repacked,
        items = summary.items_picked,
        corpses = summary.corpses_searched,
        failures = summary.failures,
        "Simulation finished"
    );
    Ok(())
}
