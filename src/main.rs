//! `reveal-sim`: plays a scroll scenario headlessly and logs the
//! transition trace.

use std::path::Path;

use scroll_reveal::scenario::{Scenario, Simulation};
use web_time::Instant;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let Some(path) = std::env::args().nth(1) else {
        log::error!("Usage: reveal-sim <scenario.toml>");
        std::process::exit(1);
    };

    let scenario = match Scenario::load(Path::new(&path)) {
        Ok(scenario) => scenario,
        Err(e) => {
            log::error!("{path}: {e}");
            std::process::exit(1);
        }
    };

    let report = match Simulation::run(&scenario, Instant::now()) {
        Ok(report) => report,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    for (id, state) in &report.targets {
        log::info!("final: {id} = {state}");
    }
    log::info!(
        "{} frames, {} transitions, {} live observers",
        report.frames,
        report.trace.len(),
        report.live_observers
    );
}
