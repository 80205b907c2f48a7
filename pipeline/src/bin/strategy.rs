//! Strategy Engine process: subscribes to ticks, matches conditions, pushes
//! Trading Signals (§5).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use pipeline_conditions::JsonFileConditionStore;
use pipeline_core::{logging, PipelineConfig};
use pipeline_signals::SignalProducer;
use pipeline_strategy::StrategyEngine;
use pipeline_ticks::TickSubscriber;

fn main() {
    logging::init_logging();
    let config = PipelineConfig::from_env();

    let subscriber =
        TickSubscriber::connect(&config.tick_pub_endpoint).expect("failed to connect tick subscriber");
    let store = JsonFileConditionStore::new(config.conditions_file());
    let signals =
        SignalProducer::connect(&config.signal_endpoint).expect("failed to connect signal producer");

    let mut engine = StrategyEngine::new(subscriber, store, signals);

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handler = Arc::clone(&stop);
    ctrlc::set_handler(move || stop_handler.store(true, Ordering::SeqCst))
        .expect("failed to install Ctrl-C handler");

    info!("strategy engine running");
    if let Err(e) = engine.run(&stop) {
        error!(error = %e, "strategy engine exited with an error");
    }
    info!("strategy engine stopped");
}
