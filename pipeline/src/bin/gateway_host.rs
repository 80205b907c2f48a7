//! Gateway Host process: Broker Capability + Broker Gateway Server + Tick
//! Publisher, one OS process per §5.
//!
//! The concrete broker SDK binding is out of scope (§1); this binary wires
//! up [`pipeline_broker::MockBroker`] as the Broker Capability, the only
//! backend that ships in this workspace. The Tick Publisher is bound at
//! startup so subscribers can connect, but nothing here feeds it real
//! market-data callbacks — that wiring belongs to the concrete broker
//! binding this workspace does not implement.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use pipeline_broker::MockBroker;
use pipeline_core::{logging, PipelineConfig};
use pipeline_gateway::GatewayServer;
use pipeline_ticks::TickPublisher;

fn main() {
    logging::init_logging();
    let config = PipelineConfig::from_env();

    info!(endpoint = %config.gateway_endpoint, "starting gateway host");
    let mut gateway = GatewayServer::new(config.gateway_endpoint.clone(), MockBroker::new());
    gateway.start().expect("failed to start gateway server");

    let _publisher =
        TickPublisher::bind(&config.tick_pub_endpoint).expect("failed to bind tick publisher");
    info!(endpoint = %config.tick_pub_endpoint, "tick publisher bound");

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handler = Arc::clone(&stop);
    ctrlc::set_handler(move || stop_handler.store(true, Ordering::SeqCst))
        .expect("failed to install Ctrl-C handler");

    while !stop.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(200));
    }

    info!("shutting down gateway host");
    gateway.stop();
}
