//! Order Executor process: consumes Trading Signals, submits Orders
//! through the Broker Gateway Client (§5).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use pipeline_core::{logging, PipelineConfig};
use pipeline_executor::{ExecutorConfig, OrderExecutor};
use pipeline_gateway::GatewayClient;
use pipeline_session::JsonFileSessionStore;
use pipeline_signals::SignalConsumer;

fn main() {
    logging::init_logging();
    let config = PipelineConfig::from_env();

    let consumer =
        SignalConsumer::bind(&config.signal_endpoint).expect("failed to bind signal consumer");
    let session_timeout = chrono::Duration::from_std(config.session_timeout)
        .expect("session timeout does not fit in a chrono::Duration");
    let session = JsonFileSessionStore::new(config.session_file(), session_timeout);
    let gateway = GatewayClient::from_config(&config);
    let executor_config = ExecutorConfig {
        default_quantity: config.default_order_quantity,
        ..ExecutorConfig::default()
    };

    let mut executor = OrderExecutor::new(consumer, session, gateway, executor_config);

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handler = Arc::clone(&stop);
    ctrlc::set_handler(move || stop_handler.store(true, Ordering::SeqCst))
        .expect("failed to install Ctrl-C handler");

    info!("order executor running");
    executor.run(&stop);
    info!("order executor stopped");
}
