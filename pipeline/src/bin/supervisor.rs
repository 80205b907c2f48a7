//! Supervisor: the optional Lifecycle Manager CLI entry point. Spawns
//! `gateway-host`, `strategy`, and `order-executor` as child OS processes
//! (§5), tracking their PIDs under `tmp/pids/*.pid` (§6) and driving the
//! same ordered startup/shutdown sequence as
//! [`pipeline_lifecycle::manager::LifecycleManager`] — which supervises
//! components running as threads inside a single process rather than as
//! separate ones, the shape this binary needs for a real multi-process
//! deployment.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::{Child, Command};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use pipeline_core::{logging, PipelineConfig};
use pipeline_lifecycle::check_port_availability;

const GATEWAY_STARTUP_GRACE: Duration = Duration::from_secs(3);

fn endpoint_port(endpoint: &str) -> u16 {
    endpoint
        .rsplit(':')
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(|| panic!("endpoint {endpoint} has no parseable port"))
}

fn sibling_binary(name: &str) -> PathBuf {
    let mut path = env::current_exe().expect("failed to resolve current executable path");
    path.pop();
    path.push(name);
    path
}

fn write_pid_file(pid_dir: &PathBuf, name: &str, pid: u32) {
    if let Err(e) = fs::create_dir_all(pid_dir) {
        warn!(error = %e, "failed to create pid directory");
        return;
    }
    if let Err(e) = fs::write(pid_dir.join(format!("{name}.pid")), pid.to_string()) {
        warn!(error = %e, component = name, "failed to write pid file");
    }
}

fn remove_pid_file(pid_dir: &PathBuf, name: &str) {
    let _ = fs::remove_file(pid_dir.join(format!("{name}.pid")));
}

fn spawn_component(pid_dir: &PathBuf, name: &str) -> Child {
    let child = Command::new(sibling_binary(name))
        .spawn()
        .unwrap_or_else(|e| panic!("failed to spawn {name}: {e}"));
    write_pid_file(pid_dir, name, child.id());
    info!(component = name, pid = child.id(), "component started");
    child
}

fn stop_component(pid_dir: &PathBuf, name: &str, child: &mut Child) {
    match child.try_wait() {
        Ok(Some(status)) => {
            info!(component = name, ?status, "component had already exited");
        }
        Ok(None) => {
            if let Err(e) = child.kill() {
                error!(error = %e, component = name, "failed to signal component to stop");
            }
            let _ = child.wait();
        }
        Err(e) => error!(error = %e, component = name, "failed to query component status"),
    }
    remove_pid_file(pid_dir, name);
}

fn main() {
    logging::init_logging();
    let config = PipelineConfig::from_env();
    let pid_dir = config.pid_dir();

    info!("supervisor: starting trading system");
    let ports = [
        endpoint_port(&config.tick_pub_endpoint),
        endpoint_port(&config.signal_endpoint),
    ];
    let availability: BTreeMap<u16, bool> = check_port_availability(&ports);
    if availability.values().any(|&available| !available) {
        error!("required ports are not available, aborting startup");
        std::process::exit(1);
    }

    let mut gateway = spawn_component(&pid_dir, "gateway-host");
    std::thread::sleep(GATEWAY_STARTUP_GRACE);
    let mut strategy = spawn_component(&pid_dir, "strategy");
    let mut order_executor = spawn_component(&pid_dir, "order-executor");

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handler = Arc::clone(&stop);
    ctrlc::set_handler(move || stop_handler.store(true, Ordering::SeqCst))
        .expect("failed to install Ctrl-C handler");

    info!("supervisor: trading system running");
    while !stop.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(500));
    }

    info!("supervisor: stopping trading system");
    stop_component(&pid_dir, "order-executor", &mut order_executor);
    stop_component(&pid_dir, "strategy", &mut strategy);
    stop_component(&pid_dir, "gateway-host", &mut gateway);
    info!("supervisor: trading system stopped");
}
