//! Lifecycle Manager: ordered startup/shutdown and health of the Gateway,
//! Strategy Engine, and Order Executor (§4.7).
//!
//! Generalizes the original `SystemManager`: the Gateway Server already
//! owns its worker thread (`pipeline_gateway::GatewayServer::start/stop`),
//! so this manager only has to drive it. The Strategy Engine and Order
//! Executor expose a blocking `run(&AtomicBool)` loop rather than their own
//! thread, so the manager spawns one dedicated OS thread per component and
//! holds the `Arc<AtomicBool>` stop flag plus the `JoinHandle`, the same
//! thread-handle-plus-stop-signal shape the Gateway Server uses internally.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use pipeline_broker::BrokerCapability;
use pipeline_gateway::GatewayServer;

use crate::error::LifecycleError;
use crate::port_checker::check_port_availability;
use crate::status::{ComponentKey, ComponentStatus, SystemHealth, SystemStartupResult};

/// Grace period after the Gateway reaches `RUNNING` before the Strategy
/// Engine is started, letting the broker capability and transport sockets
/// settle (§4.7).
const GATEWAY_STARTUP_GRACE: Duration = Duration::from_secs(3);

/// A restartable component runner: called on its own thread with the stop
/// flag it should honor. Re-invokable so `restart_component` can build a
/// fresh instance of the component rather than resuming a consumed one.
pub type ComponentRunner = Arc<dyn Fn(Arc<AtomicBool>) + Send + Sync>;

struct ThreadedComponent {
    runner: ComponentRunner,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    status: ComponentStatus,
}

impl ThreadedComponent {
    fn new(runner: ComponentRunner) -> Self {
        Self {
            runner,
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
            status: ComponentStatus::Stopped,
        }
    }

    fn start(&mut self, thread_name: &str) {
        self.status = ComponentStatus::Starting;
        self.stop = Arc::new(AtomicBool::new(false));
        let stop = Arc::clone(&self.stop);
        let runner = Arc::clone(&self.runner);
        let handle = thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || runner(stop))
            .expect("failed to spawn component thread");
        self.handle = Some(handle);
        self.status = ComponentStatus::Running;
    }

    fn stop(&mut self) {
        if self.status != ComponentStatus::Running {
            return;
        }
        self.status = ComponentStatus::Stopping;
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        self.status = ComponentStatus::Stopped;
    }
}

/// Supervises the three long-running components of one trading-system
/// deployment. Generic over the Broker Capability so it can drive the real
/// Gateway Server without pipeline-lifecycle knowing about the concrete
/// broker binding.
pub struct LifecycleManager<B: BrokerCapability + 'static> {
    gateway: GatewayServer<B>,
    ports: Vec<u16>,
    strategy: ThreadedComponent,
    order_executor: ThreadedComponent,
    startup_instant: Option<Instant>,
    gateway_startup_grace: Duration,
}

impl<B: BrokerCapability + 'static> std::fmt::Debug for LifecycleManager<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleManager")
            .field("gateway_state", &self.gateway.state())
            .field("strategy_status", &self.strategy.status)
            .field("order_executor_status", &self.order_executor.status)
            .finish()
    }
}

impl<B: BrokerCapability + 'static> LifecycleManager<B> {
    pub fn new(
        gateway: GatewayServer<B>,
        ports: Vec<u16>,
        strategy_runner: ComponentRunner,
        order_executor_runner: ComponentRunner,
    ) -> Self {
        Self::with_gateway_startup_grace(
            gateway,
            ports,
            strategy_runner,
            order_executor_runner,
            GATEWAY_STARTUP_GRACE,
        )
    }

    /// As [`Self::new`] but with an overridden post-Gateway grace period —
    /// tests use this to avoid paying the real 3s wait.
    pub fn with_gateway_startup_grace(
        gateway: GatewayServer<B>,
        ports: Vec<u16>,
        strategy_runner: ComponentRunner,
        order_executor_runner: ComponentRunner,
        gateway_startup_grace: Duration,
    ) -> Self {
        Self {
            gateway,
            ports,
            strategy: ThreadedComponent::new(strategy_runner),
            order_executor: ThreadedComponent::new(order_executor_runner),
            startup_instant: None,
            gateway_startup_grace,
        }
    }

    /// Pre-flight check, then ordered startup: Gateway, grace period,
    /// Strategy, Order Executor (§4.7).
    pub fn start_trading_system(&mut self) -> SystemStartupResult {
        info!("starting trading system");

        let availability = check_port_availability(&self.ports);
        if availability.values().any(|&available| !available) {
            error!("required ports are not available");
            return SystemStartupResult {
                success: false,
                gateway_status: ComponentStatus::Stopped,
                strategy_status: ComponentStatus::Stopped,
                order_executor_status: ComponentStatus::Stopped,
                error_message: Some("required ports are not available".to_string()),
            };
        }

        let gateway_status = match self.gateway.start() {
            Ok(()) => ComponentStatus::Running,
            Err(e) => {
                error!(error = %e, "failed to start gateway");
                return SystemStartupResult {
                    success: false,
                    gateway_status: ComponentStatus::Error,
                    strategy_status: ComponentStatus::Stopped,
                    order_executor_status: ComponentStatus::Stopped,
                    error_message: Some(format!("failed to start Gateway: {e}")),
                };
            }
        };

        thread::sleep(self.gateway_startup_grace);

        self.strategy.start("strategy-engine");
        self.order_executor.start("order-executor");

        let all_running = gateway_status == ComponentStatus::Running
            && self.strategy.status == ComponentStatus::Running
            && self.order_executor.status == ComponentStatus::Running;
        if all_running {
            self.startup_instant = Some(Instant::now());
        }

        info!(success = all_running, "trading system startup complete");
        SystemStartupResult {
            success: all_running,
            gateway_status,
            strategy_status: self.strategy.status,
            order_executor_status: self.order_executor.status,
            error_message: None,
        }
    }

    /// Ordered shutdown: Order Executor, Strategy, Gateway (§4.7). A
    /// failure to stop one component is logged but does not abort shutdown
    /// of the others.
    pub fn stop_trading_system(&mut self) {
        info!("stopping trading system");

        self.order_executor.stop();
        self.strategy.stop();

        self.gateway.stop();

        self.startup_instant = None;
        info!("trading system stopped");
    }

    pub fn get_system_health(&self) -> SystemHealth {
        let gateway_status = match self.gateway.state() {
            pipeline_gateway::GatewayState::Running => ComponentStatus::Running,
            pipeline_gateway::GatewayState::Starting => ComponentStatus::Starting,
            pipeline_gateway::GatewayState::Stopping => ComponentStatus::Stopping,
            pipeline_gateway::GatewayState::Stopped => ComponentStatus::Stopped,
        };
        let is_healthy = gateway_status == ComponentStatus::Running
            && self.strategy.status == ComponentStatus::Running
            && self.order_executor.status == ComponentStatus::Running;

        SystemHealth {
            is_healthy,
            gateway_status,
            strategy_status: self.strategy.status,
            order_executor_status: self.order_executor.status,
            uptime: self.startup_instant.map(|t| t.elapsed()),
        }
    }

    /// Restarts a single component: `Stopping -> Stopped -> Starting ->
    /// Running/Error` (§4.7).
    pub fn restart_component(&mut self, component: ComponentKey) -> Result<(), LifecycleError> {
        info!(component = component.as_str(), "restarting component");
        match component {
            ComponentKey::Gateway => {
                self.gateway.stop();
                self.gateway.start()?;
                Ok(())
            }
            ComponentKey::Strategy => {
                self.strategy.stop();
                self.strategy.start("strategy-engine");
                Ok(())
            }
            ComponentKey::OrderExecutor => {
                self.order_executor.stop();
                self.order_executor.start("order-executor");
                Ok(())
            }
        }
    }
}

impl<B: BrokerCapability + 'static> Drop for LifecycleManager<B> {
    fn drop(&mut self) {
        if self.startup_instant.is_some() {
            warn!("lifecycle manager dropped without an explicit stop_trading_system() call");
        }
        self.order_executor.stop();
        self.strategy.stop();
    }
}
