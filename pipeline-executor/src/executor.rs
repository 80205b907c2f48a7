//! Order Executor loop: consume signals, submit orders through the
//! Gateway Client (§4.6).

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info, warn};

use pipeline_core::{OpenClose, OrderRequest, OrderType, TimeInForce};
use pipeline_session::SessionStore;
use pipeline_signals::{SignalConsumer, SignalError};

use crate::config::ExecutorConfig;
use crate::gateway::OrderGateway;

pub struct OrderExecutor<Sess: SessionStore, G: OrderGateway> {
    consumer: SignalConsumer,
    session: Sess,
    gateway: G,
    config: ExecutorConfig,
}

impl<Sess: SessionStore, G: OrderGateway> std::fmt::Debug for OrderExecutor<Sess, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderExecutor").finish_non_exhaustive()
    }
}

impl<Sess: SessionStore, G: OrderGateway> OrderExecutor<Sess, G> {
    pub fn new(consumer: SignalConsumer, session: Sess, gateway: G, config: ExecutorConfig) -> Self {
        Self {
            consumer,
            session,
            gateway,
            config,
        }
    }

    /// Runs until `stop` is raised. Single-threaded: one signal is fully
    /// processed — including the synchronous gateway RPC — before the next
    /// is received (§4.6).
    pub fn run(&mut self, stop: &AtomicBool) {
        while !stop.load(Ordering::SeqCst) {
            match self.consumer.recv() {
                Ok(Some(signal)) => self.handle_signal(signal),
                Ok(None) => continue,
                Err(SignalError::Decode(e)) => {
                    warn!(error = %e, "discarding signal that did not decode as a Trading Signal");
                }
                Err(SignalError::Transport(e)) => {
                    error!(error = %e, "signal transport error");
                }
            }
            if stop.load(Ordering::SeqCst) {
                break;
            }
        }
    }

    fn handle_signal(&mut self, signal: pipeline_core::TradingSignal) {
        let order_account = match self.session.get_order_account() {
            Ok(Some(account)) => account,
            Ok(None) => {
                error!("no order_account in session, skipping signal");
                return;
            }
            Err(e) => {
                error!(error = %e, "failed to read session, skipping signal");
                return;
            }
        };

        let request = OrderRequest {
            order_account,
            item_code: signal.commodity_id,
            side: signal.operation,
            order_type: OrderType::Market,
            price: 0,
            quantity: self.config.default_quantity,
            open_close: OpenClose::Auto,
            note: self.config.note.clone(),
            day_trade: pipeline_core::DayTrade::No,
            time_in_force: TimeInForce::Ioc,
        };

        if !self.gateway.is_connected() {
            warn!("gateway is not connected, skipping signal");
            return;
        }

        match self.gateway.send_order(&request) {
            Ok(response) if response.accepted => {
                info!(order_serial = %response.order_serial, "order accepted");
            }
            Ok(response) => {
                error!(
                    error_code = %response.error_code,
                    error_message = %response.error_message,
                    "order rejected"
                );
            }
            Err(e) => error!(error = %e, "gateway send_order failed"),
        }
    }
}
