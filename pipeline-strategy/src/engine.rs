//! The Strategy Engine's live loop: SUB socket + Condition Store + Signal
//! Channel wired around the pure [`crate::transition::transition`] function
//! (§4.4).

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, warn};

use pipeline_conditions::ConditionStore;
use pipeline_core::{ConditionPhase, Tick};
use pipeline_signals::SignalProducer;
use pipeline_ticks::TickSubscriber;

use crate::error::StrategyError;
use crate::transition::transition;

pub struct StrategyEngine<S: ConditionStore> {
    subscriber: TickSubscriber,
    store: S,
    signals: SignalProducer,
}

impl<S: ConditionStore> std::fmt::Debug for StrategyEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyEngine").finish_non_exhaustive()
    }
}

impl<S: ConditionStore> StrategyEngine<S> {
    pub fn new(subscriber: TickSubscriber, store: S, signals: SignalProducer) -> Self {
        Self {
            subscriber,
            store,
            signals,
        }
    }

    /// Runs until `stop` is raised. Each iteration polls the tick socket
    /// with its configured short timeout; a timeout is routine and simply
    /// loops back around to check `stop` again.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<(), StrategyError> {
        while !stop.load(Ordering::SeqCst) {
            match self.subscriber.recv() {
                Ok(Some(tick)) => self.process_tick(&tick)?,
                Ok(None) => continue,
                Err(e) => {
                    error!(error = %e, "tick subscriber error, continuing");
                }
            }
        }
        Ok(())
    }

    /// Applies one tick to every condition currently in the store,
    /// persisting mutated copies and deleting exited conditions in the same
    /// update cycle (§4.4).
    fn process_tick(&mut self, tick: &Tick) -> Result<(), StrategyError> {
        for condition in self.store.get_all()? {
            let (next, signal) = transition(&condition, tick);

            if next.phase == ConditionPhase::Exited {
                self.store.delete(next.condition_id)?;
            } else if next != condition {
                self.store.update(next)?;
            }

            if let Some(signal) = signal {
                if let Err(e) = self.signals.send(&signal) {
                    warn!(
                        error = %e,
                        condition_id = %next.condition_id,
                        "failed to push trading signal; state transition already committed"
                    );
                }
            }
        }
        Ok(())
    }
}
