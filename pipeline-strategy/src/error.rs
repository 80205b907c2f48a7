//! Strategy Engine error taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("condition store error: {0}")]
    Store(#[from] pipeline_conditions::ConditionError),

    #[error("tick transport error: {0}")]
    Tick(#[from] pipeline_ticks::TickError),
}
