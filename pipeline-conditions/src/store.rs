//! The Condition Store interface (§4.8).

use uuid::Uuid;

use pipeline_core::{Condition, ConditionSpec};

use crate::error::ConditionError;

/// Persistent CRUD set of trading conditions. The Strategy Engine borrows
/// conditions read-mostly and writes back mutated copies atomically per
/// tick (§3 Ownership).
pub trait ConditionStore: Send {
    fn get(&self, id: Uuid) -> Result<Option<Condition>, ConditionError>;
    fn get_all(&self) -> Result<Vec<Condition>, ConditionError>;
    fn search_by_trigger_price(&self, trigger_price: i64) -> Result<Vec<Condition>, ConditionError>;

    /// Assigns a fresh UUID and derives the price ladder from `spec`.
    fn create(&mut self, spec: ConditionSpec) -> Result<Condition, ConditionError>;

    fn update(&mut self, condition: Condition) -> Result<(), ConditionError>;
    fn delete(&mut self, id: Uuid) -> Result<(), ConditionError>;
    fn delete_all(&mut self) -> Result<(), ConditionError>;
}
