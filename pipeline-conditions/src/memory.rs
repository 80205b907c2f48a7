//! In-memory Condition Store, used in tests and the Strategy Engine's unit
//! tests for the transition function's caller.

use uuid::Uuid;

use pipeline_core::{Condition, ConditionSpec};

use crate::error::ConditionError;
use crate::store::ConditionStore;

#[derive(Debug, Default)]
pub struct InMemoryConditionStore {
    conditions: Vec<Condition>,
}

impl InMemoryConditionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConditionStore for InMemoryConditionStore {
    fn get(&self, id: Uuid) -> Result<Option<Condition>, ConditionError> {
        Ok(self.conditions.iter().find(|c| c.condition_id == id).copied())
    }

    fn get_all(&self) -> Result<Vec<Condition>, ConditionError> {
        Ok(self.conditions.clone())
    }

    fn search_by_trigger_price(&self, trigger_price: i64) -> Result<Vec<Condition>, ConditionError> {
        Ok(self
            .conditions
            .iter()
            .filter(|c| c.trigger_price == trigger_price)
            .copied()
            .collect())
    }

    fn create(&mut self, spec: ConditionSpec) -> Result<Condition, ConditionError> {
        let condition = Condition::new(Uuid::new_v4(), spec)?;
        self.conditions.push(condition);
        Ok(condition)
    }

    fn update(&mut self, condition: Condition) -> Result<(), ConditionError> {
        let index = self
            .conditions
            .iter()
            .position(|existing| existing.condition_id == condition.condition_id)
            .ok_or(ConditionError::NotFound(condition.condition_id))?;
        self.conditions[index] = condition;
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<(), ConditionError> {
        let before = self.conditions.len();
        self.conditions.retain(|c| c.condition_id != id);
        if self.conditions.len() == before {
            return Err(ConditionError::NotFound(id));
        }
        Ok(())
    }

    fn delete_all(&mut self) -> Result<(), ConditionError> {
        self.conditions.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_core::Side;

    #[test]
    fn create_and_delete_round_trip() {
        let mut store = InMemoryConditionStore::new();
        let condition = store.create(ConditionSpec::new(Side::Buy, 18000, 1)).unwrap();
        assert_eq!(store.get_all().unwrap().len(), 1);
        store.delete(condition.condition_id).unwrap();
        assert_eq!(store.get_all().unwrap().len(), 0);
    }
}
