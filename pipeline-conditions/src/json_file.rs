//! JSON-file-backed Condition Store (§4.8).
//!
//! Each read re-parses the file as a raw JSON array and decodes elements
//! one at a time, skipping — and warning on — any record that fails to
//! decode, rather than failing the whole load. Writes are whole-file
//! rewrites.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use pipeline_core::{Condition, ConditionSpec};

use crate::error::ConditionError;
use crate::store::ConditionStore;

pub struct JsonFileConditionStore {
    path: PathBuf,
}

impl std::fmt::Debug for JsonFileConditionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileConditionStore")
            .field("path", &self.path)
            .finish()
    }
}

impl JsonFileConditionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> Result<Vec<Condition>, ConditionError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<Value> = match serde_json::from_slice(&bytes) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "conditions file is not a JSON array, treating as empty");
                return Ok(Vec::new());
            }
        };

        let mut conditions = Vec::with_capacity(raw.len());
        for (index, item) in raw.into_iter().enumerate() {
            match serde_json::from_value::<Condition>(item) {
                Ok(condition) => conditions.push(condition),
                Err(e) => warn!(index, error = %e, "skipping malformed condition record"),
            }
        }
        Ok(conditions)
    }

    fn write_all(&self, conditions: &[Condition]) -> Result<(), ConditionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_vec_pretty(conditions)
            .map_err(|e| ConditionError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

impl ConditionStore for JsonFileConditionStore {
    fn get(&self, id: Uuid) -> Result<Option<Condition>, ConditionError> {
        Ok(self
            .read_all()?
            .into_iter()
            .find(|condition| condition.condition_id == id))
    }

    fn get_all(&self) -> Result<Vec<Condition>, ConditionError> {
        self.read_all()
    }

    fn search_by_trigger_price(&self, trigger_price: i64) -> Result<Vec<Condition>, ConditionError> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|condition| condition.trigger_price == trigger_price)
            .collect())
    }

    fn create(&mut self, spec: ConditionSpec) -> Result<Condition, ConditionError> {
        let mut conditions = self.read_all()?;
        let condition = Condition::new(Uuid::new_v4(), spec)?;
        conditions.push(condition);
        self.write_all(&conditions)?;
        Ok(condition)
    }

    fn update(&mut self, condition: Condition) -> Result<(), ConditionError> {
        let mut conditions = self.read_all()?;
        let index = conditions
            .iter()
            .position(|existing| existing.condition_id == condition.condition_id)
            .ok_or(ConditionError::NotFound(condition.condition_id))?;
        conditions[index] = condition;
        self.write_all(&conditions)
    }

    fn delete(&mut self, id: Uuid) -> Result<(), ConditionError> {
        let mut conditions = self.read_all()?;
        let before = conditions.len();
        conditions.retain(|condition| condition.condition_id != id);
        if conditions.len() == before {
            return Err(ConditionError::NotFound(id));
        }
        self.write_all(&conditions)
    }

    fn delete_all(&mut self) -> Result<(), ConditionError> {
        self.write_all(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_core::Side;

    fn store(dir: &tempfile::TempDir) -> JsonFileConditionStore {
        JsonFileConditionStore::new(dir.path().join("conditions.json"))
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store(&dir).get_all().unwrap(), Vec::new());
    }

    #[test]
    fn create_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        let spec = ConditionSpec::new(Side::Buy, 18000, 1);
        let created = store.create(spec).unwrap();
        let fetched = store.get(created.condition_id).unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn update_persists_mutated_copy() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        let mut condition = store.create(ConditionSpec::new(Side::Buy, 18000, 1)).unwrap();
        condition.reprice_from_trigger(18010);
        store.update(condition).unwrap();
        let fetched = store.get(condition.condition_id).unwrap().unwrap();
        assert_eq!(fetched.trigger_price, 18010);
    }

    #[test]
    fn delete_removes_the_condition() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        let condition = store.create(ConditionSpec::new(Side::Buy, 18000, 1)).unwrap();
        store.delete(condition.condition_id).unwrap();
        assert_eq!(store.get(condition.condition_id).unwrap(), None);
    }

    #[test]
    fn deleting_a_missing_condition_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        assert!(matches!(
            store.delete(Uuid::new_v4()),
            Err(ConditionError::NotFound(_))
        ));
    }

    #[test]
    fn malformed_records_are_skipped_individually() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conditions.json");
        let mut store = JsonFileConditionStore::new(&path);
        let good = store.create(ConditionSpec::new(Side::Buy, 18000, 1)).unwrap();

        let mut raw: Vec<Value> = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        raw.push(serde_json::json!({ "not": "a condition" }));
        fs::write(&path, serde_json::to_vec(&raw).unwrap()).unwrap();

        let conditions = store.get_all().unwrap();
        assert_eq!(conditions, vec![good]);
    }

    #[test]
    fn search_by_trigger_price_filters() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        store.create(ConditionSpec::new(Side::Buy, 18000, 1)).unwrap();
        store.create(ConditionSpec::new(Side::Sell, 18200, 1)).unwrap();
        let found = store.search_by_trigger_price(18200).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].trigger_price, 18200);
    }
}
