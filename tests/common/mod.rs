use anyhow::{bail, Result};
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use workboard::remote::RemoteStore;
use workboard::store::Store;

/// In-memory stand-in for the remote JSON store, matching its observable
/// contract: map-or-null collection reads, store-assigned ids on create,
/// field-merge on partial update, idempotent delete.
///
/// Clones share the underlying data, so tests can keep a handle for seeding
/// records directly or flipping the store "offline".
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Rc<RefCell<Map<String, Value>>>,
    next_id: Rc<Cell<u32>>,
    offline: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    /// Seed a record with a chosen body (e.g. a handcrafted timestamp),
    /// bypassing the typed layer.
    #[allow(dead_code)]
    pub fn seed(&self, collection: &str, record: Value) -> String {
        self.create(collection, &record).unwrap()
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.get() {
            bail!("store unreachable");
        }
        Ok(())
    }
}

impl RemoteStore for MemoryStore {
    fn get_all(&self, collection: &str) -> Result<Option<Value>> {
        self.check_online()?;
        let data = self.data.borrow();
        match data.get(collection) {
            Some(Value::Object(map)) if !map.is_empty() => {
                Ok(Some(Value::Object(map.clone())))
            }
            _ => Ok(None),
        }
    }

    fn get_one(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        self.check_online()?;
        let data = self.data.borrow();
        Ok(data
            .get(collection)
            .and_then(|records| records.get(id))
            .cloned())
    }

    fn create(&self, collection: &str, record: &Value) -> Result<String> {
        self.check_online()?;
        let id = format!("-W{:06}", self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        let mut data = self.data.borrow_mut();
        let records = data
            .entry(collection.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        records
            .as_object_mut()
            .expect("collection is a map")
            .insert(id.clone(), record.clone());

        Ok(id)
    }

    fn update(&self, collection: &str, id: &str, patch: &Value) -> Result<()> {
        self.check_online()?;
        let mut data = self.data.borrow_mut();
        let records = data
            .entry(collection.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .expect("collection is a map");

        // PATCH merges fields, creating the record if it is absent.
        let record = records
            .entry(id.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let (Value::Object(record), Value::Object(patch)) = (record, patch) {
            for (key, value) in patch {
                record.insert(key.clone(), value.clone());
            }
        }

        Ok(())
    }

    fn remove(&self, collection: &str, id: &str) -> Result<()> {
        self.check_online()?;
        let mut data = self.data.borrow_mut();
        if let Some(records) = data.get_mut(collection).and_then(Value::as_object_mut) {
            records.remove(id);
        }
        Ok(())
    }
}

/// A typed store plus a handle on its in-memory backend.
pub fn test_store() -> (Store, MemoryStore) {
    let remote = MemoryStore::new();
    (Store::new(Box::new(remote.clone())), remote)
}
