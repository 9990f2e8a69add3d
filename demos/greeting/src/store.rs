//! In-memory greeting repository.
//!
//! Stands in for the data access collaborator: a synchronous
//! request/response surface (value or absence) that the endpoints call into.
//! Constructed once in `main` and passed into each endpoint explicitly.

use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingRecord {
    pub uuid: Uuid,
    pub text: Option<String>,
}

#[derive(Debug, Default)]
pub struct GreetingStore {
    records: Mutex<Vec<GreetingRecord>>,
}

impl GreetingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, text: Option<String>) -> Uuid {
        let uuid = Uuid::new_v4();
        self.records
            .lock()
            .unwrap()
            .push(GreetingRecord { uuid, text });
        uuid
    }

    pub fn fetch(&self, uuid: Uuid) -> Option<GreetingRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.uuid == uuid)
            .cloned()
    }

    pub fn page(&self, offset: i64, limit: i64) -> Vec<GreetingRecord> {
        let records = self.records.lock().unwrap();
        records
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> i64 {
        self.records.lock().unwrap().len() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_fetch_roundtrip() {
        let store = GreetingStore::new();
        let uuid = store.insert(Some("hello".to_string()));
        let record = store.fetch(uuid).unwrap();
        assert_eq!(record.text.as_deref(), Some("hello"));
        assert!(store.fetch(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_page_slices_in_insertion_order() {
        let store = GreetingStore::new();
        for i in 0..5 {
            store.insert(Some(format!("g{i}")));
        }
        let page = store.page(3, 3);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].text.as_deref(), Some("g3"));
        assert_eq!(store.count(), 5);
    }
}
