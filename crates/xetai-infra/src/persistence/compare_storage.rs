//! CompareStorage implementations

use std::cell::RefCell;
use std::path::PathBuf;

use xetai_domain::repository::CompareStorage;
use xetai_store::CompareStore;
use xetai_types::Result;

/// File-backed compare storage
pub struct FileCompareStorage {
    store: CompareStore,
}

impl FileCompareStorage {
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            store: CompareStore::open(store_dir)?,
        })
    }

    pub fn store(&self) -> &CompareStore {
        &self.store
    }
}

impl CompareStorage for FileCompareStorage {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.store.load_ids())
    }

    fn save(&self, ids: &[String]) -> Result<()> {
        self.store.save_ids(ids)
    }
}

/// Process-local storage, used when the store directory is unavailable
#[derive(Debug, Default)]
pub struct MemoryCompareStorage {
    ids: RefCell<Vec<String>>,
}

impl MemoryCompareStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: Vec<String>) -> Self {
        Self {
            ids: RefCell::new(ids),
        }
    }
}

impl CompareStorage for MemoryCompareStorage {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.ids.borrow().clone())
    }

    fn save(&self, ids: &[String]) -> Result<()> {
        *self.ids.borrow_mut() = ids.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileCompareStorage::open(dir.path().to_path_buf()).unwrap();
        storage.save(&["x".to_string(), "y".to_string()]).unwrap();
        assert!(storage.store().path().exists());
        assert_eq!(storage.load().unwrap(), vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryCompareStorage::new();
        assert!(storage.load().unwrap().is_empty());
        storage.save(&["x".to_string()]).unwrap();
        assert_eq!(storage.load().unwrap(), vec!["x".to_string()]);
    }
}
