//! Repository adapters for content and persistence

use std::path::PathBuf;
use std::rc::Rc;

use xetai_domain::repository::CompareStorage;
use xetai_infra::catalog_loader::{Catalog, CatalogLoader};
use xetai_infra::persistence::{FileCompareStorage, MemoryCompareStorage};
use xetai_types::Result;

use crate::config::Config;
use crate::constants::DEFAULT_CATALOG_TOML;

/// Load the configured catalog, or the built-in one
pub fn open_catalog(config: &Config) -> Result<Catalog> {
    match config.catalog_path {
        Some(ref path) => CatalogLoader::load_from_file(path),
        None => CatalogLoader::load_from_str(DEFAULT_CATALOG_TOML),
    }
}

/// Open compare storage in the configured store directory.
///
/// Falls back to process-local storage when the directory is unusable.
pub fn open_compare_storage(config: &Config) -> Rc<dyn CompareStorage> {
    match config.store_dir() {
        Ok(dir) => open_compare_storage_at(dir),
        Err(e) => {
            tracing::warn!(error = %e, "no store directory, compare list will not persist");
            Rc::new(MemoryCompareStorage::new())
        }
    }
}

/// Open compare storage at a custom directory
pub fn open_compare_storage_at(store_dir: PathBuf) -> Rc<dyn CompareStorage> {
    match FileCompareStorage::open(store_dir.clone()) {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            tracing::warn!(
                dir = %store_dir.display(),
                error = %e,
                "compare store unavailable, compare list will not persist"
            );
            Rc::new(MemoryCompareStorage::new())
        }
    }
}
