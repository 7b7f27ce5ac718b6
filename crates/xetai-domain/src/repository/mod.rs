//! Repository trait definitions for compare persistence

use xetai_types::Result;

/// Persistence for the compare selection (product identifiers only)
pub trait CompareStorage {
    /// Load stored identifiers in selection order
    fn load(&self) -> Result<Vec<String>>;

    /// Replace stored identifiers
    fn save(&self, ids: &[String]) -> Result<()>;
}
