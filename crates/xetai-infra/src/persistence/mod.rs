//! Compare storage implementations over the file store and process memory

mod compare_storage;

pub use compare_storage::{FileCompareStorage, MemoryCompareStorage};
