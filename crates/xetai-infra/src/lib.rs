//! Infrastructure layer - content loading, persistence adapters

pub mod catalog_loader;
pub mod persistence;
