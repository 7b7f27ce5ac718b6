//! Domain layer - catalog filtering, compare selection, calculators

pub mod repository;
pub mod service;
