//! Built-in content and defaults

/// Catalog TOML compiled into the binary
pub const DEFAULT_CATALOG_TOML: &str = include_str!("../../data/default_catalog.toml");

/// Number of posts shown by `blog list` without a category
pub const LATEST_POSTS_LIMIT: usize = 10;
