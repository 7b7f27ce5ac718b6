//! Catalog content loader from TOML definitions

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use xetai_domain::service::is_shareable_id;
use xetai_types::{BlogPost, ConfigError, Error, Product, Result};

/// Container for parsing catalog TOML
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    posts: Vec<BlogPost>,
}

/// Fully resolved in-memory content, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub posts: Vec<BlogPost>,
}

impl Catalog {
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up by id, then by slug in any category
    pub fn product_by_id_or_slug(&self, key: &str) -> Option<&Product> {
        self.product(key)
            .or_else(|| self.products.iter().find(|p| p.slug == key))
    }
}

pub struct CatalogLoader;

impl CatalogLoader {
    /// Load catalog content from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Catalog> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read catalog file {}: {}",
                path.display(),
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load catalog content from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Catalog> {
        let file: CatalogFile = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse catalog TOML: {}",
                e
            )))
        })?;

        validate(&file)?;
        tracing::debug!(
            products = file.products.len(),
            posts = file.posts.len(),
            "catalog loaded"
        );

        Ok(Catalog {
            products: file.products,
            posts: file.posts,
        })
    }
}

fn validate(file: &CatalogFile) -> Result<()> {
    let mut ids = HashSet::new();
    let mut paths = HashSet::new();
    for product in &file.products {
        if !is_shareable_id(&product.id) {
            return Err(Error::Catalog(format!(
                "product id {:?} cannot appear in a compare link",
                product.id
            )));
        }
        if !ids.insert(product.id.as_str()) {
            return Err(Error::Catalog(format!("duplicate product id: {}", product.id)));
        }
        if !paths.insert((product.vehicle_type, product.slug.as_str())) {
            return Err(Error::Catalog(format!(
                "duplicate product path: {}",
                product.url_path()
            )));
        }
        if product.brands.is_empty() {
            return Err(Error::Catalog(format!("product {} has no brand", product.id)));
        }
    }

    let mut post_ids = HashSet::new();
    for post in &file.posts {
        if !post_ids.insert(post.id.as_str()) {
            return Err(Error::Catalog(format!("duplicate post id: {}", post.id)));
        }
    }
    Ok(())
}
