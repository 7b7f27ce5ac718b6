//! Catalog Service - composition root for the catalog use cases
//!
//! Owns the loaded content and the compare selection. The selection is
//! rehydrated from storage on construction and written back through the
//! compare list's change hook; storage failures are logged and dropped.

use std::rc::Rc;
use thiserror::Error;

use xetai_domain::repository::CompareStorage;
use xetai_domain::service::blog::{
    self, RECOMMENDED_POSTS_LIMIT, RELATED_POSTS_LIMIT,
};
use xetai_domain::service::compare::parse_share_url;
use xetai_domain::service::{
    amortize, catalog_brands, estimate_rolling_cost, filter_products, AddOutcome,
    CalculatorError, CompareList, CostBreakdown, FeeComponent, FilterCriteria, LoadOutcome,
    LoanSchedule, LoanTerms,
};
use xetai_infra::catalog_loader::Catalog;
use xetai_types::{BlogCategory, BlogPost, Error, Product};

use crate::config::Config;
use crate::constants::LATEST_POSTS_LIMIT;
use crate::repository::{open_catalog, open_compare_storage};

/// Errors specific to the catalog service
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Product {0} has no listed price")]
    NoPrice(String),

    #[error(transparent)]
    Calculator(#[from] CalculatorError),
}

impl From<CatalogServiceError> for Error {
    fn from(err: CatalogServiceError) -> Self {
        match err {
            CatalogServiceError::ProductNotFound(id) => Error::NotFound(id),
            other => Error::Calculation(other.to_string()),
        }
    }
}

/// A post with its related and recommended reading
#[derive(Debug)]
pub struct PostView<'a> {
    pub post: &'a BlogPost,
    pub related: Vec<&'a BlogPost>,
    pub recommended: Vec<&'a BlogPost>,
}

pub struct CatalogService {
    catalog: Catalog,
    compare: CompareList,
    fees: Vec<FeeComponent>,
}

impl CatalogService {
    /// Build the service from configuration
    pub fn open(config: &Config) -> Result<Self, Error> {
        let catalog = open_catalog(config)?;
        let storage = open_compare_storage(config);
        Ok(Self::new(catalog, storage, config.fees()))
    }

    pub fn new(catalog: Catalog, storage: Rc<dyn CompareStorage>, fees: Vec<FeeComponent>) -> Self {
        let stored = storage.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read compare selection");
            Vec::new()
        });
        let mut compare = CompareList::rehydrate(&stored, &catalog.products);

        // Write back the cleaned selection if stale ids were dropped
        let ids = compare.ids();
        if ids != stored {
            persist(storage.as_ref(), &ids);
        }

        let hook_storage = Rc::clone(&storage);
        compare.set_on_change(move |items| {
            let ids: Vec<String> = items.iter().map(|p| p.id.clone()).collect();
            persist(hook_storage.as_ref(), &ids);
        });

        Self {
            catalog,
            compare,
            fees,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn search(&self, criteria: &FilterCriteria) -> Vec<&Product> {
        filter_products(&self.catalog.products, criteria)
    }

    /// Look up by id or slug; absence is a normal outcome
    pub fn product(&self, key: &str) -> Option<&Product> {
        self.catalog.product_by_id_or_slug(key)
    }

    pub fn brands(&self) -> Vec<String> {
        catalog_brands(&self.catalog.products)
    }

    fn require_product(&self, key: &str) -> Result<&Product, CatalogServiceError> {
        self.product(key)
            .ok_or_else(|| CatalogServiceError::ProductNotFound(key.to_string()))
    }

    pub fn compare_add(&mut self, key: &str) -> Result<AddOutcome, CatalogServiceError> {
        let product = self.require_product(key)?.clone();
        let outcome = self.compare.add(&product);
        tracing::debug!(id = %product.id, ?outcome, "compare add");
        Ok(outcome)
    }

    pub fn compare_remove(&mut self, key: &str) -> bool {
        let id = self
            .product(key)
            .map(|p| p.id.clone())
            .unwrap_or_else(|| key.to_string());
        self.compare.remove(&id)
    }

    pub fn compare_clear(&mut self) {
        self.compare.clear();
    }

    pub fn compare_items(&self) -> &[Product] {
        self.compare.items()
    }

    pub fn is_in_compare(&self, id: &str) -> bool {
        self.compare.contains(id)
    }

    pub fn share_url(&self) -> String {
        self.compare.build_share_url()
    }

    /// Replace the selection from a share URL
    pub fn open_share_url(&mut self, url: &str) -> LoadOutcome {
        let ids = parse_share_url(url);
        let outcome = self.compare.load_from_identifiers(&ids, &self.catalog.products);
        if !outcome.dropped.is_empty() {
            tracing::debug!(dropped = ?outcome.dropped, "share url contained unresolvable ids");
        }
        outcome
    }

    pub fn rolling_cost(&self, key: &str) -> Result<CostBreakdown, CatalogServiceError> {
        let product = self.require_product(key)?;
        if product.price == 0 {
            return Err(CatalogServiceError::NoPrice(product.id.clone()));
        }
        Ok(estimate_rolling_cost(product.price, &self.fees))
    }

    pub fn loan_for_product(
        &self,
        key: &str,
        down_payment_percent: f64,
        annual_rate_percent: f64,
        months: u32,
    ) -> Result<LoanSchedule, CatalogServiceError> {
        let product = self.require_product(key)?;
        if product.price == 0 {
            return Err(CatalogServiceError::NoPrice(product.id.clone()));
        }
        let terms = LoanTerms::from_price(product.price, down_payment_percent, annual_rate_percent, months)?;
        Ok(amortize(&terms)?)
    }

    pub fn loan(
        &self,
        principal: u64,
        annual_rate_percent: f64,
        months: u32,
    ) -> Result<LoanSchedule, CatalogServiceError> {
        Ok(amortize(&LoanTerms::new(principal, annual_rate_percent, months))?)
    }

    /// Posts of a category (newest first), or the latest posts overall
    pub fn blog_posts(&self, category: Option<BlogCategory>) -> Vec<&BlogPost> {
        match category {
            Some(c) => blog::posts_in_category(&self.catalog.posts, c),
            None => blog::latest_posts(&self.catalog.posts, LATEST_POSTS_LIMIT),
        }
    }

    pub fn blog_post(&self, category_slug: &str, slug: &str) -> Option<PostView<'_>> {
        let posts = &self.catalog.posts;
        let post = blog::find_post(posts, category_slug, slug)?;
        Some(PostView {
            post,
            related: blog::related_posts(posts, post, RELATED_POSTS_LIMIT),
            recommended: blog::recommended_posts(posts, post, RECOMMENDED_POSTS_LIMIT),
        })
    }
}

fn persist(storage: &dyn CompareStorage, ids: &[String]) {
    if let Err(e) = storage.save(ids) {
        tracing::warn!(error = %e, "could not persist compare selection");
    }
}
