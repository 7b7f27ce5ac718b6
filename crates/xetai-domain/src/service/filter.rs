//! Catalog filter engine
//!
//! Applies a conjunction of optional criteria to the in-memory product list.
//! Output keeps catalog order; absent criteria impose no constraint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::form_urlencoded;

use xetai_types::Product;

/// Optional filter criteria, reconstructed from catalog query parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact vehicle type tag (e.g. "xe-tai")
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub min_weight: Option<f64>,
    #[serde(default)]
    pub max_weight: Option<f64>,
    /// Free-text query
    #[serde(default)]
    pub search: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, vehicle_type: impl Into<String>) -> Self {
        self.vehicle_type = Some(vehicle_type.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_weight_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_weight = min;
        self.max_weight = max;
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Criteria for one of the preset weight bands
    pub fn for_weight_category(id: u8) -> Option<Self> {
        WEIGHT_CATEGORIES
            .iter()
            .find(|c| c.id == id)
            .map(|c| Self::new().with_weight_range(Some(c.min_weight), Some(c.max_weight)))
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.vehicle_type.is_none()
            && self.brand.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_weight.is_none()
            && self.max_weight.is_none()
            && self.search.is_none()
    }

    /// Negative bounds or min > max. Applied literally, usually matching nothing.
    pub fn has_inverted_bounds(&self) -> bool {
        fn bad(min: Option<f64>, max: Option<f64>) -> bool {
            let negative = min.is_some_and(|v| v < 0.0) || max.is_some_and(|v| v < 0.0);
            let inverted = matches!((min, max), (Some(lo), Some(hi)) if lo > hi);
            negative || inverted
        }
        bad(self.min_price, self.max_price) || bad(self.min_weight, self.max_weight)
    }

    /// Parse catalog query parameters (`type`, `brand`, `minPrice`, `maxPrice`,
    /// `minWeight`, `maxWeight`, `q`). Empty and unparseable values are ignored.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let params: BTreeMap<String, String> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();

        let text = |key: &str| params.get(key).map(|v| v.trim().to_string());
        let number = |key: &str| params.get(key).and_then(|v| v.trim().parse::<f64>().ok());

        Self {
            vehicle_type: text("type"),
            brand: text("brand"),
            min_price: number("minPrice"),
            max_price: number("maxPrice"),
            min_weight: number("minWeight"),
            max_weight: number("maxWeight"),
            search: text("q"),
        }
    }

    /// Serialize present criteria back to a query string (without leading `?`)
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(ref vehicle_type) = self.vehicle_type {
            serializer.append_pair("type", vehicle_type);
        }
        if let Some(ref brand) = self.brand {
            serializer.append_pair("brand", brand);
        }
        let numbers = [
            ("minPrice", self.min_price),
            ("maxPrice", self.max_price),
            ("minWeight", self.min_weight),
            ("maxWeight", self.max_weight),
        ];
        for (key, value) in numbers {
            if let Some(v) = value {
                serializer.append_pair(key, &v.to_string());
            }
        }
        if let Some(ref search) = self.search {
            serializer.append_pair("q", search);
        }
        serializer.finish()
    }

    /// Whether a single product satisfies every present criterion
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_type(product)
            && self.matches_brand(product)
            && in_range(product.price as f64, self.min_price, self.max_price)
            && in_range(product.weight, self.min_weight, self.max_weight)
            && self.matches_search(product)
    }

    fn matches_type(&self, product: &Product) -> bool {
        match &self.vehicle_type {
            Some(t) => product.vehicle_type.slug() == t,
            None => true,
        }
    }

    fn matches_brand(&self, product: &Product) -> bool {
        match &self.brand {
            Some(brand) => {
                let needle = brand.to_lowercase();
                product
                    .brands
                    .iter()
                    .any(|b| b.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }

    fn matches_search(&self, product: &Product) -> bool {
        let Some(ref query) = self.search else {
            return true;
        };
        let needle = query.to_lowercase();
        product.name.to_lowercase().contains(&needle)
            || product
                .brands
                .iter()
                .any(|b| b.to_lowercase().contains(&needle))
            || product.description.to_lowercase().contains(&needle)
            || product.weight_label().to_lowercase().contains(&needle)
    }
}

fn in_range(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |lo| value >= lo) && max.map_or(true, |hi| value <= hi)
}

/// Filter products, preserving catalog order
pub fn filter_products<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    if criteria.has_inverted_bounds() {
        tracing::debug!(?criteria, "filter bounds are negative or inverted; applying literally");
    }
    products.iter().filter(|p| criteria.matches(p)).collect()
}

/// Named payload band used by the home page shortcuts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightCategory {
    pub id: u8,
    pub name: &'static str,
    pub min_weight: f64,
    pub max_weight: f64,
}

pub const WEIGHT_CATEGORIES: [WeightCategory; 8] = [
    WeightCategory { id: 1, name: "Dưới 1 tấn", min_weight: 0.0, max_weight: 1.0 },
    WeightCategory { id: 2, name: "1 - 2 tấn", min_weight: 1.0, max_weight: 2.0 },
    WeightCategory { id: 3, name: "2 - 3.5 tấn", min_weight: 2.0, max_weight: 3.5 },
    WeightCategory { id: 4, name: "3.5 - 5 tấn", min_weight: 3.5, max_weight: 5.0 },
    WeightCategory { id: 5, name: "5 - 8 tấn", min_weight: 5.0, max_weight: 8.0 },
    WeightCategory { id: 6, name: "8 - 15 tấn", min_weight: 8.0, max_weight: 15.0 },
    WeightCategory { id: 7, name: "15 - 20 tấn", min_weight: 15.0, max_weight: 20.0 },
    WeightCategory { id: 8, name: "Trên 20 tấn", min_weight: 20.0, max_weight: 100.0 },
];

const CANONICAL_BRANDS: &[(&str, &str)] = &[
    ("hyundai", "Hyundai"),
    ("isuzu", "Isuzu"),
    ("hino", "Hino"),
    ("dongfeng", "Dongfeng"),
    ("thaco", "Thaco"),
    ("kia", "Kia"),
    ("suzuki", "Suzuki"),
    ("veam", "VEAM"),
    ("soosan", "Soosan"),
    ("doosung", "DOOSUNG"),
    ("cimc", "CIMC"),
    ("koksan", "KOKSAN"),
    ("howo", "HOWO"),
    ("jac", "JAC"),
    ("daewoo", "Daewoo"),
    ("foton", "Foton"),
    ("iveco", "Iveco"),
    ("mercedes-benz", "Mercedes-Benz"),
    ("volvo", "Volvo"),
    ("scania", "Scania"),
    ("man", "MAN"),
    ("fuso", "Fuso"),
];

fn canonical_brand(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    CANONICAL_BRANDS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| raw.trim().to_string())
}

/// Distinct brand names across the catalog, canonicalized and sorted
pub fn catalog_brands(products: &[Product]) -> Vec<String> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for brand in products.iter().flat_map(|p| p.brands.iter()) {
        let key = brand.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        seen.entry(key).or_insert_with(|| canonical_brand(brand));
    }
    let mut names: Vec<String> = seen.into_values().collect();
    names.sort_by_key(|n| n.to_lowercase());
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use xetai_types::VehicleType;

    fn product(id: &str, vehicle_type: VehicleType, weight: f64, price: u64, brands: &[&str]) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Xe {}", id),
            slug: id.to_lowercase(),
            brands: brands.iter().map(|b| b.to_string()).collect(),
            vehicle_type,
            price,
            price_text: None,
            weight,
            weight_text: None,
            dimensions: None,
            description: String::new(),
            images: Vec::new(),
            is_new: false,
            is_hot: false,
            specs: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("A", VehicleType::Truck, 5.0, 600_000_000, &["Hyundai"]),
            product("B", VehicleType::Crane, 12.0, 1_800_000_000, &["Soosan"]),
            product("C", VehicleType::Truck, 1.5, 350_000_000, &["Isuzu", "VM"]),
            product("D", VehicleType::SemiTrailer, 32.0, 0, &["CIMC"]),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_catalog_in_order() {
        let catalog = catalog();
        let result = filter_products(&catalog, &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_filter_by_type() {
        let catalog = vec![
            product("A", VehicleType::Truck, 5.0, 0, &["Hyundai"]),
            product("B", VehicleType::Crane, 12.0, 0, &["Soosan"]),
        ];
        let result = filter_products(&catalog, &FilterCriteria::new().with_type("xe-tai"));
        assert_eq!(ids(&result), vec!["A"]);
    }

    #[test]
    fn test_unmatched_type_returns_empty() {
        let catalog = catalog();
        let result = filter_products(&catalog, &FilterCriteria::new().with_type("xe-khach"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_brand_is_case_insensitive_substring_over_all_tags() {
        let catalog = catalog();
        let result = filter_products(&catalog, &FilterCriteria::new().with_brand("vm"));
        assert_eq!(ids(&result), vec!["C"]);
        let result = filter_products(&catalog, &FilterCriteria::new().with_brand("HYUN"));
        assert_eq!(ids(&result), vec!["A"]);
    }

    #[test]
    fn test_bounds_are_inclusive_and_independent() {
        let catalog = catalog();
        let criteria = FilterCriteria::new().with_weight_range(Some(5.0), Some(12.0));
        assert_eq!(ids(&filter_products(&catalog, &criteria)), vec!["A", "B"]);

        let criteria = FilterCriteria::new().with_price_range(None, Some(600_000_000.0));
        assert_eq!(ids(&filter_products(&catalog, &criteria)), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_inverted_bounds_applied_literally() {
        let catalog = catalog();
        let criteria = FilterCriteria::new().with_weight_range(Some(10.0), Some(2.0));
        assert!(criteria.has_inverted_bounds());
        assert!(filter_products(&catalog, &criteria).is_empty());
    }

    #[test]
    fn test_search_matches_weight_label() {
        let catalog = catalog();
        let result = filter_products(&catalog, &FilterCriteria::new().with_search("1.5 tấn"));
        assert_eq!(ids(&result), vec!["C"]);
    }

    #[test]
    fn test_search_matches_name_or_brand() {
        let catalog = catalog();
        let result = filter_products(&catalog, &FilterCriteria::new().with_search("cimc"));
        assert_eq!(ids(&result), vec!["D"]);
        let result = filter_products(&catalog, &FilterCriteria::new().with_search("XE B"));
        assert_eq!(ids(&result), vec!["B"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = catalog();
        let criteria = FilterCriteria::new().with_type("xe-tai").with_search("xe");
        let once: Vec<Product> = filter_products(&catalog, &criteria).into_iter().cloned().collect();
        let twice = filter_products(&once, &criteria);
        assert_eq!(ids(&twice), once.iter().map(|p| p.id.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn test_query_round_trip() {
        let criteria = FilterCriteria::from_query("?brand=Hino&minWeight=3.5&maxWeight=5&type=xe-tai&q=th%C3%B9ng+k%C3%ADn");
        assert_eq!(criteria.brand.as_deref(), Some("Hino"));
        assert_eq!(criteria.min_weight, Some(3.5));
        assert_eq!(criteria.max_weight, Some(5.0));
        assert_eq!(criteria.vehicle_type.as_deref(), Some("xe-tai"));
        assert_eq!(criteria.search.as_deref(), Some("thùng kín"));
        assert_eq!(FilterCriteria::from_query(&criteria.to_query()), criteria);
    }

    #[test]
    fn test_query_key_order() {
        let criteria = FilterCriteria::new()
            .with_search("ben")
            .with_weight_range(Some(3.5), Some(5.0))
            .with_brand("Hino")
            .with_type("xe-tai");
        assert_eq!(
            criteria.to_query(),
            "type=xe-tai&brand=Hino&minWeight=3.5&maxWeight=5&q=ben"
        );
    }

    #[test]
    fn test_query_ignores_garbage_numbers() {
        let criteria = FilterCriteria::from_query("minPrice=abc&maxPrice=&q=");
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_weight_category_preset() {
        let criteria = FilterCriteria::for_weight_category(4).unwrap();
        assert_eq!(criteria.min_weight, Some(3.5));
        assert_eq!(criteria.max_weight, Some(5.0));
        assert!(FilterCriteria::for_weight_category(99).is_none());
    }

    #[test]
    fn test_catalog_brands_canonical_and_distinct() {
        let catalog = vec![
            product("A", VehicleType::Truck, 1.0, 0, &["hino"]),
            product("B", VehicleType::Truck, 1.0, 0, &["HINO", "veam"]),
            product("C", VehicleType::Truck, 1.0, 0, &["Tera"]),
        ];
        assert_eq!(catalog_brands(&catalog), vec!["Hino", "Tera", "VEAM"]);
    }
}
