//! Vehicle compare selection
//!
//! Holds up to [`MAX_COMPARE_ITEMS`] products, unique by id, in the order they
//! were added. Persistence is not handled here: callers register an on-change
//! hook that receives the full selection after every effective mutation.

use serde::Serialize;
use std::fmt;
use url::Url;

use xetai_types::Product;

pub const MAX_COMPARE_ITEMS: usize = 3;

/// Base path of the compare page
pub const COMPARE_BASE_PATH: &str = "/so-sanh-xe";

/// Separator between product ids in the share URL segment
pub const SHARE_DELIMITER: &str = "-vs-";

type ChangeHook = Box<dyn FnMut(&[Product])>;

/// Result of [`CompareList::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    Added,
    /// Selection already holds the maximum number of items
    Full,
    AlreadyPresent,
}

impl AddOutcome {
    /// User-facing notification text
    pub fn message(&self) -> String {
        match self {
            AddOutcome::Added => "Đã thêm vào danh sách so sánh.".to_string(),
            AddOutcome::Full => format!(
                "Danh sách so sánh đã đầy. Bạn chỉ có thể so sánh tối đa {} xe cùng lúc.",
                MAX_COMPARE_ITEMS
            ),
            AddOutcome::AlreadyPresent => "Xe này đã có trong danh sách so sánh.".to_string(),
        }
    }
}

/// Result of resolving a list of ids against the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    /// Ids now in the selection, in order
    pub resolved: Vec<String>,
    /// Ids that were unknown, repeated, or beyond capacity
    pub dropped: Vec<String>,
    /// Whether the selection was replaced
    pub replaced: bool,
}

/// Ordered compare selection
#[derive(Default)]
pub struct CompareList {
    items: Vec<Product>,
    on_change: Option<ChangeHook>,
}

impl fmt::Debug for CompareList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompareList")
            .field("ids", &self.ids())
            .field("has_hook", &self.on_change.is_some())
            .finish()
    }
}

impl CompareList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the initial selection from persisted ids. Unknown ids are dropped.
    pub fn rehydrate(ids: &[String], catalog: &[Product]) -> Self {
        let (items, dropped) = resolve(ids, catalog);
        if !dropped.is_empty() {
            tracing::debug!(?dropped, "dropped stale compare ids during rehydrate");
        }
        Self {
            items,
            on_change: None,
        }
    }

    /// Register the hook invoked after every change to the selection
    pub fn set_on_change<F>(&mut self, hook: F)
    where
        F: FnMut(&[Product]) + 'static,
    {
        self.on_change = Some(Box::new(hook));
    }

    fn notify(&mut self) {
        if let Some(hook) = self.on_change.as_mut() {
            hook(&self.items);
        }
    }

    pub fn add(&mut self, product: &Product) -> AddOutcome {
        if self.is_full() {
            return AddOutcome::Full;
        }
        if self.contains(&product.id) {
            return AddOutcome::AlreadyPresent;
        }
        self.items.push(product.clone());
        self.notify();
        AddOutcome::Added
    }

    /// Remove a product; returns false if it was not selected
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.notify();
        }
        removed
    }

    pub fn clear(&mut self) {
        let was_empty = self.items.is_empty();
        self.items.clear();
        if !was_empty {
            self.notify();
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|p| p.id == id)
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|p| p.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_COMPARE_ITEMS
    }

    /// Deep link for the current selection
    pub fn build_share_url(&self) -> String {
        if self.items.is_empty() {
            return COMPARE_BASE_PATH.to_string();
        }
        format!("{}/{}", COMPARE_BASE_PATH, self.ids().join(SHARE_DELIMITER))
    }

    /// Replace the selection with the ids that resolve against the catalog.
    ///
    /// If none resolve the current selection is left untouched.
    pub fn load_from_identifiers(&mut self, ids: &[String], catalog: &[Product]) -> LoadOutcome {
        let (items, dropped) = resolve(ids, catalog);
        if items.is_empty() {
            return LoadOutcome {
                resolved: self.ids(),
                dropped,
                replaced: false,
            };
        }

        let resolved = items.iter().map(|p| p.id.clone()).collect();
        let changed = items
            .iter()
            .map(|p| &p.id)
            .ne(self.items.iter().map(|p| &p.id));
        self.items = items;
        if changed {
            self.notify();
        }
        LoadOutcome {
            resolved,
            dropped,
            replaced: true,
        }
    }
}

/// Whether an id survives a trip through a share URL unchanged.
///
/// Ids are URL-safe slugs (ASCII letters, digits, `-`, `_`, `.`) that neither
/// contain the delimiter nor end with `-vs`, which would merge with it.
pub fn is_shareable_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !id.contains(SHARE_DELIMITER)
        && !id.ends_with(SHARE_DELIMITER.trim_end_matches('-'))
}

/// Extract product ids from a share URL or bare path segment
pub fn parse_share_url(url: &str) -> Vec<String> {
    // Absolute URLs: only the path counts, never the host
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    let path = path.as_str();
    let segment = match path.find(COMPARE_BASE_PATH) {
        Some(pos) => &path[pos + COMPARE_BASE_PATH.len()..],
        None => path,
    };
    segment
        .trim_matches('/')
        .split(SHARE_DELIMITER)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve ids in order, dropping unknown ids, repeats and overflow
fn resolve(ids: &[String], catalog: &[Product]) -> (Vec<Product>, Vec<String>) {
    let mut items: Vec<Product> = Vec::new();
    let mut dropped = Vec::new();
    for id in ids {
        let already = items.iter().any(|p| &p.id == id);
        match catalog.iter().find(|p| &p.id == id) {
            Some(product) if !already && items.len() < MAX_COMPARE_ITEMS => {
                items.push(product.clone())
            }
            _ => dropped.push(id.clone()),
        }
    }
    (items, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use xetai_types::VehicleType;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Xe {}", id),
            slug: id.to_lowercase(),
            brands: vec!["Soosan".to_string()],
            vehicle_type: VehicleType::Truck,
            price: 0,
            price_text: None,
            weight: 5.0,
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
        ["A", "B", "C", "D"].into_iter().map(product).collect()
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_until_full() {
        let catalog = catalog();
        let mut list = CompareList::new();
        for p in &catalog[..3] {
            assert_eq!(list.add(p), AddOutcome::Added);
        }
        assert!(list.is_full());
        assert_eq!(list.add(&catalog[3]), AddOutcome::Full);
        assert_eq!(list.ids(), ids(&["A", "B", "C"]));
    }

    #[test]
    fn test_full_is_reported_before_duplicate() {
        let catalog = catalog();
        let mut list = CompareList::new();
        for p in &catalog[..3] {
            list.add(p);
        }
        assert_eq!(list.add(&catalog[0]), AddOutcome::Full);
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let a = product("A");
        let mut list = CompareList::new();
        assert_eq!(list.add(&a), AddOutcome::Added);
        assert_eq!(list.add(&a), AddOutcome::AlreadyPresent);
        assert_eq!(list.ids(), ids(&["A"]));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut list = CompareList::new();
        list.add(&product("A"));
        assert!(!list.remove("Z"));
        assert!(list.remove("A"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_clear_empties_selection() {
        let catalog = catalog();
        let mut list = CompareList::new();
        list.add(&catalog[0]);
        list.add(&catalog[1]);
        list.clear();
        assert!(list.is_empty());
        for p in &catalog {
            assert!(!list.contains(&p.id));
        }
    }

    #[test]
    fn test_share_url() {
        let mut list = CompareList::new();
        assert_eq!(list.build_share_url(), "/so-sanh-xe");
        list.add(&product("A"));
        list.add(&product("B"));
        assert_eq!(list.build_share_url(), "/so-sanh-xe/A-vs-B");
    }

    #[test]
    fn test_share_url_round_trip() {
        let catalog = catalog();
        let mut list = CompareList::new();
        list.add(&catalog[2]);
        list.add(&catalog[0]);
        let url = list.build_share_url();

        let mut other = CompareList::new();
        let outcome = other.load_from_identifiers(&parse_share_url(&url), &catalog);
        assert!(outcome.replaced);
        assert_eq!(other.ids(), list.ids());
    }

    #[test]
    fn test_parse_share_url_variants() {
        assert_eq!(parse_share_url("https://example.vn/so-sanh-xe/A-vs-B?x=1"), ids(&["A", "B"]));
        assert_eq!(parse_share_url("A-vs-B"), ids(&["A", "B"]));
        assert!(parse_share_url("/so-sanh-xe").is_empty());
        assert!(parse_share_url("/so-sanh-xe/").is_empty());
    }

    #[test]
    fn test_parse_share_url_ignores_host() {
        assert_eq!(
            parse_share_url("https://so-sanh-xe.vn/so-sanh-xe/A-vs-B#top"),
            ids(&["A", "B"])
        );
        assert_eq!(parse_share_url("https://so-sanh-xe.vn/"), Vec::<String>::new());
    }

    #[test]
    fn test_shareable_ids() {
        assert!(is_shareable_id("hino-fg8jp7a-thung-mui-bat"));
        assert!(is_shareable_id("vs-first"));
        assert!(!is_shareable_id(""));
        assert!(!is_shareable_id("hino-vs-isuzu"));
        assert!(!is_shareable_id("hino-vs"));
        assert!(!is_shareable_id("a/b"));
        assert!(!is_shareable_id("a?b"));
        assert!(!is_shareable_id("a#b"));
        assert!(!is_shareable_id("xe tải"));
    }

    #[test]
    fn test_round_trip_with_delimiter_like_ids() {
        let catalog = vec![product("vs-a"), product("b-"), product("-c")];
        let mut list = CompareList::new();
        for p in &catalog {
            assert!(is_shareable_id(&p.id));
            list.add(p);
        }

        let mut other = CompareList::new();
        other.load_from_identifiers(&parse_share_url(&list.build_share_url()), &catalog);
        assert_eq!(other.ids(), list.ids());
    }

    #[test]
    fn test_load_drops_unknown_and_repeats() {
        let catalog = catalog();
        let mut list = CompareList::new();
        let outcome = list.load_from_identifiers(&ids(&["A", "X", "A", "B", "C", "D"]), &catalog);
        assert_eq!(list.ids(), ids(&["A", "B", "C"]));
        assert_eq!(outcome.dropped, ids(&["X", "A", "D"]));
    }

    #[test]
    fn test_load_with_nothing_resolved_keeps_selection() {
        let catalog = catalog();
        let mut list = CompareList::new();
        list.add(&catalog[1]);
        let outcome = list.load_from_identifiers(&ids(&["X", "Y"]), &catalog);
        assert!(!outcome.replaced);
        assert_eq!(list.ids(), ids(&["B"]));
    }

    #[test]
    fn test_hook_fires_only_on_change() {
        let calls: Rc<RefCell<Vec<Vec<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        let mut list = CompareList::new();
        list.set_on_change(move |items| {
            seen.borrow_mut()
                .push(items.iter().map(|p| p.id.clone()).collect());
        });

        let a = product("A");
        list.add(&a);
        list.add(&a);
        list.remove("missing");
        list.clear();
        list.clear();

        assert_eq!(*calls.borrow(), vec![ids(&["A"]), Vec::<String>::new()]);
    }

    #[test]
    fn test_full_add_does_not_fire_hook() {
        let catalog = catalog();
        let mut list = CompareList::new();
        for p in &catalog[..3] {
            list.add(p);
        }

        let fired = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&fired);
        list.set_on_change(move |_| *counter.borrow_mut() += 1);

        assert_eq!(list.add(&catalog[3]), AddOutcome::Full);
        assert_eq!(*fired.borrow(), 0);
        assert_eq!(list.ids(), ids(&["A", "B", "C"]));
    }

    #[test]
    fn test_rehydrate_drops_stale_ids() {
        let catalog = catalog();
        let list = CompareList::rehydrate(&ids(&["B", "gone", "A"]), &catalog);
        assert_eq!(list.ids(), ids(&["B", "A"]));
    }
}
