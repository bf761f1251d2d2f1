//! Catalog queries
//!
//! Read-only operations over a loaded [`CatalogState`]. Every result is a
//! localized projection; nothing here fails. Unknown ids resolve to `None`
//! and defective fields resolve to defaults.

use serde::Serialize;
use std::cmp::Ordering;

use super::index::{Group, Item};
use super::locale::{pick_description, pick_expiry, pick_name, Language};
use super::price::parse_price;
use super::state::CatalogState;

/// An item resolved for one language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedItem {
    pub id: String,
    pub group_key: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub expiry: String,
    pub image: Option<String>,
}

/// A group and its items resolved for one language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedGroup {
    pub key: String,
    pub name: String,
    pub variants: Vec<LocalizedItem>,
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// 1-based page number actually served
    pub number: usize,

    pub num_pages: usize,

    /// Number of entries across all pages
    pub total: usize,
}

/// A priced cart line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub item: LocalizedItem,
    pub quantity: u32,
    pub subtotal: f64,
}

/// A cart priced against the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartQuote {
    pub lines: Vec<CartLine>,
    pub total: f64,
}

impl<T> Page<T> {
    /// Slice `entries` into the requested page
    ///
    /// Out-of-range page numbers clamp to the first or last page. An empty
    /// input still yields a single, empty page.
    pub fn paginate(entries: Vec<T>, page_size: usize, page_number: usize) -> Self {
        let page_size = page_size.max(1);
        let total = entries.len();
        let num_pages = total.div_ceil(page_size).max(1);
        let number = page_number.clamp(1, num_pages);

        let items = entries
            .into_iter()
            .skip((number - 1) * page_size)
            .take(page_size)
            .collect();

        Self {
            items,
            number,
            num_pages,
            total,
        }
    }

    /// Parse a raw page parameter; absent or non-numeric values mean page 1
    pub fn parse_number(raw: Option<&str>) -> usize {
        raw.and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .max(1)
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Lowercased, trimmed query; `None` when blank
fn normalize_query(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| query.to_lowercase())
}

fn matches_query(item: &LocalizedItem, query: &str) -> bool {
    item.name.to_lowercase().contains(query)
        || item.description.to_lowercase().contains(query)
        || item.id.to_lowercase().contains(query)
}

/// Case-insensitive name first, then price
fn variant_order(a: &LocalizedItem, b: &LocalizedItem) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.price.total_cmp(&b.price))
}

impl CatalogState {
    fn localize_item(&self, item: &Item, lang: Option<Language>) -> LocalizedItem {
        let raw = &item.raw;
        let image = self
            .images
            .get(&item.id)
            .cloned()
            .or_else(|| raw.get("image").and_then(|v| v.as_str()).map(str::to_string));

        LocalizedItem {
            id: item.id.clone(),
            group_key: item.group_key.clone(),
            name: pick_name(raw, lang, &item.id),
            description: pick_description(raw, lang),
            price: parse_price(raw),
            expiry: pick_expiry(raw),
            image,
        }
    }

    fn localize_group(&self, group: &Group, lang: Option<Language>) -> LocalizedGroup {
        let mut variants: Vec<LocalizedItem> = group
            .items
            .iter()
            .filter_map(|id| self.index.item(id))
            .map(|item| self.localize_item(item, lang))
            .collect();
        variants.sort_by(variant_order);

        LocalizedGroup {
            key: group.key.clone(),
            name: pick_name(&group.raw, lang, &group.key),
            variants,
        }
    }

    pub fn contains_item(&self, id: &str) -> bool {
        self.index.item(id).is_some()
    }

    pub fn get_item(&self, id: &str, lang: Option<Language>) -> Option<LocalizedItem> {
        self.index.item(id).map(|item| self.localize_item(item, lang))
    }

    /// A group with its variants sorted by (lowercased name, price)
    pub fn get_group(&self, key: &str, lang: Option<Language>) -> Option<LocalizedGroup> {
        self.index
            .group(key)
            .map(|group| self.localize_group(group, lang))
    }

    /// All non-empty groups ordered by localized name
    ///
    /// With a query, only variants whose name, description or id contain it
    /// (case-insensitively) are kept, and groups left empty are dropped.
    pub fn list_groups(&self, lang: Option<Language>, query: Option<&str>) -> Vec<LocalizedGroup> {
        let query = query.and_then(normalize_query);

        let mut groups: Vec<LocalizedGroup> = self
            .index
            .groups()
            .map(|group| self.localize_group(group, lang))
            .filter_map(|mut group| {
                if let Some(q) = &query {
                    group.variants.retain(|v| matches_query(v, q));
                }
                (!group.variants.is_empty()).then_some(group)
            })
            .collect();

        groups.sort_by(|a, b| a.name.cmp(&b.name));
        groups
    }

    /// Items matching `query`, in index order, at most `limit` of them
    pub fn search_items(
        &self,
        query: &str,
        lang: Option<Language>,
        limit: usize,
    ) -> Vec<LocalizedItem> {
        let Some(query) = normalize_query(query) else {
            return Vec::new();
        };

        self.index
            .items()
            .map(|item| self.localize_item(item, lang))
            .filter(|item| matches_query(item, &query))
            .take(limit)
            .collect()
    }

    /// UI string for `key`, or the key itself when untranslated
    pub fn translate(&self, key: &str, lang: Option<Language>) -> String {
        lang.and_then(|l| self.translations.get(key)?.get(l.code()))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Price cart lines; unknown ids and zero quantities are skipped
    pub fn quote_cart<I, S>(&self, lines: I, lang: Option<Language>) -> CartQuote
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let lines: Vec<CartLine> = lines
            .into_iter()
            .filter(|(_, quantity)| *quantity > 0)
            .filter_map(|(id, quantity)| {
                let item = self.get_item(id.as_ref(), lang)?;
                let subtotal = item.price * f64::from(quantity);
                Some(CartLine {
                    item,
                    quantity,
                    subtotal,
                })
            })
            .collect();

        let total = lines.iter().map(|line| line.subtotal).sum();
        CartQuote { lines, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::source::CatalogSource;
    use crate::config::CatalogConfig;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::path::Path;

    fn state(doc: Value) -> CatalogState {
        let source =
            CatalogSource::from_document(doc, Path::new("test.json"), &CatalogConfig::default())
                .unwrap();
        CatalogState::from_source(source)
    }

    fn sample() -> CatalogState {
        state(json!({
            "medicine_groups": {
                "pain": {
                    "name_en": "Pain Relief",
                    "name_fa": "مسکن",
                    "variants": {
                        "asp1": {
                            "name_en": "Aspirin",
                            "name_fa": "آسپرین",
                            "description_en": "Headache tablets",
                            "price": "10",
                            "exp": "2026-05"
                        },
                        "ibu1": {"name_en": "Ibuprofen", "price": "7.5 USD", "image": "img/ibu.png"}
                    }
                },
                "cold": {
                    "name_en": "Cold & Flu",
                    "variants": {"syr1": {"name_en": "Cough Syrup", "usd": 4, "desc_en": "aspirated"}}
                },
                "empty": {"name_en": "Empty"}
            },
            "medicine_images": {"asp1": "img/asp1.png"},
            "translations": {"cart": {"en": "Cart", "fa": "سبد خرید"}}
        }))
    }

    fn names(items: &[LocalizedItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_get_item_localized() {
        let catalog = sample();
        let item = catalog.get_item("asp1", Some(Language::Fa)).unwrap();
        assert_eq!(
            item,
            LocalizedItem {
                id: "asp1".to_string(),
                group_key: "pain".to_string(),
                name: "آسپرین".to_string(),
                description: "Headache tablets".to_string(),
                price: 10.0,
                expiry: "2026-05".to_string(),
                image: Some("img/asp1.png".to_string()),
            }
        );
    }

    #[test]
    fn test_get_item_image_falls_back_to_raw() {
        let item = sample().get_item("ibu1", Some(Language::En)).unwrap();
        assert_eq!(item.image.as_deref(), Some("img/ibu.png"));
        assert_eq!(item.price, 7.5);
        assert_eq!(item.expiry, "");
    }

    #[test]
    fn test_unknown_id_and_group() {
        let catalog = sample();
        assert!(catalog.get_item("nonexistent", Some(Language::En)).is_none());
        assert!(catalog.get_group("nonexistent", Some(Language::En)).is_none());
        assert!(!catalog.contains_item("nonexistent"));
    }

    #[test]
    fn test_group_variant_sort() {
        let catalog = state(json!({
            "medicine_groups": {
                "g": {"variants": {
                    "x": {"name_en": "B", "price": 5},
                    "y": {"name_en": "a", "price": 10},
                    "z": {"name_en": "a", "price": 2}
                }}
            }
        }));

        let group = catalog.get_group("g", Some(Language::En)).unwrap();
        let order: Vec<(&str, f64)> = group
            .variants
            .iter()
            .map(|v| (v.name.as_str(), v.price))
            .collect();
        assert_eq!(order, vec![("a", 2.0), ("a", 10.0), ("B", 5.0)]);
        assert_eq!(group.name, "g");
    }

    #[test]
    fn test_empty_group_addressable_but_not_listed() {
        let catalog = sample();
        let group = catalog.get_group("empty", Some(Language::En)).unwrap();
        assert!(group.variants.is_empty());

        let listed: Vec<_> = catalog
            .list_groups(Some(Language::En), None)
            .into_iter()
            .map(|g| g.key)
            .collect();
        assert_eq!(listed, vec!["cold", "pain"]);
    }

    #[test]
    fn test_list_groups_with_query() {
        let catalog = sample();

        // matches the name of asp1 and the description of syr1
        let groups = catalog.list_groups(Some(Language::En), Some("  ASP "));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Cold & Flu");
        assert_eq!(names(&groups[1].variants), vec!["Aspirin"]);

        // id match
        let groups = catalog.list_groups(Some(Language::En), Some("ibu1"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "pain");

        assert!(catalog.list_groups(Some(Language::En), Some("zzz")).is_empty());

        // a blank query filters nothing
        assert_eq!(catalog.list_groups(Some(Language::En), Some("   ")).len(), 2);
    }

    #[test]
    fn test_search_items() {
        let catalog = sample();

        let results = catalog.search_items("ASP", Some(Language::En), 30);
        assert_eq!(names(&results), vec!["Aspirin", "Cough Syrup"]);

        let results = catalog.search_items("asp", Some(Language::En), 1);
        assert_eq!(names(&results), vec!["Aspirin"]);

        assert!(catalog.search_items("   ", Some(Language::En), 30).is_empty());
    }

    #[test]
    fn test_search_keeps_index_order() {
        let catalog = state(json!({
            "medicine_groups": {"g": {"variants": {
                "c": {"name_en": "Zinc", "price": 1},
                "a": {"name_en": "Amoxicillin", "price": 1}
            }}}
        }));
        let results = catalog.search_items("i", Some(Language::En), 30);
        assert_eq!(names(&results), vec!["Zinc", "Amoxicillin"]);
    }

    #[test]
    fn test_paginate_bounds() {
        let groups: Vec<u32> = (1..=9).collect();

        let page = Page::paginate(groups.clone(), 4, 3);
        assert_eq!(page.items, vec![9]);
        assert_eq!(page.num_pages, 3);
        assert!(!page.has_next());
        assert!(page.has_previous());

        let page = Page::paginate(groups.clone(), 4, 100);
        assert_eq!(page.number, 3);
        assert_eq!(page.items, vec![9]);

        let page = Page::paginate(groups, 4, 0);
        assert_eq!(page.number, 1);
        assert_eq!(page.items, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_paginate_empty() {
        let page: Page<u32> = Page::paginate(Vec::new(), 4, 2);
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_parse_page_number() {
        assert_eq!(Page::<u32>::parse_number(None), 1);
        assert_eq!(Page::<u32>::parse_number(Some("abc")), 1);
        assert_eq!(Page::<u32>::parse_number(Some("-2")), 1);
        assert_eq!(Page::<u32>::parse_number(Some(" 3 ")), 3);
    }

    #[test]
    fn test_translate() {
        let catalog = sample();
        assert_eq!(catalog.translate("cart", Some(Language::Fa)), "سبد خرید");
        assert_eq!(catalog.translate("cart", Some(Language::Tr)), "cart");
        assert_eq!(catalog.translate("welcome", Some(Language::En)), "welcome");
        assert_eq!(catalog.translate("cart", None), "cart");
    }

    #[test]
    fn test_quote_cart() {
        let catalog = sample();
        let quote = catalog.quote_cart(
            [("asp1", 2), ("missing", 5), ("ibu1", 1), ("syr1", 0)],
            Some(Language::En),
        );

        let lines: Vec<(&str, u32, f64)> = quote
            .lines
            .iter()
            .map(|l| (l.item.id.as_str(), l.quantity, l.subtotal))
            .collect();
        assert_eq!(lines, vec![("asp1", 2, 20.0), ("ibu1", 1, 7.5)]);
        assert_eq!(quote.total, 27.5);
    }
}
