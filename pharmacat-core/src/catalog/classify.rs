//! Item classification
//!
//! The catalog document has no schema. A mapping is a sellable item when it
//! carries a price-bearing key; every other mapping is a container.

use serde_json::Value;

/// Price-bearing keys, in the priority order used by the price parser
pub const PRICE_KEYS: [&str; 5] = ["price", "price_usd", "usd", "Price", "PRICE"];

/// Whether `node` is a sellable item
pub fn is_item(node: &Value) -> bool {
    match node {
        Value::Object(map) => PRICE_KEYS.iter().any(|key| map.contains_key(*key)),
        _ => false,
    }
}

/// Whether `node` is a mapping that should be walked for nested items
pub fn is_container(node: &Value) -> bool {
    node.is_object() && !is_item(node)
}
