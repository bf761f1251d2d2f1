//! Item and group indices
//!
//! Flattens the group containers of a [`CatalogSource`] into two
//! insertion-ordered indices. Items may sit under a sub-group's `variants`
//! mapping or at any depth below it; the classifier decides which mappings
//! are items and which are walked further.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

use super::classify::{is_container, is_item};
use super::locale::pick_name;
use super::source::CatalogSource;

/// A sellable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    /// Key under which the item was found in its parent mapping
    pub id: String,

    /// Key of the enclosing sub-group
    pub group_key: String,

    /// The item node, verbatim
    pub raw: Value,
}

/// A named collection of items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub key: String,

    /// Display name resolved without a requested language
    pub name: String,

    /// The sub-group node, used to resolve localized names
    pub raw: Value,

    /// Ids of the items whose `group_key` is this group, in index order
    pub items: Vec<String>,
}

/// An item id seen more than once during the walk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateItem {
    pub id: String,

    /// Group of the entry that was replaced
    pub replaced_group: String,

    /// Group of the entry that was kept
    pub group: String,
}

/// The flattened catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogIndex {
    items: IndexMap<String, Item>,
    groups: IndexMap<String, Group>,
    duplicates: Vec<DuplicateItem>,
}

impl CatalogIndex {
    /// Build both indices from a loaded source
    pub fn build(source: &CatalogSource) -> Self {
        let mut index = Self::default();

        for (container_key, groups) in &source.containers {
            debug!("Indexing container {}", container_key);
            for (group_key, group) in groups {
                if !group.is_object() {
                    trace!("Skipping {}/{}: not a mapping", container_key, group_key);
                    continue;
                }
                index.register_group(group_key, group);
                index.collect_group_items(group_key, group);
            }
        }

        index.link_members();
        index
    }

    fn register_group(&mut self, key: &str, raw: &Value) {
        let group = Group {
            key: key.to_string(),
            name: pick_name(raw, None, key),
            raw: raw.clone(),
            items: Vec::new(),
        };
        if self.groups.insert(key.to_string(), group).is_some() {
            warn!("Group key {} defined more than once; keeping the last", key);
        }
    }

    fn collect_group_items(&mut self, group_key: &str, group: &Value) {
        match group.get("variants") {
            Some(Value::Object(variants)) => {
                for (id, variant) in variants {
                    if is_item(variant) {
                        self.register_item(id, group_key, variant);
                    } else {
                        self.collect_nested(group_key, variant);
                    }
                }
            }
            // a priced sub-group is a group, not one of its own items
            _ => self.collect_nested(group_key, group),
        }
    }

    /// Depth-first walk registering every item mapping below `root`
    ///
    /// Does nothing unless `root` is a container.
    fn collect_nested(&mut self, group_key: &str, root: &Value) {
        let Some(root) = root.as_object().filter(|_| is_container(root)) else {
            return;
        };
        let mut visited: HashSet<*const Map<String, Value>> = HashSet::new();
        visited.insert(root as *const _);
        let mut stack = vec![root.iter()];

        while let Some(frame) = stack.last_mut() {
            let next = frame.next();
            let Some((key, child)) = next else {
                stack.pop();
                continue;
            };

            if is_item(child) {
                self.register_item(key, group_key, child);
            } else if let Some(child_map) = child.as_object().filter(|_| is_container(child)) {
                if visited.insert(child_map as *const _) {
                    trace!("Descending into {} under {}", key, group_key);
                    stack.push(child_map.iter());
                }
            }
        }
    }

    fn register_item(&mut self, id: &str, group_key: &str, raw: &Value) {
        let item = Item {
            id: id.to_string(),
            group_key: group_key.to_string(),
            raw: raw.clone(),
        };

        if let Some(replaced) = self.items.insert(id.to_string(), item) {
            warn!(
                "Duplicate item id {} (group {} replaced by {})",
                id, replaced.group_key, group_key
            );
            self.duplicates.push(DuplicateItem {
                id: id.to_string(),
                replaced_group: replaced.group_key,
                group: group_key.to_string(),
            });
        }
    }

    fn link_members(&mut self) {
        for item in self.items.values() {
            if let Some(group) = self.groups.get_mut(&item.group_key) {
                group.items.push(item.id.clone());
            }
        }
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn group(&self, key: &str) -> Option<&Group> {
        self.groups.get(key)
    }

    /// Items in discovery order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Groups in discovery order
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn duplicates(&self) -> &[DuplicateItem] {
        &self.duplicates
    }

    /// Whether both indices hold data
    pub fn is_loaded(&self) -> bool {
        !self.items.is_empty() && !self.groups.is_empty()
    }
}
