//! Pharmacat Catalog - indexing and localization of the medicine catalog
//!
//! The storefront's catalog is one hand-maintained JSON document with no
//! fixed schema. This module turns it into flat, language-resolved views.
//!
//! # Architecture
//!
//! ```text
//! medicines.json
//!     │
//!     ▼
//! CatalogSource   ← group containers, image map, translations
//!     │
//!     ▼
//! CatalogIndex    ← items + groups, found at any depth by the classifier
//!     │
//!     ▼
//! Catalog         ← built once, then shared read-only
//!     │
//!     ▼
//! LocalizedItem / LocalizedGroup / Page  ← per-request projections
//! ```

mod classify;
mod index;
mod locale;
mod price;
mod query;
mod source;
mod state;

pub use classify::{is_container, is_item, PRICE_KEYS};
pub use index::{CatalogIndex, DuplicateItem, Group, Item};
pub use locale::{
    pick_description, pick_expiry, pick_name, pick_text, resolve_text, Language,
    DESCRIPTION_FIELDS, EXPIRY_FIELDS, FALLBACK_CHAIN,
};
pub use price::{parse_price, parse_price_value};
pub use query::{CartLine, CartQuote, LocalizedGroup, LocalizedItem, Page};
pub use source::{CatalogSource, ImageMap, TranslationMap};
pub use state::{Catalog, CatalogState, CatalogStats};
