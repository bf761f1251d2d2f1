//! Pharmacat core library exports

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{Catalog, Language, LocalizedGroup, LocalizedItem};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
