//! Catalog configuration
//!
//! Describes where the catalog document lives and which top-level keys of
//! that document hold group containers, images and UI translations. The
//! defaults match the storefront's `medicines.json` layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::Language;
use crate::error::{CatalogError, Result};

/// Environment variable that overrides the catalog source path
pub const SOURCE_ENV_VAR: &str = "PHARMACAT_CATALOG";

/// Default catalog document file name
pub const DEFAULT_SOURCE: &str = "medicines.json";

/// Groups shown per listing page
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// Maximum number of items returned by a search
pub const DEFAULT_SEARCH_LIMIT: usize = 30;

/// Top-level group-container keys of the storefront document
pub const DEFAULT_GROUP_CONTAINERS: &[&str] = &[
    "medicine_groups",
    "faroxy_groups",
    "tramadol_groups",
    "methadone_groups",
    "methylphenidate_groups",
    "phyto_groups",
    "seretide_groups",
    "modafinil_groups",
    "monjaro_groups",
    "insuline_groups",
    "soma_groups",
    "biobepa_groups",
    "warfarine_groups",
    "gardasil_groups",
    "rogam_groups",
    "Aminoven_groups",
    "Nexium_groups",
    "Exelon_groups",
    "testestron_groups",
    "zithromax_groups",
    "Liskantin_groups",
    "chimi_groups",
];

/// Catalog configuration (catalog.yaml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CatalogConfig {
    /// Path to the catalog JSON document
    pub source: PathBuf,

    /// Top-level keys whose values map sub-group key to sub-group node
    pub group_containers: Vec<String>,

    /// Keys tried in order for the item id to image path facet
    pub image_keys: Vec<String>,

    /// Key of the UI translations facet
    pub translations_key: String,

    /// Groups per listing page
    pub page_size: usize,

    /// Maximum search results
    pub search_limit: usize,

    /// Language used when the caller has no preference
    pub default_language: Language,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            group_containers: DEFAULT_GROUP_CONTAINERS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            image_keys: vec!["medicine_images".to_string(), "images".to_string()],
            translations_key: "translations".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            search_limit: DEFAULT_SEARCH_LIMIT,
            default_language: Language::Fa,
        }
    }
}

impl CatalogConfig {
    /// Default configuration pointing at a specific document
    pub fn with_source(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(content)
    }

    /// Load configuration from a YAML file
    ///
    /// A missing file is not an error: the defaults are returned instead.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No catalog config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = Self::from_yaml(&content).map_err(|e| CatalogError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate(path)?;

        debug!("Loaded catalog config from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides (`PHARMACAT_CATALOG`)
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(source) = std::env::var_os(SOURCE_ENV_VAR).filter(|v| !v.is_empty()) {
            debug!("Catalog source overridden by {}", SOURCE_ENV_VAR);
            self.source = PathBuf::from(source);
        }
        self
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.page_size == 0 {
            return Err(CatalogError::Config {
                path: path.to_path_buf(),
                reason: "page_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
