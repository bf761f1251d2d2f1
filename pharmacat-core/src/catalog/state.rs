//! Catalog lifecycle
//!
//! A [`Catalog`] starts Unloaded and moves to Loaded on the first call to any
//! of its operations. The transition runs at most once per instance: it sits
//! behind a `OnceCell`, so concurrent first callers wait for a single build.
//! A failed build leaves the catalog Unloaded and the next call retries it.

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

use super::index::CatalogIndex;
use super::locale::Language;
use super::query::{CartQuote, LocalizedGroup, LocalizedItem, Page};
use super::source::{CatalogSource, ImageMap, TranslationMap};
use crate::config::CatalogConfig;
use crate::error::Result;

/// Immutable catalog data, built once from a source document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    pub(crate) index: CatalogIndex,
    pub(crate) images: ImageMap,
    pub(crate) translations: TranslationMap,
}

/// Counts describing a loaded catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub groups: usize,

    /// Groups with at least one item
    pub listed_groups: usize,

    pub items: usize,
    pub images: usize,
    pub translations: usize,

    /// Item ids that appeared more than once
    pub duplicate_ids: usize,
}

impl CatalogState {
    /// Load the configured document and index it
    pub fn load(config: &CatalogConfig) -> Result<Self> {
        let source = CatalogSource::load(config)?;
        Ok(Self::from_source(source))
    }

    pub fn from_source(source: CatalogSource) -> Self {
        let index = CatalogIndex::build(&source);
        Self {
            index,
            images: source.images,
            translations: source.translations,
        }
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            groups: self.index.group_count(),
            listed_groups: self.index.groups().filter(|g| !g.items.is_empty()).count(),
            items: self.index.item_count(),
            images: self.images.len(),
            translations: self.translations.len(),
            duplicate_ids: self.index.duplicates().len(),
        }
    }
}

static GLOBAL: OnceCell<Catalog> = OnceCell::new();

/// Lazily loaded catalog with an init-once contract
#[derive(Debug)]
pub struct Catalog {
    config: CatalogConfig,
    state: OnceCell<CatalogState>,
    builds: AtomicUsize,
}

impl Catalog {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            state: OnceCell::new(),
            builds: AtomicUsize::new(0),
        }
    }

    /// Process-wide catalog
    ///
    /// The configuration of the first caller wins; later calls return the
    /// same instance and ignore their argument.
    pub fn global(config: &CatalogConfig) -> &'static Catalog {
        GLOBAL.get_or_init(|| Catalog::new(config.clone()))
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Build the catalog if it has not been built yet
    pub fn ensure_loaded(&self) -> Result<&CatalogState> {
        self.state.get_or_try_init(|| {
            self.builds.fetch_add(1, Ordering::SeqCst);
            debug!("Loading catalog from {}", self.config.source.display());

            let state = CatalogState::load(&self.config)?;
            let stats = state.stats();
            info!(
                "Loaded {} groups, {} items, {} images, {} translations",
                stats.groups, stats.items, stats.images, stats.translations
            );
            Ok(state)
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.state.get().is_some()
    }

    /// Number of build attempts made so far
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> Result<CatalogStats> {
        Ok(self.ensure_loaded()?.stats())
    }

    pub fn contains_item(&self, id: &str) -> Result<bool> {
        Ok(self.ensure_loaded()?.contains_item(id))
    }

    pub fn get_item(&self, id: &str, lang: Option<Language>) -> Result<Option<LocalizedItem>> {
        Ok(self.ensure_loaded()?.get_item(id, lang))
    }

    pub fn get_group(&self, key: &str, lang: Option<Language>) -> Result<Option<LocalizedGroup>> {
        Ok(self.ensure_loaded()?.get_group(key, lang))
    }

    pub fn list_groups(
        &self,
        lang: Option<Language>,
        query: Option<&str>,
    ) -> Result<Vec<LocalizedGroup>> {
        Ok(self.ensure_loaded()?.list_groups(lang, query))
    }

    /// One listing page using the configured page size
    pub fn list_page(
        &self,
        lang: Option<Language>,
        query: Option<&str>,
        page_number: usize,
    ) -> Result<Page<LocalizedGroup>> {
        let groups = self.list_groups(lang, query)?;
        Ok(Page::paginate(groups, self.config.page_size, page_number))
    }

    /// Search using the configured result limit
    pub fn search_items(&self, query: &str, lang: Option<Language>) -> Result<Vec<LocalizedItem>> {
        Ok(self
            .ensure_loaded()?
            .search_items(query, lang, self.config.search_limit))
    }

    pub fn translate(&self, key: &str, lang: Option<Language>) -> Result<String> {
        Ok(self.ensure_loaded()?.translate(key, lang))
    }

    pub fn quote_cart<I, S>(&self, lines: I, lang: Option<Language>) -> Result<CartQuote>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        Ok(self.ensure_loaded()?.quote_cart(lines, lang))
    }
}
