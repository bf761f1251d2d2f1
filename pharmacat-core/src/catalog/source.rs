//! Catalog source loading
//!
//! Reads the catalog JSON document and splits it into the three facets the
//! indexer needs: group containers, the image map and UI translations.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};

/// Item id to relative image path
pub type ImageMap = HashMap<String, String>;

/// Text key to language code to display string
pub type TranslationMap = HashMap<String, HashMap<String, String>>;

/// The parsed facets of a catalog document
#[derive(Debug, Clone, Default)]
pub struct CatalogSource {
    /// Container key to (sub-group key to sub-group node), in config order
    pub containers: IndexMap<String, Map<String, Value>>,

    pub images: ImageMap,

    pub translations: TranslationMap,
}

impl CatalogSource {
    /// Read and parse the document at `config.source`
    pub fn load(config: &CatalogConfig) -> Result<Self> {
        let path = config.source.as_path();
        if !path.exists() {
            return Err(CatalogError::SourceUnavailable {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content, path, config)
    }

    /// Parse a document already held in memory
    ///
    /// `origin` is only used for error messages. Nesting depth is not
    /// limited; deep documents grow the stack on the heap instead.
    pub fn from_json_str(content: &str, origin: &Path, config: &CatalogConfig) -> Result<Self> {
        let malformed = |source: serde_json::Error| CatalogError::SourceMalformed {
            path: origin.to_path_buf(),
            source,
        };

        let mut deserializer = serde_json::Deserializer::from_str(content);
        deserializer.disable_recursion_limit();
        let document = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
            .map_err(malformed)?;
        deserializer.end().map_err(malformed)?;

        Self::from_document(document, origin, config)
    }

    /// Split a parsed document into its facets
    pub fn from_document(document: Value, origin: &Path, config: &CatalogConfig) -> Result<Self> {
        let Value::Object(mut root) = document else {
            return Err(CatalogError::InvalidSource {
                path: origin.to_path_buf(),
                reason: "top level must be a JSON object".to_string(),
            });
        };

        let mut containers = IndexMap::new();
        for key in &config.group_containers {
            match root.remove(key) {
                Some(Value::Object(groups)) => {
                    debug!("Container {} holds {} sub-groups", key, groups.len());
                    containers.insert(key.clone(), groups);
                }
                Some(_) => warn!("Ignoring group container {}: not a mapping", key),
                None => {}
            }
        }

        let images = config
            .image_keys
            .iter()
            .find_map(|key| root.get(key).and_then(Value::as_object))
            .map(parse_images)
            .unwrap_or_default();

        let translations = root
            .get(&config.translations_key)
            .map(parse_translations)
            .unwrap_or_default();

        Ok(Self {
            containers,
            images,
            translations,
        })
    }
}

fn parse_images(map: &Map<String, Value>) -> ImageMap {
    map.iter()
        .filter_map(|(id, path)| path.as_str().map(|p| (id.clone(), p.to_string())))
        .collect()
}

fn parse_translations(value: &Value) -> TranslationMap {
    let Some(map) = value.as_object() else {
        warn!("Ignoring translations: not a mapping");
        return TranslationMap::new();
    };

    map.iter()
        .filter_map(|(key, langs)| {
            let langs = langs.as_object()?;
            let strings = langs
                .iter()
                .filter_map(|(lang, text)| text.as_str().map(|t| (lang.clone(), t.to_string())))
                .collect();
            Some((key.clone(), strings))
        })
        .collect()
}
