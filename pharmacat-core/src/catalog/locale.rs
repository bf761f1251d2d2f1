//! Language resolution for catalog fields
//!
//! Catalog nodes carry per-language fields such as `name_en` or
//! `description_fa`. Resolution tries the requested language first, then the
//! fixed fallback chain, then the bare field, then a caller default.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Storefront languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fa,
    En,
    Tr,
    Ar,
}

/// Order in which languages are tried when the requested one is missing
pub const FALLBACK_CHAIN: [Language; 4] = [Language::En, Language::Fa, Language::Tr, Language::Ar];

/// Field synonyms tried, in order, when resolving a description
pub const DESCRIPTION_FIELDS: [&str; 3] = ["description", "desc", "about"];

/// Field names tried, in order, when resolving an expiry date
pub const EXPIRY_FIELDS: [&str; 3] = ["exp", "expire", "expiry"];

impl Language {
    /// Short language code used in field suffixes
    pub fn code(&self) -> &'static str {
        match self {
            Language::Fa => "fa",
            Language::En => "en",
            Language::Tr => "tr",
            Language::Ar => "ar",
        }
    }

    /// Parse a language code, returning `None` for anything unrecognised
    pub fn parse(code: &str) -> Option<Self> {
        code.parse().ok()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fa" => Ok(Language::Fa),
            "en" => Ok(Language::En),
            "tr" => Ok(Language::Tr),
            "ar" => Ok(Language::Ar),
            other => Err(format!("Unsupported language code: {}", other)),
        }
    }
}

/// Render a field value as display text
///
/// Empty strings and non-scalar values count as absent.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field(node: &Value, key: &str) -> Option<String> {
    node.get(key).and_then(scalar_text)
}

fn localized_field(node: &Value, base: &str, lang: Language) -> Option<String> {
    field(node, &format!("{}_{}", base, lang.code()))
}

/// Resolve `{base}_{lang}` through the fallback chain
///
/// Returns `None` when nothing matched, including the bare `{base}` key.
pub fn resolve_text(node: &Value, base: &str, lang: Option<Language>) -> Option<String> {
    lang.and_then(|l| localized_field(node, base, l))
        .or_else(|| {
            FALLBACK_CHAIN
                .iter()
                .find_map(|&fallback| localized_field(node, base, fallback))
        })
        .or_else(|| field(node, base))
}

/// Resolve a localized text field, falling back to `default`
pub fn pick_text(node: &Value, base: &str, lang: Option<Language>, default: &str) -> String {
    resolve_text(node, base, lang).unwrap_or_else(|| default.to_string())
}

/// Resolve a display name, falling back to `default` (usually the id or key)
pub fn pick_name(node: &Value, lang: Option<Language>, default: &str) -> String {
    pick_text(node, "name", lang, default)
}

/// Resolve a description across its synonyms
///
/// Synonyms form the outer loop: every language of `description` is tried
/// before any language of `desc`. Only the bare `description` key is used as
/// the last resort; missing descriptions resolve to an empty string.
pub fn pick_description(node: &Value, lang: Option<Language>) -> String {
    DESCRIPTION_FIELDS
        .iter()
        .find_map(|base| {
            lang.and_then(|l| localized_field(node, base, l)).or_else(|| {
                FALLBACK_CHAIN
                    .iter()
                    .find_map(|&fallback| localized_field(node, base, fallback))
            })
        })
        .or_else(|| field(node, "description"))
        .unwrap_or_default()
}

/// First non-empty expiry field, or an empty string
pub fn pick_expiry(node: &Value) -> String {
    EXPIRY_FIELDS
        .iter()
        .find_map(|key| field(node, key))
        .unwrap_or_default()
}
