//! Price extraction
//!
//! Prices appear as numbers, numeric strings, or strings with currency
//! symbols and unit text ("120.50 USD", "$15"). The first numeric token wins.
//! Numbers go through the same token scan as their text form, so a sign is
//! never part of the token and `-5` reads as `5.0` just like `"-5"`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::classify::PRICE_KEYS;

/// First run of digits with at most one decimal point
static PRICE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:\.\d+)?|\.\d+").expect("price token pattern is valid")
});

/// Extract a price from a node
///
/// For mappings the price keys are tried in priority order. Any other value
/// is treated as the price itself. Anything unparseable yields `0.0`.
pub fn parse_price(node: &Value) -> f64 {
    match node {
        Value::Object(map) => PRICE_KEYS
            .iter()
            .find_map(|key| map.get(*key))
            .map(parse_price_value)
            .unwrap_or(0.0),
        other => parse_price_value(other),
    }
}

/// Parse a single raw price value
pub fn parse_price_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => parse_price_str(&n.to_string()),
        Value::String(s) => parse_price_str(s),
        _ => 0.0,
    }
}

fn parse_price_str(raw: &str) -> f64 {
    PRICE_TOKEN
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}
