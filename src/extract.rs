//! Sentinel-based field extraction from provider payloads
//!
//! Provider payloads are loosely shaped: maps keyed by currency or language
//! code, arrays that may be empty, nested objects that may be missing. These
//! helpers never fail; anything malformed collapses into [`NOT_AVAILABLE`].

use serde_json::Value;
use tracing::debug;

/// Explicit "unknown" value shown in place of a missing field
pub const NOT_AVAILABLE: &str = "N/A";

/// Which keyed map is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Currency,
    Language,
}

/// Display name of the first entry of a currency or language map.
///
/// Both kinds share one shape: entries are either `{"name": "..."}` records
/// or plain strings. `kind` only labels the log line for a malformed entry.
/// "First" means insertion order, which `serde_json` keeps with `preserve_order`.
#[must_use]
pub fn extract_primary(map: Option<&Value>, kind: FieldKind) -> String {
    let Some(Value::Object(entries)) = map else {
        return NOT_AVAILABLE.to_string();
    };

    let name = match entries.values().next() {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Object(record)) => record.get("name").and_then(Value::as_str),
        Some(other) => {
            debug!("Unexpected {:?} entry: {}", kind, other);
            None
        }
        None => None,
    };

    name.filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// String value, or the sentinel
#[must_use]
pub fn string_or_na(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// First string of an array (capital, continent, timezone, tld), or the sentinel
#[must_use]
pub fn first_string(value: Option<&Value>) -> String {
    string_or_na(value.and_then(Value::as_array).and_then(|items| items.first()))
}

/// All strings of an array, skipping anything that is not a string
#[must_use]
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// `translations[key][field]`, when present and non-empty
#[must_use]
pub fn localized(translations: Option<&Value>, key: &str, field: &str) -> Option<String> {
    translations?
        .get(key)?
        .get(field)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// International dialing code from `idd`: root plus first suffix (`+55`, `+1201`).
#[must_use]
pub fn dialing_code(idd: Option<&Value>) -> String {
    let root = idd
        .and_then(|v| v.get("root"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    let suffix = idd
        .and_then(|v| v.get("suffixes"))
        .and_then(Value::as_array)
        .and_then(|s| s.first())
        .and_then(Value::as_str)
        .unwrap_or_default();

    if root.is_empty() && suffix.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        format!("{root}{suffix}")
    }
}

/// Official native-script names from `name.nativeName`, in provider order
#[must_use]
pub fn native_names(native: Option<&Value>) -> Vec<String> {
    let Some(Value::Object(entries)) = native else {
        return Vec::new();
    };

    entries
        .values()
        .filter_map(|entry| entry.get("official").or_else(|| entry.get("common")))
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}
