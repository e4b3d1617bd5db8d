//! Source key to field binding
//!
//! Every source is turned into a figment [`Dict`] shaped like the
//! destination. The destination's current value, serialized, doubles as the
//! template: it lists the real field names and tells list-typed fields apart
//! from scalars.

use figment::value::{Dict, Tag, Value};
use serde::Serialize;
use std::collections::HashMap;

use super::error::LoadError;

/// Binds an environment variable (or dotenv key) to a field.
///
/// `path` is dotted for nested structs: `EnvKey::new("LOG_LEVEL", "log.level")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvKey {
    pub var: &'static str,
    pub path: &'static str,
}

impl EnvKey {
    pub const fn new(var: &'static str, path: &'static str) -> Self {
        Self { var, path }
    }
}

/// Lowercase and drop `_`/`-` so `LogFile`, `logfile` and `log_file` compare equal.
pub(crate) fn fold_key(key: &str) -> String {
    key.chars().filter(|c| *c != '_' && *c != '-').flat_map(char::to_lowercase).collect()
}

pub(crate) fn template_of<T: Serialize>(value: &T) -> Result<Dict, LoadError> {
    match Value::serialize(value) {
        Ok(Value::Dict(_, dict)) => Ok(dict),
        Ok(_) => Err(LoadError::InvalidDestination(
            "expected a struct or map, found a non-map value".to_string(),
        )),
        Err(e) => Err(LoadError::InvalidDestination(e.to_string())),
    }
}

/// Rename `source` keys to the template's field names, recursing into nested dicts.
///
/// Keys with no matching field are kept as they are.
pub(crate) fn align(source: Dict, template: &Dict) -> Dict {
    let mut index: HashMap<String, &String> = HashMap::new();
    for field in template.keys() {
        let folded = fold_key(field);
        match index.get(&folded) {
            Some(first) => warn_ambiguous(&folded, first, field),
            None => {
                index.insert(folded, field);
            }
        }
    }

    source
        .into_iter()
        .map(|(key, value)| {
            let key = index.get(&fold_key(&key)).map(|k| (*k).clone()).unwrap_or(key);
            let value = match (value, template.get(&key)) {
                (Value::Dict(tag, dict), Some(Value::Dict(_, nested))) => {
                    Value::Dict(tag, align(dict, nested))
                }
                (value, _) => value,
            };
            (key, value)
        })
        .collect()
}

/// Insert the raw string `raw` at the dotted `path` inside `target`.
pub(crate) fn place(target: &mut Dict, template: &Dict, path: &str, raw: &str) {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    place_at(target, Some(template), &segments, raw);
}

fn place_at(target: &mut Dict, template: Option<&Dict>, segments: &[&str], raw: &str) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    let key = resolve_key(template, first);
    let slot = template.and_then(|t| t.get(&key));

    if rest.is_empty() {
        target.insert(key, coerce(raw, slot));
        return;
    }

    let nested_template = match slot {
        Some(Value::Dict(_, dict)) => Some(dict),
        _ => None,
    };
    let entry = target.entry(key).or_insert_with(|| Value::Dict(Tag::Default, Dict::new()));
    if !matches!(entry, Value::Dict(..)) {
        *entry = Value::Dict(Tag::Default, Dict::new());
    }
    if let Value::Dict(_, dict) = entry {
        place_at(dict, nested_template, rest, raw);
    }
}

fn resolve_key(template: Option<&Dict>, segment: &str) -> String {
    let folded = fold_key(segment);
    let mut matches = template.into_iter().flat_map(Dict::keys).filter(|k| fold_key(k) == folded);
    let Some(first) = matches.next() else {
        return segment.to_string();
    };
    for other in matches {
        warn_ambiguous(&folded, first, other);
    }
    first.clone()
}

/// The first field in name order keeps the key.
fn warn_ambiguous(folded: &str, kept: &str, shadowed: &str) {
    tracing::warn!(
        "Fields {} and {} both match config key {}; binding to {}",
        kept,
        shadowed,
        folded,
        kept
    );
}

/// List fields take a comma-separated value; everything else stays a string
/// and is converted during extraction.
fn coerce(raw: &str, slot: Option<&Value>) -> Value {
    match slot {
        Some(Value::Array(..)) => {
            let items = if raw.trim().is_empty() {
                Vec::new()
            } else {
                raw.split(',').map(|item| Value::from(item.trim().to_string())).collect()
            };
            Value::Array(Tag::Default, items)
        }
        _ => Value::from(raw.to_string()),
    }
}
