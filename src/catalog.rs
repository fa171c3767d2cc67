use crate::types::{Dims, Item};
use serde_json::Value;

/// Dimension keys accepted on object-form entries, tried in order.
const DIM_KEYS: [&str; 5] = ["dimensions", "dims", "size", "whd", "lwh"];

/// Failure to decode a raw item list. The whole load fails atomically;
/// a partial catalog is never returned.
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Json(serde_json::Error),
    UnsupportedRoot,
    MalformedItem { index: usize, reason: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "cannot read item list: {}", e),
            CatalogError::Json(e) => write!(f, "invalid item list JSON: {}", e),
            CatalogError::UnsupportedRoot => {
                write!(f, "item list must be a JSON array or an object with an \"items\" key")
            }
            CatalogError::MalformedItem { index, reason } => {
                write!(f, "item {} is malformed: {}", index, reason)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Json(e)
    }
}

/// Reads and decodes an item-list JSON file.
pub fn load_items(path: &str) -> Result<Vec<Item>, CatalogError> {
    let text = std::fs::read_to_string(path)?;
    items_from_json(&text)
}

/// Decodes an item list from JSON text. Accepts either a top-level array
/// of entries or an object wrapping it under `"items"`. Each entry is a
/// 3-number array or an object carrying the dimensions under one of the
/// usual keys.
pub fn items_from_json(text: &str) -> Result<Vec<Item>, CatalogError> {
    let root: Value = serde_json::from_str(text)?;

    let entries = match &root {
        Value::Array(a) => a.as_slice(),
        Value::Object(m) => match m.get("items") {
            Some(Value::Array(a)) => a.as_slice(),
            _ => return Err(CatalogError::UnsupportedRoot),
        },
        _ => return Err(CatalogError::UnsupportedRoot),
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let dims = entry_dims(i, entry)?;
            Ok(Item { id: i, dims })
        })
        .collect()
}

/// Builds a catalog straight from numeric triples, ceiling-rounding each
/// dimension. Ids are assigned in input order.
pub fn items_from_raw(raw: &[[f64; 3]]) -> Result<Vec<Item>, CatalogError> {
    raw.iter()
        .enumerate()
        .map(|(i, triple)| {
            let dims = ceil_dims(i, triple)?;
            Ok(Item { id: i, dims })
        })
        .collect()
}

fn entry_dims(index: usize, entry: &Value) -> Result<Dims, CatalogError> {
    let raw = match entry {
        Value::Array(a) => numeric_triple(index, a)?,
        Value::Object(m) => {
            let arr = DIM_KEYS
                .iter()
                .find_map(|k| m.get(*k).and_then(Value::as_array))
                .ok_or_else(|| CatalogError::MalformedItem {
                    index,
                    reason: format!("object has no dimension key (tried {:?})", DIM_KEYS),
                })?;
            numeric_triple(index, arr)?
        }
        other => {
            return Err(CatalogError::MalformedItem {
                index,
                reason: format!("unsupported entry type: {}", other),
            });
        }
    };
    ceil_dims(index, &raw)
}

fn numeric_triple(index: usize, arr: &[Value]) -> Result<[f64; 3], CatalogError> {
    if arr.len() != 3 {
        return Err(CatalogError::MalformedItem {
            index,
            reason: format!("expected 3 dimensions, got {}", arr.len()),
        });
    }
    let mut out = [0.0; 3];
    for (slot, v) in out.iter_mut().zip(arr) {
        *slot = v.as_f64().ok_or_else(|| CatalogError::MalformedItem {
            index,
            reason: format!("dimension {} is not a number", v),
        })?;
    }
    Ok(out)
}

fn ceil_dims(index: usize, raw: &[f64; 3]) -> Result<Dims, CatalogError> {
    let mut rounded = [0u32; 3];
    for (slot, &v) in rounded.iter_mut().zip(raw) {
        if !v.is_finite() || v <= 0.0 || v > u32::MAX as f64 {
            return Err(CatalogError::MalformedItem {
                index,
                reason: format!("dimension {} is not a positive number", v),
            });
        }
        *slot = v.ceil() as u32;
    }
    Ok(Dims::new(rounded[0], rounded[1], rounded[2]))
}
