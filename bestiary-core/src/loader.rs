//! Dataset loading.
//!
//! Accepts either a JSON array of records or a JSON object keyed by id. In the
//! keyed form a record without its own `id` takes the key; object entries are
//! visited in key order.

use std::fs;
use std::io::Read;
use std::path::Path;

use bestiary_types::Creature;
use rustc_hash::FxHashSet;
use serde_json::Value;

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    /// The contents are not a valid record array or map.
    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level value is neither an array nor an object.
    #[error("dataset must be a JSON array or object, found {0}")]
    UnexpectedShape(&'static str),
    /// Two records share an id.
    #[error("duplicate creature id `{0}`")]
    DuplicateId(String),
}

/// Loads records from a JSON file.
///
/// # Errors
///
/// See [`LoadError`].
pub fn load_creatures(path: impl AsRef<Path>) -> Result<Vec<Creature>, LoadError> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_creatures(&text)
}

/// Loads records from any reader.
///
/// # Errors
///
/// See [`LoadError`].
pub fn read_creatures<R: Read>(mut reader: R) -> Result<Vec<Creature>, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_creatures(&text)
}

/// Parses records from JSON text.
///
/// # Errors
///
/// See [`LoadError`].
pub fn parse_creatures(json: &str) -> Result<Vec<Creature>, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    let mut creatures = match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Creature>, _>>()?,
        Value::Object(map) => {
            let mut out = Vec::with_capacity(map.len());
            for (key, item) in map {
                let mut creature: Creature = serde_json::from_value(item)?;
                if creature.id.trim().is_empty() {
                    creature.id = key;
                }
                out.push(creature);
            }
            out
        }
        other => return Err(LoadError::UnexpectedShape(shape_name(&other))),
    };

    assign_missing_ids(&mut creatures);
    check_unique(&creatures)?;

    log::debug!("loaded {} creatures", creatures.len());
    Ok(creatures)
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn assign_missing_ids(creatures: &mut [Creature]) {
    for (position, creature) in creatures.iter_mut().enumerate() {
        if creature.id.trim().is_empty() {
            creature.id = format!("record-{position}");
            log::warn!(
                "creature `{}` at position {} has no id; assigned `{}`",
                creature.name,
                position,
                creature.id
            );
        }
    }
}

fn check_unique(creatures: &[Creature]) -> Result<(), LoadError> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    seen.reserve(creatures.len());
    for creature in creatures {
        if !seen.insert(creature.id.as_str()) {
            return Err(LoadError::DuplicateId(creature.id.clone()));
        }
    }
    Ok(())
}
