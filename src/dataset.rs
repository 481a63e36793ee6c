use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{FinderError, Result};
use crate::types::Organisation;

/// The resident, read-only organisation directory
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    organisations: Vec<Organisation>,
}

impl Dataset {
    pub fn new(organisations: Vec<Organisation>) -> Self {
        Self { organisations }
    }

    /// Load the bundled JSON file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FinderError::Dataset(format!("Failed to read dataset '{}': {}", path.display(), e))
        })?;

        let dataset = Self::from_json_str(&content)?;
        info!(
            path = %path.display(),
            organisations = dataset.len(),
            "Loaded organisation dataset"
        );
        Ok(dataset)
    }

    /// Parse a JSON array of organisation objects.
    ///
    /// Entries that are not objects are skipped; the top-level value must be an array.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        let entries = match value {
            Value::Array(entries) => entries,
            other => {
                return Err(FinderError::Dataset(format!(
                    "Expected a JSON array of organisations, found {}",
                    json_kind(&other)
                )))
            }
        };

        let mut organisations = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match entry.as_object() {
                Some(object) => organisations.push(Organisation::from_json_object(object)),
                None => warn!(index, kind = json_kind(entry), "Skipping non-object dataset entry"),
            }
        }

        debug!("Parsed {} of {} dataset entries", organisations.len(), entries.len());
        Ok(Self { organisations })
    }

    pub fn organisations(&self) -> &[Organisation] {
        &self.organisations
    }

    pub fn len(&self) -> usize {
        self.organisations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organisations.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
