//! Read-only lookup tables supplied to passes at construction time.
//!
//! Both the participant-name to gene-symbol mapping and the family-name to
//! member-list mapping are flat JSON objects of string to string.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::PassError;

/// An immutable string-to-string table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    entries: HashMap<String, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Loads a table from a JSON object file.
    ///
    /// A missing, unreadable or malformed file is a [`PassError::Config`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PassError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PassError::config(path, "file does not exist"));
        }
        let text = fs::read_to_string(path)
            .map_err(|e| PassError::config(path, format!("unable to read: {e}")))?;
        let entries: HashMap<String, String> = serde_json::from_str(&text)
            .map_err(|e| PassError::config(path, format!("invalid JSON object: {e}")))?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded lookup table");
        Ok(SymbolTable { entries })
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        SymbolTable {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
