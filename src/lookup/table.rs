use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::diagnostics::Diagnostics;
use crate::error::{FlowLogError, Result};

pub const LOOKUP_KEY_DELIMITER: char = '_';

/// `"<port>_<protocol>"`, used only for table lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    pub fn new(port: &str, protocol: &str) -> Self {
        Self(format!("{}{}{}", port, LOOKUP_KEY_DELIMITER, protocol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps (destination port, protocol) pairs to tags. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: HashMap<LookupKey, String>,
}

impl LookupTable {
    /// Load a comma-separated reference file of `port,protocol,...,tag` rows.
    ///
    /// Ports and protocols are taken verbatim: no case folding, no trimming of
    /// leading zeros. A later row with the same key replaces the earlier tag.
    pub fn load<P: AsRef<Path>>(path: P, diagnostics: &dyn Diagnostics) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            diagnostics.error(&format!(
                "Tag map file not found: {}: {}",
                path.display(),
                source
            ));
            FlowLogError::LookupFileMissing {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Self::from_reader(BufReader::new(file), diagnostics).map_err(|source| {
            diagnostics.error(&format!(
                "Tag map file unreadable: {}: {}",
                path.display(),
                source
            ));
            FlowLogError::LookupFileMissing {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    pub fn from_reader<R: BufRead>(
        reader: R,
        diagnostics: &dyn Diagnostics,
    ) -> std::io::Result<Self> {
        let mut table = Self::default();

        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let fields: Vec<&str> = trimmed.split(',').collect();
            if fields.len() < 3 {
                diagnostics.warn(&format!("Invalid lookup table row: {}", trimmed));
                continue;
            }

            let tag = fields[fields.len() - 1];
            table.insert(fields[0], fields[1], tag);
        }

        diagnostics.info(&format!("Loaded {} lookup table entries", table.len()));
        Ok(table)
    }

    fn insert(&mut self, port: &str, protocol: &str, tag: &str) {
        self.entries
            .insert(LookupKey::new(port, protocol), tag.to_string());
    }

    /// Case-sensitive exact match.
    pub fn resolve(&self, port: &str, protocol: &str) -> Option<&str> {
        self.get(&LookupKey::new(port, protocol))
    }

    pub fn get(&self, key: &LookupKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
