//! The column/value mapping table parsed from `import.cfg`.
//!
//! Grammar, consumed line by line:
//!
//! - blank lines and lines starting with `;` are comments
//! - `#<digits>:<shelter-name>=<target-name>` opens a new column and
//!   makes it current; a numeric index may be used only once per file
//! - every other line is `<shelter-value>=<target-value>`, split on the
//!   first `=`, and belongs to the current column
//!
//! The target name from the header is the externally visible column key;
//! declaration order of the headers fixes the output field order.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};

const COLUMN_HEADER: &str = r"^#(?P<num>\d+):(?P<shelter>\w+)=(?P<target>\w+)";

/// One axis of the output schema with its shelter-to-target value map.
#[derive(Debug, Clone)]
struct Column {
    /// Externally visible key (the intake system's column name).
    target: String,
    values: HashMap<String, String>,
}

/// Ordered, immutable collection of import columns.
///
/// Built once per run from a configuration source and queried by the
/// normalizers and the output projection. Mapping lookups are advisory:
/// a shelter value with no configured translation passes through
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    columns: Vec<Column>,
}

impl MappingTable {
    /// Parse a mapping table from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a mapping table from an in-memory string.
    pub fn parse_str(source: &str) -> Result<Self> {
        Self::from_reader(source.as_bytes())
    }

    /// Parse a mapping table from any line-iterable source.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let header = Regex::new(COLUMN_HEADER).expect("column header pattern is valid");
        let mut columns: Vec<Column> = Vec::new();
        let mut seen_indices: HashSet<String> = HashSet::new();

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = lineno + 1;
            if line.trim().is_empty() || line.starts_with(';') {
                continue;
            }
            if let Some((index, target)) = header
                .captures(&line)
                .map(|caps| (caps["num"].to_string(), caps["target"].to_string()))
            {
                if !seen_indices.insert(index) {
                    return Err(Error::DuplicateColumnIndex { line: lineno, text: line });
                }
                columns.push(Column {
                    target,
                    values: HashMap::new(),
                });
                continue;
            }
            let Some((shelter_value, target_value)) = line.split_once('=') else {
                return Err(Error::Syntax { line: lineno, text: line });
            };
            let Some(current) = columns.last_mut() else {
                return Err(Error::MappingBeforeColumn { line: lineno, text: line });
            };
            current
                .values
                .insert(shelter_value.to_string(), target_value.trim_end().to_string());
        }

        debug!(columns = columns.len(), "parsed import configuration");
        Ok(Self { columns })
    }

    /// Column keys in declaration order. This is the authoritative field
    /// order for any downstream tabular serialization.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.target.as_str())
    }

    /// The set of shelter values configured under `column`.
    pub fn shelter_values(&self, column: &str) -> Result<BTreeSet<&str>> {
        let col = self.find(column)?;
        Ok(col.values.keys().map(String::as_str).collect())
    }

    /// Translate `shelter_value` through `column`, falling back to the
    /// input unchanged when no mapping is configured for it.
    pub fn mapped_value<'a>(&'a self, column: &str, shelter_value: &'a str) -> Result<&'a str> {
        let col = self.find(column)?;
        Ok(col
            .values
            .get(shelter_value)
            .map(String::as_str)
            .unwrap_or(shelter_value))
    }

    fn find(&self, column: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.target == column)
            .ok_or_else(|| Error::UnknownColumn(column.to_string()))
    }
}
