use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LicenseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// License information for one known package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// License name as recorded in the table (e.g. `BSD License`)
    pub license: String,
    /// Reference URL, when the table carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Row shape of the human-editable CSV; unknown extra columns are ignored
#[derive(Debug, Deserialize)]
struct LicenseRow {
    package: String,
    license: String,
    #[serde(default)]
    url: Option<String>,
}

/// Read-only lookup of package name to license, loaded once per scan.
///
/// Keys are case-sensitive. An empty table is valid and simply resolves
/// nothing; license completeness is best-effort by design.
#[derive(Debug, Clone, Default)]
pub struct LicenseTable {
    records: HashMap<String, LicenseRecord>,
}

impl LicenseTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a `package,license[,url]` CSV with a header row. Rows that fail
    /// to deserialize are skipped rather than failing the load.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, LicenseError> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let mut records = HashMap::new();

        for row in csv_reader.deserialize::<LicenseRow>() {
            let Ok(row) = row else { continue };
            if row.package.is_empty() {
                continue;
            }
            records.insert(
                row.package,
                LicenseRecord {
                    license: row.license,
                    url: row.url.filter(|url| !url.is_empty()),
                },
            );
        }

        Ok(Self { records })
    }

    pub fn from_path(path: &Path) -> Result<Self, LicenseError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(io::BufReader::new(file))
    }

    /// Case-sensitive lookup. Absence is an expected, common outcome and is
    /// reported as `None`, never as an error.
    pub fn resolve(&self, package: &str) -> Option<&LicenseRecord> {
        self.records.get(package)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.records.contains_key(package)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
