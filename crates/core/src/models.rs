use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::license::LicenseRecord;

/// Source dialect of a scanned file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Python source (`.py`)
    Python,
    /// Jupyter notebook document (`.ipynb`)
    Notebook,
    /// C/C++ source or header (`.c`, `.cpp`, `.h`, `.hpp`)
    Header,
}

impl Dialect {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" => Some(Dialect::Python),
            "ipynb" => Some(Dialect::Notebook),
            "c" | "cpp" | "h" | "hpp" => Some(Dialect::Header),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| Self::from_extension(&ext.to_string_lossy()))
    }

    /// Header-dialect files double as build inputs for the skeleton artifact.
    pub fn is_compiled(self) -> bool {
        matches!(self, Dialect::Header)
    }
}

/// Classification bucket for a reference token.
///
/// Scripting tokens draw from `{StandardLibrary, ThirdParty, LocalOrMissing,
/// Unknown}`; header tokens from `{StandardLibrary, LocalOrThirdParty,
/// Unknown}`. The declaration order doubles as the display order in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Ships with the language runtime or compiler
    StandardLibrary,
    /// Installable package known to the license table
    ThirdParty,
    /// Header that is either project-local or vendored; the two cannot be
    /// told apart without a build system
    LocalOrThirdParty,
    /// Could not be established as an installed package; intra-project
    /// modules land here too
    LocalOrMissing,
    /// Unresolved
    Unknown,
}

impl Default for Category {
    fn default() -> Self {
        Category::Unknown
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::StandardLibrary => "Standard Library",
            Category::ThirdParty => "Third-Party",
            Category::LocalOrThirdParty => "Local or Third-Party",
            Category::LocalOrMissing => "Local or Missing",
            Category::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// A single reference to an imported module or included header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceToken {
    /// Name used for classification: the top-level module for scripting
    /// tokens, the full header name for includes
    pub name: String,
    /// The reference as written in source (e.g. `os.path`, `myheader.h`)
    pub raw: String,
    /// 1-based line number, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Categorization
    #[serde(default)]
    pub category: Category,
    /// Resolved license, for third-party tokens the table knows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<LicenseRecord>,
}

impl ReferenceToken {
    /// Extractors emit tokens uncategorized; the scan pipeline classifies
    /// them afterwards.
    pub fn new(name: impl Into<String>, raw: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            name: name.into(),
            raw: raw.into(),
            line,
            category: Category::Unknown,
            license: None,
        }
    }
}

/// Per-file record of extracted and classified tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Path relative to the scan root where possible
    pub path: PathBuf,
    pub dialect: Dialect,
    /// Tokens in extraction order, duplicates included
    pub tokens: Vec<ReferenceToken>,
    /// Non-fatal problems hit while processing this file
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

/// A deduplicated token within the project-wide summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<LicenseRecord>,
    /// Files that referenced this token, sorted
    pub files: Vec<PathBuf>,
}

/// All tokens of one category, sorted alphabetically
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub tokens: Vec<TokenEntry>,
}

/// Counters over a finished scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub total_files: usize,
    pub python_files: usize,
    pub notebook_files: usize,
    pub header_files: usize,
    pub total_tokens: usize,
    pub standard_library: usize,
    pub third_party: usize,
    pub local_or_third_party: usize,
    pub local_or_missing: usize,
    pub unknown: usize,
}

/// Project-wide view of a finished scan.
///
/// Built incrementally by the aggregator and finalized read-only before any
/// rendering happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectAggregate {
    /// Scan root
    pub root: PathBuf,
    /// Per-file results in scan order
    pub files: Vec<ScanResult>,
    /// Deduplicated tokens grouped by category
    pub summary: Vec<CategoryGroup>,
    pub stats: ScanStats,
    /// Aggregate-level diagnostics (missing license table, classification
    /// conflicts)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    /// Header-dialect files scanned; these parameterize the build skeleton
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compiled_sources: Vec<PathBuf>,
}

impl ProjectAggregate {
    /// Tokens recorded under `category`, or an empty slice
    pub fn tokens_in(&self, category: Category) -> &[TokenEntry] {
        self.summary
            .iter()
            .find(|group| group.category == category)
            .map(|group| group.tokens.as_slice())
            .unwrap_or(&[])
    }
}
