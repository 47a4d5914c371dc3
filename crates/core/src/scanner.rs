use crate::aggregate::Aggregator;
use crate::classifier::TokenClassifier;
use crate::config::{ConfigError, IgnoreFilter, ScanConfig};
use crate::license::LicenseTable;
use crate::models::{Category, Dialect, ProjectAggregate, ScanResult};
use crate::parsers::extractor_for;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("nothing to scan: {0} does not exist")]
    MissingRoot(PathBuf),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Main scanner: discovers candidate files and runs each through the
/// extract → classify → resolve → accumulate pipeline, one file at a time.
///
/// Per-file failures are downgraded to diagnostics on that file's result;
/// the only fatal error is a scan root that does not exist.
pub struct DependencyScanner {
    config: ScanConfig,
    ignore_filter: IgnoreFilter,
}

impl DependencyScanner {
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let ignore_filter = IgnoreFilter::new(&config)?;
        Ok(Self {
            config,
            ignore_filter,
        })
    }

    /// Scan the configured root and return the finalized aggregate
    pub fn scan(&self) -> Result<ProjectAggregate, ScanError> {
        if !self.config.root.exists() {
            return Err(ScanError::MissingRoot(self.config.root.clone()));
        }

        let candidates = self.find_candidate_files();
        Ok(self.scan_paths(&candidates))
    }

    /// Scan an already-resolved candidate list; traversal policy may live
    /// with the caller. Paths whose extension maps to no dialect are
    /// excluded, which is not an error.
    pub fn scan_paths(&self, paths: &[PathBuf]) -> ProjectAggregate {
        // Load the license table once; a missing or unreadable table
        // degrades to "unknown license" with a note, never a failure
        let table_path = self.config.license_table_path();
        let (table, table_note) = match LicenseTable::from_path(&table_path) {
            Ok(table) => (table, None),
            Err(_) => (
                LicenseTable::empty(),
                Some(format!(
                    "license table {} not loaded; third-party licenses reported as unknown",
                    table_path.display()
                )),
            ),
        };

        let classifier = TokenClassifier::new(&self.config.root, table);

        let mut aggregator = Aggregator::new(self.config.root.clone());
        if let Some(note) = table_note {
            aggregator.note(note);
        }

        for path in paths {
            let Some(dialect) = Dialect::from_path(path) else {
                continue;
            };
            aggregator.accumulate(self.process_file(path, dialect, &classifier));
        }

        aggregator.finalize()
    }

    /// Read, extract, classify, and license-resolve one file. Never fails:
    /// an unreadable file yields an empty result carrying a diagnostic.
    fn process_file(
        &self,
        path: &Path,
        dialect: Dialect,
        classifier: &TokenClassifier,
    ) -> ScanResult {
        let relative = path
            .strip_prefix(&self.config.root)
            .map(Path::to_path_buf)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| path.to_path_buf());

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                return ScanResult {
                    path: relative,
                    dialect,
                    tokens: vec![],
                    diagnostics: vec![format!("unreadable file: {err}")],
                };
            }
        };

        let extractor = extractor_for(dialect);
        let extraction = extractor.extract(&content);

        let mut tokens = extraction.tokens;
        for token in &mut tokens {
            token.category = classifier.classify(&token.name, dialect);
            if token.category == Category::ThirdParty {
                token.license = classifier.license_table().resolve(&token.name).cloned();
            }
        }

        ScanResult {
            path: relative,
            dialect,
            tokens,
            diagnostics: extraction.diagnostics,
        }
    }

    /// Candidate files under the root, sorted so scan order (and therefore
    /// report order) is deterministic
    fn find_candidate_files(&self) -> Vec<PathBuf> {
        if self.config.root.is_file() {
            if self
                .ignore_filter
                .matches_dialect_filter(&self.config.root, &self.config.dialect_filter)
            {
                return vec![self.config.root.clone()];
            }
            return vec![];
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&self.config.root)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if entry.file_type().is_dir() {
                continue;
            }
            if self.ignore_filter.should_ignore(path, false) {
                continue;
            }
            if !self
                .ignore_filter
                .matches_dialect_filter(path, &self.config.dialect_filter)
            {
                continue;
            }
            if Dialect::from_path(path).is_some() {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        files
    }
}
