use crate::models::Dialect;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to build glob pattern: {0}")]
    GlobError(#[from] globset::Error),
    #[error("Failed to parse gitignore: {0}")]
    GitignoreError(#[from] ignore::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Configuration for a scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root path to scan; a single file bypasses discovery
    pub root: PathBuf,
    /// Filter to specific dialects
    pub dialect_filter: Option<Vec<Dialect>>,
    /// Additional ignore patterns (glob style)
    pub ignore_patterns: Vec<String>,
    /// Custom ignore file path
    pub ignore_file: Option<PathBuf>,
    /// Include dependency directories (.venv, node_modules) in the scan
    pub include_deps: bool,
    /// License table location; `None` means `licenses.csv` beside the root
    pub license_table: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            dialect_filter: None,
            ignore_patterns: vec![],
            ignore_file: None,
            include_deps: false,
            license_table: None,
        }
    }
}

impl ScanConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    pub fn with_dialect_filter(mut self, dialects: Vec<Dialect>) -> Self {
        self.dialect_filter = Some(dialects);
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_ignore_file(mut self, path: PathBuf) -> Self {
        self.ignore_file = Some(path);
        self
    }

    pub fn with_include_deps(mut self, include: bool) -> Self {
        self.include_deps = include;
        self
    }

    pub fn with_license_table(mut self, path: PathBuf) -> Self {
        self.license_table = Some(path);
        self
    }

    /// Where the license table is expected: the configured path, or
    /// `licenses.csv` next to the scan root.
    pub fn license_table_path(&self) -> PathBuf {
        if let Some(ref path) = self.license_table {
            return path.clone();
        }
        let base = if self.root.is_file() {
            self.root.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            self.root.clone()
        };
        base.join("licenses.csv")
    }
}

/// Filter for ignoring files and directories
pub struct IgnoreFilter {
    gitignore: Option<Gitignore>,
    custom_globs: GlobSet,
    default_ignores: GlobSet,
}

impl IgnoreFilter {
    pub fn new(config: &ScanConfig) -> Result<Self, ConfigError> {
        // Load .gitignore if present
        let gitignore = if let Some(ref ignore_file) = config.ignore_file {
            let mut builder = GitignoreBuilder::new(&config.root);
            builder.add(ignore_file);
            Some(builder.build()?)
        } else {
            let gitignore_path = config.root.join(".gitignore");
            if gitignore_path.exists() {
                let mut builder = GitignoreBuilder::new(&config.root);
                builder.add(&gitignore_path);
                Some(builder.build()?)
            } else {
                None
            }
        };

        // Build custom ignore globs
        let mut custom_builder = GlobSetBuilder::new();
        for pattern in &config.ignore_patterns {
            custom_builder.add(Glob::new(pattern)?);
        }
        let custom_globs = custom_builder.build()?;

        // Default ignores (unless include_deps is true)
        let mut default_builder = GlobSetBuilder::new();
        if !config.include_deps {
            default_builder.add(Glob::new("**/node_modules/**")?);
            default_builder.add(Glob::new("**/.venv/**")?);
            default_builder.add(Glob::new("**/venv/**")?);
            default_builder.add(Glob::new("**/__pycache__/**")?);
            default_builder.add(Glob::new("**/.ipynb_checkpoints/**")?);
            default_builder.add(Glob::new("**/dist/**")?);
            default_builder.add(Glob::new("**/build/**")?);
            default_builder.add(Glob::new("**/.git/**")?);
            default_builder.add(Glob::new("**/target/**")?);
            default_builder.add(Glob::new("**/.DS_Store")?);
        }
        let default_ignores = default_builder.build()?;

        Ok(Self {
            gitignore,
            custom_globs,
            default_ignores,
        })
    }

    /// Check if a path should be ignored
    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        let path_str = path.to_string_lossy();

        if self.default_ignores.is_match(&*path_str) {
            return true;
        }

        if self.custom_globs.is_match(&*path_str) {
            return true;
        }

        if let Some(ref gi) = self.gitignore {
            if gi.matched(path, is_dir).is_ignore() {
                return true;
            }
        }

        false
    }

    /// Check if a file's dialect passes the configured filter
    pub fn matches_dialect_filter(&self, path: &Path, filter: &Option<Vec<Dialect>>) -> bool {
        match filter {
            None => true,
            Some(dialects) => match Dialect::from_path(path) {
                Some(dialect) => dialects.contains(&dialect),
                None => false,
            },
        }
    }
}
