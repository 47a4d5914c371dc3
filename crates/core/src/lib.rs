//! Depsniff Core Library
//!
//! This library provides functionality for scanning Python, Jupyter
//! notebook, and C/C++ sources to inventory the modules and headers they
//! reference, classify each reference, and cross-reference a license table.
//!
//! # Features
//!
//! - Extract Python imports (`import`, `from ... import`) with a
//!   line-oriented grammar that tolerates incomplete sources
//! - Extract imports from notebook code cells, ignoring non-code cells
//! - Extract C/C++ `#include` directives
//! - Classify references as standard-library, third-party, local, or
//!   unknown, with licenses resolved from a CSV table
//! - Derive an install manifest and a Makefile skeleton from the results
//! - Output as a human-readable report, JSON, or YAML
//!
//! # Example
//!
//! ```no_run
//! use depsniff_core::{format_output, DependencyScanner, OutputFormat, ScanConfig};
//! use std::path::PathBuf;
//!
//! let config = ScanConfig::new(PathBuf::from("."));
//! let scanner = DependencyScanner::new(config).unwrap();
//! let aggregate = scanner.scan().unwrap();
//!
//! let report = format_output(&aggregate, OutputFormat::Report).unwrap();
//! println!("{}", report);
//! ```

pub mod aggregate;
pub mod classifier;
pub mod config;
pub mod license;
pub mod models;
pub mod output;
pub mod parsers;
pub mod scanner;

// Re-exports for convenience
pub use aggregate::Aggregator;
pub use classifier::TokenClassifier;
pub use config::ScanConfig;
pub use license::{LicenseRecord, LicenseTable};
pub use models::*;
pub use output::{
    build_skeleton, format_output, install_manifest, render_report, OutputFormat,
};
pub use scanner::{DependencyScanner, ScanError};
