mod header;
mod notebook;
mod python;

pub use header::HeaderExtractor;
pub use notebook::NotebookExtractor;
pub use python::PythonExtractor;

use crate::models::{Dialect, ReferenceToken};

/// Result of running an extractor over one file's text
#[derive(Debug, Default)]
pub struct Extraction {
    /// Tokens in source order, duplicates included
    pub tokens: Vec<ReferenceToken>,
    /// Non-fatal problems (e.g. a malformed notebook document)
    pub diagnostics: Vec<String>,
}

/// Trait for dialect-specific token extractors.
///
/// Extraction never fails: a line or cell that does not match the dialect's
/// grammar is skipped and extraction continues with the rest of the file.
pub trait TokenExtractor {
    fn extract(&self, source: &str) -> Extraction;

    /// The dialect this extractor handles
    fn dialect(&self) -> Dialect;
}

/// Create the extractor for the given dialect
pub fn extractor_for(dialect: Dialect) -> Box<dyn TokenExtractor> {
    match dialect {
        Dialect::Python => Box::new(PythonExtractor::new()),
        Dialect::Notebook => Box::new(NotebookExtractor::new()),
        Dialect::Header => Box::new(HeaderExtractor::new()),
    }
}
