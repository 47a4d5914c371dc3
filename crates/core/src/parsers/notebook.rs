use serde::Deserialize;

use super::{Extraction, PythonExtractor, TokenExtractor};
use crate::models::Dialect;

/// The slice of the notebook document format this tool cares about: an
/// ordered list of cells, each tagged with a type and carrying source text
/// either as a single string or as a list of lines.
#[derive(Debug, Deserialize)]
struct NotebookDoc {
    #[serde(default)]
    cells: Vec<NotebookCell>,
}

#[derive(Debug, Deserialize)]
struct NotebookCell {
    #[serde(default)]
    cell_type: String,
    #[serde(default)]
    source: CellSource,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Lines(Vec<String>),
    Text(String),
}

impl Default for CellSource {
    fn default() -> Self {
        CellSource::Lines(Vec::new())
    }
}

impl CellSource {
    fn into_text(self) -> String {
        match self {
            CellSource::Lines(lines) => lines.concat(),
            CellSource::Text(text) => text,
        }
    }
}

/// Extractor for notebook documents: filters to code cells, concatenates
/// their source in cell order, and delegates to the Python extractor.
pub struct NotebookExtractor {
    python: PythonExtractor,
}

impl NotebookExtractor {
    pub fn new() -> Self {
        Self {
            python: PythonExtractor::new(),
        }
    }
}

impl Default for NotebookExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenExtractor for NotebookExtractor {
    fn extract(&self, source: &str) -> Extraction {
        let doc: NotebookDoc = match serde_json::from_str(source) {
            Ok(doc) => doc,
            Err(err) => {
                // A document we cannot read yields zero tokens, not a crash
                return Extraction {
                    tokens: vec![],
                    diagnostics: vec![format!("malformed notebook document: {err}")],
                };
            }
        };

        let mut code = String::new();
        for cell in doc.cells {
            if cell.cell_type != "code" {
                continue;
            }
            let text = cell.source.into_text();
            if text.is_empty() {
                continue;
            }
            code.push_str(&text);
            if !text.ends_with('\n') {
                code.push('\n');
            }
        }

        // Token line numbers are relative to the concatenated code text
        self.python.extract(&code)
    }

    fn dialect(&self) -> Dialect {
        Dialect::Notebook
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_cells_only() {
        let nb = r#"{
            "cells": [
                {"cell_type": "markdown", "source": ["import fake\n"]},
                {"cell_type": "code", "source": ["import pandas\n"]}
            ]
        }"#;

        let extractor = NotebookExtractor::new();
        let extraction = extractor.extract(nb);

        assert_eq!(extraction.tokens.len(), 1);
        assert_eq!(extraction.tokens[0].name, "pandas");
        assert!(extraction.diagnostics.is_empty());
    }

    #[test]
    fn test_source_as_single_string() {
        let nb = r#"{
            "cells": [
                {"cell_type": "code", "source": "import numpy as np\nfrom os.path import join"}
            ]
        }"#;

        let extractor = NotebookExtractor::new();
        let extraction = extractor.extract(nb);

        let names: Vec<&str> = extraction.tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["numpy", "os"]);
    }

    #[test]
    fn test_cell_order_preserved() {
        let nb = r#"{
            "cells": [
                {"cell_type": "code", "source": ["import sys\n"]},
                {"cell_type": "raw", "source": ["not code\n"]},
                {"cell_type": "code", "source": ["import os"]}
            ]
        }"#;

        let extractor = NotebookExtractor::new();
        let extraction = extractor.extract(nb);

        let names: Vec<&str> = extraction.tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["sys", "os"]);
    }

    #[test]
    fn test_malformed_document_records_diagnostic() {
        let extractor = NotebookExtractor::new();
        let extraction = extractor.extract("not json at all {");

        assert!(extraction.tokens.is_empty());
        assert_eq!(extraction.diagnostics.len(), 1);
        assert!(extraction.diagnostics[0].contains("malformed notebook"));
    }

    #[test]
    fn test_document_without_cells() {
        let extractor = NotebookExtractor::new();
        let extraction = extractor.extract(r#"{"metadata": {}}"#);

        assert!(extraction.tokens.is_empty());
        assert!(extraction.diagnostics.is_empty());
    }
}
