use regex::Regex;

use super::{Extraction, TokenExtractor};
use crate::models::{Dialect, ReferenceToken};

/// Line-oriented extractor for Python import statements.
///
/// Applies the import grammar as a per-line pattern match rather than a full
/// parse, so syntactically incomplete files (and notebook cell fragments)
/// still yield the imports that are textually present.
pub struct PythonExtractor {
    import_re: Regex,
    from_re: Regex,
}

impl PythonExtractor {
    pub fn new() -> Self {
        // `import a.b as c, d` — the clause list is split manually below
        let import_re = Regex::new(r"^\s*import\s+(.+)$").expect("static pattern");
        // `from a.b import x` / `from ..pkg import y`
        let from_re = Regex::new(r"^\s*from\s+([.\w]+)\s+import\b").expect("static pattern");
        Self { import_re, from_re }
    }

    /// First dotted segment after any relative-import dots; empty when the
    /// path is dots only.
    fn top_level(dotted: &str) -> &str {
        dotted
            .trim_start_matches('.')
            .split('.')
            .next()
            .unwrap_or("")
    }

    fn push_token(tokens: &mut Vec<ReferenceToken>, dotted: &str, line_no: usize) {
        let dotted = dotted.trim();
        let name = Self::top_level(dotted);
        // Discard empty tokens and clauses that are not identifiers (a
        // malformed clause is skipped, never aborts the file)
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return;
        }
        tokens.push(ReferenceToken::new(name, dotted, Some(line_no)));
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenExtractor for PythonExtractor {
    fn extract(&self, source: &str) -> Extraction {
        let mut extraction = Extraction::default();

        for (idx, line) in source.lines().enumerate() {
            let line_no = idx + 1;

            if let Some(caps) = self.from_re.captures(line) {
                Self::push_token(&mut extraction.tokens, &caps[1], line_no);
                continue;
            }

            if let Some(caps) = self.import_re.captures(line) {
                // `import os, sys as system` has one clause per comma; only
                // the dotted path before any `as` names a module
                for clause in caps[1].split(',') {
                    if let Some(dotted) = clause.split_whitespace().next() {
                        Self::push_token(&mut extraction.tokens, dotted, line_no);
                    }
                }
            }
        }

        extraction
    }

    fn dialect(&self) -> Dialect {
        Dialect::Python
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_import() {
        let extractor = PythonExtractor::new();
        let extraction = extractor.extract("import os\nimport sys");

        assert_eq!(extraction.tokens.len(), 2);
        assert_eq!(extraction.tokens[0].name, "os");
        assert_eq!(extraction.tokens[0].line, Some(1));
        assert_eq!(extraction.tokens[1].name, "sys");
        assert_eq!(extraction.tokens[1].line, Some(2));
    }

    #[test]
    fn test_import_with_alias() {
        let extractor = PythonExtractor::new();
        let extraction = extractor.extract("import numpy as np");

        assert_eq!(extraction.tokens.len(), 1);
        assert_eq!(extraction.tokens[0].name, "numpy");
        assert_eq!(extraction.tokens[0].raw, "numpy");
    }

    #[test]
    fn test_comma_separated_imports() {
        let extractor = PythonExtractor::new();
        let extraction = extractor.extract("import os, sys.path, json as j");

        let names: Vec<&str> = extraction.tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["os", "sys", "json"]);
    }

    #[test]
    fn test_from_import_keeps_top_level_only() {
        let extractor = PythonExtractor::new();
        let extraction = extractor.extract("from os.path import join, exists");

        assert_eq!(extraction.tokens.len(), 1);
        assert_eq!(extraction.tokens[0].name, "os");
        assert_eq!(extraction.tokens[0].raw, "os.path");
    }

    #[test]
    fn test_relative_imports() {
        let extractor = PythonExtractor::new();
        // A dots-only path names no module; a named relative path keeps its
        // first segment
        let extraction = extractor.extract("from . import utils\nfrom ..config import Settings");

        assert_eq!(extraction.tokens.len(), 1);
        assert_eq!(extraction.tokens[0].name, "config");
    }

    #[test]
    fn test_indented_import_inside_function() {
        let extractor = PythonExtractor::new();
        let extraction = extractor.extract("def lazy():\n    import requests\n");

        assert_eq!(extraction.tokens.len(), 1);
        assert_eq!(extraction.tokens[0].name, "requests");
        assert_eq!(extraction.tokens[0].line, Some(2));
    }

    #[test]
    fn test_comment_lines_do_not_match() {
        let extractor = PythonExtractor::new();
        let extraction = extractor.extract("# import secret\nimport os  # the real one");

        assert_eq!(extraction.tokens.len(), 1);
        assert_eq!(extraction.tokens[0].name, "os");
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let extractor = PythonExtractor::new();
        let extraction = extractor.extract("import \nimport !!!\nimport os");

        assert_eq!(extraction.tokens.len(), 1);
        assert_eq!(extraction.tokens[0].name, "os");
        assert!(extraction.diagnostics.is_empty());
    }

    #[test]
    fn test_duplicates_kept_in_extraction_order() {
        let extractor = PythonExtractor::new();
        let extraction = extractor.extract("import os\nimport sys\nimport os");

        let names: Vec<&str> = extraction.tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["os", "sys", "os"]);
    }

    #[test]
    fn test_importlib_is_not_an_import_statement() {
        let extractor = PythonExtractor::new();
        let extraction = extractor.extract("importlib.reload(mod)");

        assert!(extraction.tokens.is_empty());
    }
}
