use regex::Regex;

use super::{Extraction, TokenExtractor};
use crate::models::{Dialect, ReferenceToken};

/// Extractor for C/C++ `#include` directives.
///
/// Purely textual: no macro expansion and no conditional-compilation
/// evaluation, so an include behind a false `#ifdef` branch is still
/// reported. That over-reporting is the intended trade-off.
pub struct HeaderExtractor {
    include_re: Regex,
}

impl HeaderExtractor {
    pub fn new() -> Self {
        let include_re =
            Regex::new(r#"^\s*#\s*include\s*[<"]([^">]+)[">]"#).expect("static pattern");
        Self { include_re }
    }
}

impl Default for HeaderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenExtractor for HeaderExtractor {
    fn extract(&self, source: &str) -> Extraction {
        let mut extraction = Extraction::default();

        for (idx, line) in source.lines().enumerate() {
            // Single-line comment heuristic; block comments are not tracked
            if line.trim_start().starts_with("//") {
                continue;
            }
            if let Some(caps) = self.include_re.captures(line) {
                let header = caps[1].trim();
                if header.is_empty() {
                    continue;
                }
                extraction
                    .tokens
                    .push(ReferenceToken::new(header, header, Some(idx + 1)));
            }
        }

        extraction
    }

    fn dialect(&self) -> Dialect {
        Dialect::Header
    }
}
