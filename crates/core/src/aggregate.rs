use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::license::LicenseRecord;
use crate::models::{
    Category, CategoryGroup, Dialect, ProjectAggregate, ScanResult, ScanStats, TokenEntry,
};

/// Dialects sharing one classification space also share conflict tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DialectFamily {
    Scripting,
    Header,
}

impl From<Dialect> for DialectFamily {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Python | Dialect::Notebook => DialectFamily::Scripting,
            Dialect::Header => DialectFamily::Header,
        }
    }
}

#[derive(Debug, Default)]
struct EntryBuilder {
    license: Option<LicenseRecord>,
    files: BTreeSet<PathBuf>,
}

/// Merges per-file scan results into the project-wide view.
///
/// The only mutable state of a scan lives here, and only the active
/// processing step touches it. A parallel file scan would need this to
/// become a single-writer merge; nothing else in the pipeline shares state.
pub struct Aggregator {
    root: PathBuf,
    files: Vec<ScanResult>,
    groups: BTreeMap<Category, BTreeMap<String, EntryBuilder>>,
    first_seen: BTreeMap<(DialectFamily, String), Category>,
    notes: Vec<String>,
    compiled_sources: BTreeSet<PathBuf>,
}

impl Aggregator {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            files: Vec::new(),
            groups: BTreeMap::new(),
            first_seen: BTreeMap::new(),
            notes: Vec::new(),
            compiled_sources: BTreeSet::new(),
        }
    }

    /// Attach an aggregate-level diagnostic note
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Merge one file's results. A token seen in several files is recorded
    /// once per category with every contributing file retained. If the same
    /// token arrives with a different category (filesystem changed
    /// mid-scan), the first-seen classification wins and a note is attached.
    pub fn accumulate(&mut self, result: ScanResult) {
        if result.dialect.is_compiled() {
            self.compiled_sources.insert(result.path.clone());
        }

        let family = DialectFamily::from(result.dialect);
        for token in &result.tokens {
            let key = (family, token.name.clone());
            let category = match self.first_seen.get(&key) {
                Some(&seen) if seen != token.category => {
                    self.notes.push(format!(
                        "classification conflict for `{}`: keeping {}, saw {} in {}",
                        token.name,
                        seen,
                        token.category,
                        result.path.display()
                    ));
                    seen
                }
                Some(&seen) => seen,
                None => {
                    self.first_seen.insert(key, token.category);
                    token.category
                }
            };

            let entry = self
                .groups
                .entry(category)
                .or_default()
                .entry(token.name.clone())
                .or_default();
            if entry.license.is_none() {
                entry.license = token.license.clone();
            }
            entry.files.insert(result.path.clone());
        }

        self.files.push(result);
    }

    /// Freeze into the read-only aggregate the renderers consume. Category
    /// groups come out in display order, token entries alphabetically.
    pub fn finalize(self) -> ProjectAggregate {
        let stats = compute_stats(&self.files);

        let summary = self
            .groups
            .into_iter()
            .map(|(category, tokens)| CategoryGroup {
                category,
                tokens: tokens
                    .into_iter()
                    .map(|(name, builder)| TokenEntry {
                        name,
                        license: builder.license,
                        files: builder.files.into_iter().collect(),
                    })
                    .collect(),
            })
            .collect();

        ProjectAggregate {
            root: self.root,
            files: self.files,
            summary,
            stats,
            notes: self.notes,
            compiled_sources: self.compiled_sources.into_iter().collect(),
        }
    }
}

fn compute_stats(files: &[ScanResult]) -> ScanStats {
    let mut stats = ScanStats {
        total_files: files.len(),
        ..Default::default()
    };

    for file in files {
        match file.dialect {
            Dialect::Python => stats.python_files += 1,
            Dialect::Notebook => stats.notebook_files += 1,
            Dialect::Header => stats.header_files += 1,
        }

        for token in &file.tokens {
            stats.total_tokens += 1;
            match token.category {
                Category::StandardLibrary => stats.standard_library += 1,
                Category::ThirdParty => stats.third_party += 1,
                Category::LocalOrThirdParty => stats.local_or_third_party += 1,
                Category::LocalOrMissing => stats.local_or_missing += 1,
                Category::Unknown => stats.unknown += 1,
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReferenceToken;

    fn token(name: &str, category: Category) -> ReferenceToken {
        let mut token = ReferenceToken::new(name, name, None);
        token.category = category;
        token
    }

    fn result(path: &str, dialect: Dialect, tokens: Vec<ReferenceToken>) -> ScanResult {
        ScanResult {
            path: PathBuf::from(path),
            dialect,
            tokens,
            diagnostics: vec![],
        }
    }

    #[test]
    fn test_shared_token_merges_with_file_traceability() {
        let mut aggregator = Aggregator::new(PathBuf::from("."));
        aggregator.accumulate(result(
            "a.py",
            Dialect::Python,
            vec![token("numpy", Category::ThirdParty)],
        ));
        aggregator.accumulate(result(
            "b.py",
            Dialect::Python,
            vec![token("numpy", Category::ThirdParty)],
        ));

        let aggregate = aggregator.finalize();
        let third_party = aggregate.tokens_in(Category::ThirdParty);
        assert_eq!(third_party.len(), 1);
        assert_eq!(third_party[0].name, "numpy");
        assert_eq!(
            third_party[0].files,
            vec![PathBuf::from("a.py"), PathBuf::from("b.py")]
        );
    }

    #[test]
    fn test_summary_sorted_alphabetically() {
        let mut aggregator = Aggregator::new(PathBuf::from("."));
        aggregator.accumulate(result(
            "a.py",
            Dialect::Python,
            vec![
                token("zlib_ng", Category::Unknown),
                token("attrs", Category::Unknown),
                token("marshmallow", Category::Unknown),
            ],
        ));

        let aggregate = aggregator.finalize();
        let names: Vec<&str> = aggregate
            .tokens_in(Category::Unknown)
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["attrs", "marshmallow", "zlib_ng"]);
    }

    #[test]
    fn test_conflict_keeps_first_seen_and_notes() {
        let mut aggregator = Aggregator::new(PathBuf::from("."));
        aggregator.accumulate(result(
            "a.py",
            Dialect::Python,
            vec![token("mylib", Category::Unknown)],
        ));
        aggregator.accumulate(result(
            "b.py",
            Dialect::Python,
            vec![token("mylib", Category::ThirdParty)],
        ));

        let aggregate = aggregator.finalize();
        assert_eq!(aggregate.tokens_in(Category::Unknown).len(), 1);
        assert!(aggregate.tokens_in(Category::ThirdParty).is_empty());
        assert_eq!(aggregate.notes.len(), 1);
        assert!(aggregate.notes[0].contains("mylib"));
    }

    #[test]
    fn test_same_name_across_families_is_not_a_conflict() {
        // `string` is a Python stdlib module and a C++ standard header
        let mut aggregator = Aggregator::new(PathBuf::from("."));
        aggregator.accumulate(result(
            "a.py",
            Dialect::Python,
            vec![token("string", Category::StandardLibrary)],
        ));
        aggregator.accumulate(result(
            "b.cpp",
            Dialect::Header,
            vec![token("string", Category::StandardLibrary)],
        ));

        let aggregate = aggregator.finalize();
        assert!(aggregate.notes.is_empty());
        let entries = aggregate.tokens_in(Category::StandardLibrary);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].files.len(), 2);
    }

    #[test]
    fn test_compiled_sources_collected() {
        let mut aggregator = Aggregator::new(PathBuf::from("."));
        aggregator.accumulate(result("main.cpp", Dialect::Header, vec![]));
        aggregator.accumulate(result("util.h", Dialect::Header, vec![]));
        aggregator.accumulate(result("script.py", Dialect::Python, vec![]));

        let aggregate = aggregator.finalize();
        assert_eq!(
            aggregate.compiled_sources,
            vec![PathBuf::from("main.cpp"), PathBuf::from("util.h")]
        );
    }

    #[test]
    fn test_stats() {
        let mut aggregator = Aggregator::new(PathBuf::from("."));
        aggregator.accumulate(result(
            "a.py",
            Dialect::Python,
            vec![
                token("os", Category::StandardLibrary),
                token("numpy", Category::ThirdParty),
            ],
        ));
        aggregator.accumulate(result(
            "b.ipynb",
            Dialect::Notebook,
            vec![token("pandas", Category::ThirdParty)],
        ));

        let aggregate = aggregator.finalize();
        assert_eq!(aggregate.stats.total_files, 2);
        assert_eq!(aggregate.stats.python_files, 1);
        assert_eq!(aggregate.stats.notebook_files, 1);
        assert_eq!(aggregate.stats.total_tokens, 3);
        assert_eq!(aggregate.stats.standard_library, 1);
        assert_eq!(aggregate.stats.third_party, 2);
    }
}
