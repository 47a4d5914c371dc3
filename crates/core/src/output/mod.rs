mod artifacts;
mod json;
mod yaml;

pub use artifacts::{build_skeleton, install_manifest};
pub use json::to_json;
pub use yaml::to_yaml;

use crate::models::ProjectAggregate;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Report,
    Json,
    Yaml,
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Format a finalized aggregate according to the requested format
pub fn format_output(
    aggregate: &ProjectAggregate,
    format: OutputFormat,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => to_json(aggregate),
        OutputFormat::Yaml => to_yaml(aggregate),
        OutputFormat::Report => Ok(render_report(aggregate)),
    }
}

/// Human-readable report: per-file listings, category summary, scan
/// counters, and the derived artifacts. Pure formatting — every
/// classification decision was already made upstream.
pub fn render_report(aggregate: &ProjectAggregate) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Dependency Inventory\n\
         ====================\n\
         Root: {}\n\n",
        aggregate.root.display()
    ));

    for file in &aggregate.files {
        output.push_str(&format!("File: {}\n", file.path.display()));
        for diagnostic in &file.diagnostics {
            output.push_str(&format!("  ! {diagnostic}\n"));
        }
        for token in &file.tokens {
            match &token.license {
                Some(record) => output.push_str(&format!(
                    "  {} -> {} ({})\n",
                    token.raw, token.category, record.license
                )),
                None => output.push_str(&format!("  {} -> {}\n", token.raw, token.category)),
            }
        }
        output.push('\n');
    }

    output.push_str("Category Summary\n----------------\n");
    if aggregate.summary.is_empty() {
        output.push_str("(no dependencies found)\n");
    }
    for group in &aggregate.summary {
        output.push_str(&format!("{}:\n", group.category));
        for entry in &group.tokens {
            match &entry.license {
                Some(record) => {
                    output.push_str(&format!("  - {} ({})\n", entry.name, record.license))
                }
                None => output.push_str(&format!("  - {}\n", entry.name)),
            }
        }
    }
    output.push('\n');

    output.push_str(&format!(
        "Files Scanned: {} (python: {}, notebook: {}, header: {})\n\
         Tokens Found: {} (standard library: {}, third-party: {}, local or third-party: {}, \
         local or missing: {}, unknown: {})\n",
        aggregate.stats.total_files,
        aggregate.stats.python_files,
        aggregate.stats.notebook_files,
        aggregate.stats.header_files,
        aggregate.stats.total_tokens,
        aggregate.stats.standard_library,
        aggregate.stats.third_party,
        aggregate.stats.local_or_third_party,
        aggregate.stats.local_or_missing,
        aggregate.stats.unknown,
    ));

    if !aggregate.notes.is_empty() {
        output.push_str("\nNotes:\n");
        for note in &aggregate.notes {
            output.push_str(&format!("  - {note}\n"));
        }
    }

    if let Some(manifest) = install_manifest(aggregate) {
        output.push_str("\nSuggested requirements.txt:\n");
        output.push_str(&manifest);
    }

    if let Some(makefile) = build_skeleton(aggregate) {
        output.push_str("\nSuggested Makefile:\n");
        output.push_str(&makefile);
    }

    output
}
