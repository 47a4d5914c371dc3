use super::FormatError;
use crate::models::ProjectAggregate;

/// Serialize the aggregate to YAML
pub fn to_yaml(aggregate: &ProjectAggregate) -> Result<String, FormatError> {
    serde_yaml::to_string(aggregate).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScanStats;
    use std::path::PathBuf;

    #[test]
    fn test_to_yaml() {
        let aggregate = ProjectAggregate {
            root: PathBuf::from("/test"),
            files: vec![],
            summary: vec![],
            stats: ScanStats::default(),
            notes: vec![],
            compiled_sources: vec![],
        };

        let yaml = to_yaml(&aggregate).unwrap();
        assert!(yaml.contains("root:"));
        assert!(yaml.contains("summary:"));
    }
}
