use super::FormatError;
use crate::models::ProjectAggregate;

/// Serialize the aggregate to pretty-printed JSON
pub fn to_json(aggregate: &ProjectAggregate) -> Result<String, FormatError> {
    serde_json::to_string_pretty(aggregate).map_err(FormatError::from)
}
