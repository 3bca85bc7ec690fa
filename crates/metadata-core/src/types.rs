use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Read-side metadata mapping. Sorted so rendering is stable.
pub type MetadataMap = BTreeMap<String, String>;

/// Which of the two metadata mappings a command works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    Labels,
    Annotations,
}

impl MetadataKind {
    /// JSON field name inside `metadata`
    pub fn field(&self) -> &'static str {
        match self {
            MetadataKind::Labels => "labels",
            MetadataKind::Annotations => "annotations",
        }
    }

    /// Title used in display headers
    pub fn title(&self) -> &'static str {
        match self {
            MetadataKind::Labels => "Labels",
            MetadataKind::Annotations => "Annotations",
        }
    }

    /// Fixed hint carried by malformed token errors
    pub fn format_hint(&self) -> &'static str {
        match self {
            MetadataKind::Labels => "Labels must be in the format of KEY=VAL or KEY-",
            MetadataKind::Annotations => "Annotations must be in the format of KEY=VAL or KEY-",
        }
    }
}

/// Labels and annotations as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub labels: MetadataMap,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub annotations: MetadataMap,
}

impl MetadataDocument {
    pub fn get(&self, kind: MetadataKind) -> &MetadataMap {
        match kind {
            MetadataKind::Labels => &self.labels,
            MetadataKind::Annotations => &self.annotations,
        }
    }
}

/// A platform resource, reduced to its identity and metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub guid: String,

    #[serde(default)]
    pub metadata: MetadataDocument,
}

/// Envelope of the name-filtered list endpoint
#[derive(Debug, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub resources: Vec<Resource>,
}

// The API may send `null` for a whole mapping or for a single value.
// Both read as "not present".
fn null_as_empty<'de, D>(deserializer: D) -> Result<MetadataMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<String>>> = Option::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_list_parsing() {
        let json = r#"{
            "pagination": {"total_results": 1},
            "resources": [
                {
                    "guid": "a1b2",
                    "name": "myapp",
                    "metadata": {
                        "labels": {"tier": "silver"},
                        "annotations": {"contact": "ops@example.com"}
                    }
                }
            ]
        }"#;

        let list: ResourceList = serde_json::from_str(json).unwrap();
        assert_eq!(list.resources.len(), 1);

        let resource = &list.resources[0];
        assert_eq!(resource.guid, "a1b2");
        assert_eq!(resource.metadata.labels["tier"], "silver");
        assert_eq!(
            resource.metadata.get(MetadataKind::Annotations)["contact"],
            "ops@example.com"
        );
    }

    #[test]
    fn test_null_mappings_read_as_empty() {
        let json = r#"{"guid": "g", "metadata": {"labels": null, "annotations": {"a": null, "b": "2"}}}"#;

        let resource: Resource = serde_json::from_str(json).unwrap();
        assert!(resource.metadata.labels.is_empty());
        assert_eq!(resource.metadata.annotations.len(), 1);
        assert_eq!(resource.metadata.annotations["b"], "2");
    }

    #[test]
    fn test_missing_metadata_defaults() {
        let resource: Resource = serde_json::from_str(r#"{"guid": "g"}"#).unwrap();
        assert_eq!(resource.metadata, MetadataDocument::default());

        let list: ResourceList = serde_json::from_str("{}").unwrap();
        assert!(list.resources.is_empty());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(MetadataKind::Labels.field(), "labels");
        assert_eq!(MetadataKind::Annotations.title(), "Annotations");
        assert_eq!(
            MetadataKind::Labels.format_hint(),
            "Labels must be in the format of KEY=VAL or KEY-"
        );
    }
}
