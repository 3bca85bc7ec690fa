use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::mutation::MutationSpec;
use crate::types::MetadataKind;

/// What a patch does to a single key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyChange {
    /// Not mentioned; omitted from the wire form
    Keep,
    /// Set or overwrite the value
    Set(String),
    /// Remove the key; sent as `null`
    Delete,
}

static KEEP: KeyChange = KeyChange::Keep;

/// Ordered per-key changes for one metadata mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: Vec<(String, KeyChange)>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change. A later change for the same key replaces the
    /// earlier one but keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, change: KeyChange) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = change,
            None => self.entries.push((key, change)),
        }
    }

    pub fn get(&self, key: &str) -> &KeyChange {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, change)| change)
            .unwrap_or(&KEEP)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyChange)> {
        self.entries
            .iter()
            .map(|(key, change)| (key.as_str(), change))
    }

    /// True when nothing would be sent for this mapping
    pub fn is_empty(&self) -> bool {
        self.entries
            .iter()
            .all(|(_, change)| *change == KeyChange::Keep)
    }
}

impl Serialize for ChangeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, change) in &self.entries {
            match change {
                KeyChange::Keep => {}
                KeyChange::Set(value) => map.serialize_entry(key, value)?,
                KeyChange::Delete => map.serialize_entry(key, &Option::<&str>::None)?,
            }
        }
        map.end()
    }
}

/// Partial metadata document sent with PATCH. Only the mappings being
/// modified are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<ChangeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<ChangeSet>,
}

impl MetadataPatch {
    /// Build the minimal patch for one mapping. Adds go first, then
    /// removes, so a key named in both ends up deleted.
    pub fn from_mutation(kind: MetadataKind, spec: &MutationSpec) -> Self {
        let mut changes = ChangeSet::new();
        for (key, value) in spec.adds() {
            changes.insert(key.as_str(), KeyChange::Set(value.clone()));
        }
        for key in spec.removes() {
            changes.insert(key.as_str(), KeyChange::Delete);
        }

        let mut patch = Self::default();
        match kind {
            MetadataKind::Labels => patch.labels = Some(changes),
            MetadataKind::Annotations => patch.annotations = Some(changes),
        }
        patch
    }

    pub fn changes(&self, kind: MetadataKind) -> Option<&ChangeSet> {
        match kind {
            MetadataKind::Labels => self.labels.as_ref(),
            MetadataKind::Annotations => self.annotations.as_ref(),
        }
    }
}

/// Request body for `PATCH /v3/{resource}s/{guid}`
#[derive(Debug, Serialize)]
pub struct PatchRequest<'a> {
    pub metadata: &'a MetadataPatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(tokens: &[&str]) -> MutationSpec {
        MutationSpec::parse(MetadataKind::Labels, tokens).unwrap()
    }

    #[test]
    fn test_patch_serializes_only_changed_mapping() {
        let patch = MetadataPatch::from_mutation(MetadataKind::Labels, &spec(&["tier=gold", "owner-"]));

        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"labels":{"tier":"gold","owner":null}}"#
        );
    }

    #[test]
    fn test_annotations_patch() {
        let patch =
            MetadataPatch::from_mutation(MetadataKind::Annotations, &spec(&["tier=gold", "owner-"]));

        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"annotations":{"tier":"gold","owner":null}}"#
        );
        assert!(patch.changes(MetadataKind::Labels).is_none());
    }

    #[test]
    fn test_remove_after_add_deletes_key() {
        let patch = MetadataPatch::from_mutation(MetadataKind::Labels, &spec(&["tier-", "tier=gold"]));
        let changes = patch.changes(MetadataKind::Labels).unwrap();

        assert_eq!(changes.get("tier"), &KeyChange::Delete);
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"labels":{"tier":null}}"#
        );
    }

    #[test]
    fn test_keep_is_never_serialized() {
        let mut changes = ChangeSet::new();
        changes.insert("a", KeyChange::Keep);
        changes.insert("b", KeyChange::Set("2".to_string()));

        assert_eq!(serde_json::to_string(&changes).unwrap(), r#"{"b":"2"}"#);
        assert_eq!(changes.get("a"), &KeyChange::Keep);
        assert_eq!(changes.get("missing"), &KeyChange::Keep);
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_empty_change_set() {
        let mut changes = ChangeSet::new();
        assert!(changes.is_empty());

        changes.insert("a", KeyChange::Keep);
        assert!(changes.is_empty());
        assert_eq!(serde_json::to_string(&changes).unwrap(), "{}");
    }

    #[test]
    fn test_request_wraps_patch_in_metadata() {
        let patch = MetadataPatch::from_mutation(MetadataKind::Labels, &spec(&["env=prod"]));
        let body = serde_json::to_value(PatchRequest { metadata: &patch }).unwrap();

        assert_eq!(body, serde_json::json!({"metadata": {"labels": {"env": "prod"}}}));
    }
}
