use crate::types::{MetadataDocument, MetadataKind, MetadataMap};

/// Render one mapping: a header, a blank line, then `key: value` lines
/// or `None`.
pub fn render(kind: MetadataKind, resource: &str, name: &str, entries: &MetadataMap) -> String {
    let mut out = format!("{} for {} {}\n\n", kind.title(), resource, name);

    if entries.is_empty() {
        out.push_str("None\n");
    } else {
        for (key, value) in entries {
            out.push_str(&format!("{}: {}\n", key, value));
        }
    }

    out
}

/// Render labels, a blank line, then annotations
pub fn render_all(resource: &str, name: &str, metadata: &MetadataDocument) -> String {
    let mut out = render(MetadataKind::Labels, resource, name, &metadata.labels);
    out.push('\n');
    out.push_str(&render(
        MetadataKind::Annotations,
        resource,
        name,
        &metadata.annotations,
    ));
    out
}
