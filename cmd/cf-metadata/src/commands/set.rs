use anyhow::Result;
use metadata_core::{updater, MetadataKind, MutationSpec, Transport};
use std::io::Write;

use super::get::write_kind;
use super::Target;
use crate::utils::spinner;
use crate::OutputFormat;

/// Apply a parsed mutation and show the mapping the server returned
pub fn apply<T: Transport + ?Sized>(
    transport: &T,
    kind: MetadataKind,
    target: Target<'_>,
    spec: &MutationSpec,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let _spinner = spinner::new(&format!(
        "Updating {} for {} {}...",
        kind.field(),
        target.resource,
        target.name
    ));

    let updated = updater::set_metadata(transport, target.resource, target.name, kind, spec)?;

    drop(_spinner);

    write_kind(out, output, kind, target, &updated.metadata)
}
