use anyhow::Result;
use metadata_core::{display, resolver, MetadataDocument, MetadataKind, Resource, Transport};
use std::io::Write;

use super::Target;
use crate::utils::spinner;
use crate::OutputFormat;

fn lookup<T: Transport + ?Sized>(transport: &T, target: Target<'_>) -> Result<Resource> {
    let _spinner = spinner::new(&format!(
        "Fetching metadata for {} {}...",
        target.resource, target.name
    ));

    Ok(resolver::resolve(transport, target.resource, target.name)?)
}

/// Show one mapping of a resource
pub fn show<T: Transport + ?Sized>(
    transport: &T,
    kind: MetadataKind,
    target: Target<'_>,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let resource = lookup(transport, target)?;
    write_kind(out, output, kind, target, &resource.metadata)
}

/// Show labels and annotations of a resource
pub fn show_all<T: Transport + ?Sized>(
    transport: &T,
    target: Target<'_>,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let resource = lookup(transport, target)?;

    match output {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&resource.metadata)?)?;
        }
        OutputFormat::Plain => {
            write!(
                out,
                "{}",
                display::render_all(target.resource, target.name, &resource.metadata)
            )?;
        }
    }

    Ok(())
}

/// Write a single mapping in the requested format
pub(crate) fn write_kind(
    out: &mut dyn Write,
    output: OutputFormat,
    kind: MetadataKind,
    target: Target<'_>,
    metadata: &MetadataDocument,
) -> Result<()> {
    let entries = metadata.get(kind);

    match output {
        OutputFormat::Json => {
            let mut doc = serde_json::Map::new();
            doc.insert(kind.field().to_string(), serde_json::to_value(entries)?);
            writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        }
        OutputFormat::Plain => {
            write!(
                out,
                "{}",
                display::render(kind, target.resource, target.name, entries)
            )?;
        }
    }

    Ok(())
}
