use crate::error::{MetadataError, Result};
use crate::mutation::MutationSpec;
use crate::patch::{MetadataPatch, PatchRequest};
use crate::resolver;
use crate::transport::{resource_path, Transport};
use crate::types::{MetadataKind, Resource};

/// Send a minimal patch for one mapping of an already resolved resource
/// and return the resource as the API reports it afterwards.
///
/// There is no concurrency token: a change made by someone else between
/// the lookup and this call is overwritten key by key.
pub fn update<T: Transport + ?Sized>(
    transport: &T,
    resource: &str,
    guid: &str,
    kind: MetadataKind,
    spec: &MutationSpec,
) -> Result<Resource> {
    let patch = MetadataPatch::from_mutation(kind, spec);
    let body = serde_json::to_string(&PatchRequest { metadata: &patch })
        .map_err(|e| MetadataError::UpdateFailed(format!("failed to encode patch: {}", e)))?;

    let path = resource_path(resource, guid);
    tracing::debug!(%path, %body, "Patching metadata");

    let response = transport
        .patch(&path, &body)
        .map_err(|e| MetadataError::UpdateFailed(format!("{:#}", e)))?;

    let updated: Resource = serde_json::from_str(&response).map_err(|e| {
        MetadataError::UpdateFailed(format!("invalid response from {}: {}", path, e))
    })?;

    tracing::info!(
        resource,
        guid,
        set = spec.adds().len(),
        removed = spec.removes().len(),
        "Updated {}",
        kind.field()
    );

    Ok(updated)
}

/// Resolve `name` and then patch it. The lookup always completes before
/// anything is sent, so an ambiguous name never gets modified.
pub fn set_metadata<T: Transport + ?Sized>(
    transport: &T,
    resource: &str,
    name: &str,
    kind: MetadataKind,
    spec: &MutationSpec,
) -> Result<Resource> {
    let current = resolver::resolve(transport, resource, name)?;
    update(transport, resource, &current.guid, kind, spec)
}
