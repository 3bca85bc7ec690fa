use crate::error::{MetadataError, Result};
use crate::transport::{list_path, Transport};
use crate::types::{Resource, ResourceList};

/// Look up a resource by exact name and require exactly one match.
///
/// Names are not unique across every resource kind, so more than one
/// match is an error rather than a guess.
pub fn resolve<T: Transport + ?Sized>(transport: &T, resource: &str, name: &str) -> Result<Resource> {
    let path = list_path(resource, name);
    tracing::debug!(%path, "Resolving resource by name");

    let body = transport
        .get(&path)
        .map_err(|e| MetadataError::TransportFailure(format!("{:#}", e)))?;

    let mut list: ResourceList = serde_json::from_str(&body).map_err(|e| {
        MetadataError::TransportFailure(format!("invalid response from {}: {}", path, e))
    })?;

    let count = list.resources.len();
    tracing::debug!(resource, name, count, "Resource lookup returned");

    match count {
        0 => Err(MetadataError::NotFound {
            resource: resource.to_string(),
            name: name.to_string(),
        }),
        1 => Ok(list.resources.swap_remove(0)),
        _ => Err(MetadataError::AmbiguousResult {
            resource: resource.to_string(),
            name: name.to_string(),
            count,
        }),
    }
}
