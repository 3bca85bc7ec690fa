//! Metadata Core - label and annotation management for v3 platform resources
//!
//! This library holds everything needed to view and change the key-value
//! metadata attached to a platform resource:
//! - Parse `KEY=VAL` / `KEY-` tokens into a mutation
//! - Resolve a resource name to exactly one resource
//! - Build and send a minimal PATCH document (`null` deletes a key)
//! - Render labels and annotations for the terminal
//!
//! HTTP is not performed here. Callers supply a [`Transport`], which is the
//! host's authenticated command or HTTP facility.
//!
//! # Examples
//!
//! ```rust,ignore
//! use metadata_core::{display, updater, MetadataKind, MutationSpec};
//!
//! let spec = MutationSpec::parse(MetadataKind::Labels, &["env=prod", "tier-"])?;
//! let updated = updater::set_metadata(&transport, "app", "myapp", MetadataKind::Labels, &spec)?;
//! print!("{}", display::render(MetadataKind::Labels, "app", "myapp", &updated.metadata.labels));
//! ```

pub mod display;
pub mod error;
pub mod mutation;
pub mod patch;
pub mod resolver;
pub mod transport;
pub mod types;
pub mod updater;

// Re-export common types
pub use error::{MetadataError, Result};
pub use mutation::MutationSpec;
pub use patch::{ChangeSet, KeyChange, MetadataPatch};
pub use transport::Transport;
pub use types::{MetadataDocument, MetadataKind, MetadataMap, Resource};
