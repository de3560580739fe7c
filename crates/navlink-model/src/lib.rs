//! navlink model
//!
//! Typed inputs and lookup payloads for resolving cross-entity references:
//! - [`EntityReference`]: what a rendered mention points at
//! - [`Scope`]: the account / org / project tenancy the entity lives in
//! - [`StorageMetadata`]: where a fetched entity is stored (inline or git)
//! - Wire envelopes returned by the pipeline and template lookups
//!
//! # Example
//!
//! ```
//! use navlink_model::{EntityReference, EntityType, Scope};
//!
//! let scope = Scope::project("acc", "org", "proj").unwrap();
//! let reference = EntityReference::new(EntityType::Pipelines, "build", scope)
//!     .unwrap()
//!     .with_branch("main");
//!
//! assert_eq!(reference.branch(), Some("main"));
//! ```

#![warn(unreachable_pub)]

pub mod entity;
pub mod error;
pub mod metadata;
pub mod scope;

pub use entity::{EntityReference, EntityType};
pub use error::ModelError;
pub use metadata::{
    GitDetails, PageResponse, PipelineSummary, ResponseEnvelope, ResponseStatus,
    StorageMetadata, StoreType, TemplateSummary,
};
pub use scope::{Scope, ScopeLevel};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Treat empty strings the same as absent values
#[inline]
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
