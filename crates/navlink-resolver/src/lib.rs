//! navlink resolver
//!
//! Turns entity references into the route a user should be navigated to:
//! - Routes most entity kinds straight from their identifiers
//! - Looks up storage for pipelines, triggers and templates first
//! - Falls back to list pages when storage cannot be established
//!
//! # Example
//!
//! ```rust,ignore
//! use navlink_model::{EntityReference, EntityType, Scope};
//! use navlink_resolver::{EntityUrlResolver, HttpMetadataClient, ResolverConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ResolverConfig::new();
//! let client = HttpMetadataClient::new(&config.api)?;
//! let resolver = EntityUrlResolver::from_config(Arc::new(client), &config);
//!
//! let scope = Scope::project("acc", "org", "proj")?;
//! let reference = EntityReference::new(EntityType::Pipelines, "build", scope)?;
//! println!("{}", resolver.resolve(&reference).await?);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resolver;

pub use client::{
    MetadataClient, PipelineSummaryRequest, PipelineSummaryResponse, TemplateFilter,
    TemplateListRequest, TemplateListResponse, TemplateListType,
};
pub use config::{ApiConfig, FailurePolicy, ResolverConfig};
pub use error::{ConfigError, LookupError, ResolveError};
pub use http::HttpMetadataClient;
pub use resolver::{EntityUrlResolver, FallbackReason, LinkKind, ResolvedLink};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for resolving links
    pub use crate::{
        EntityUrlResolver, FailurePolicy, LinkKind, MetadataClient, ResolvedLink,
        ResolverConfig,
    };
    pub use navlink_model::{EntityReference, EntityType, Scope};
    pub use navlink_routes::NavMode;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
