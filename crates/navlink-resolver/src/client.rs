//! Metadata lookup seam
//!
//! The resolver only needs two read-only lookups. [`MetadataClient`] is the
//! seam; [`HttpMetadataClient`](crate::HttpMetadataClient) is the production
//! implementation and tests substitute mocks or stubs.

use crate::error::LookupError;
use async_trait::async_trait;
use navlink_model::{
    PageResponse, PipelineSummary, ResponseEnvelope, Scope, TemplateSummary,
};
use serde::Serialize;

/// Envelope returned by the pipeline summary lookup
pub type PipelineSummaryResponse = ResponseEnvelope<PipelineSummary>;

/// Envelope returned by the template list-metadata lookup
pub type TemplateListResponse = ResponseEnvelope<PageResponse<TemplateSummary>>;

/// Pipeline summary lookup by identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummaryRequest {
    /// Pipeline identifier
    pub identifier: String,
    /// Scope the pipeline lives in
    pub scope: Scope,
    /// Ask the server to skip the pipeline body
    pub metadata_only: bool,
}

impl PipelineSummaryRequest {
    /// Metadata-only lookup
    #[must_use]
    pub fn metadata_only(identifier: impl Into<String>, scope: Scope) -> Self {
        Self {
            identifier: identifier.into(),
            scope,
            metadata_only: true,
        }
    }
}

/// Which template versions the list lookup considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateListType {
    /// Every version
    #[default]
    All,
    /// Only stable versions
    Stable,
    /// Only the last updated version
    LastUpdated,
}

impl TemplateListType {
    /// Query parameter value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Stable => "Stable",
            Self::LastUpdated => "LastUpdated",
        }
    }
}

/// JSON body of the template list-metadata lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFilter {
    /// Always `Template`
    pub filter_type: &'static str,
    /// Identifiers to match
    pub template_identifiers: Vec<String>,
}

/// Template list-metadata lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateListRequest {
    /// Scope to search
    pub scope: Scope,
    /// Version filter
    pub list_type: TemplateListType,
    /// Request body
    pub filter: TemplateFilter,
}

impl TemplateListRequest {
    /// Lookup of a single template across all versions
    #[must_use]
    pub fn for_identifier(identifier: impl Into<String>, scope: Scope) -> Self {
        Self {
            scope,
            list_type: TemplateListType::All,
            filter: TemplateFilter {
                filter_type: "Template",
                template_identifiers: vec![identifier.into()],
            },
        }
    }
}

/// Read-only storage metadata lookups
///
/// Implementations resolve to `Ok` whenever the server produced a decodable
/// envelope, including non-success statuses; `Err` is reserved for transport,
/// decoding and timeout failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Pipeline summary (metadata only)
    async fn pipeline_summary(
        &self,
        request: &PipelineSummaryRequest,
    ) -> Result<PipelineSummaryResponse, LookupError>;

    /// Template metadata list filtered by identifier
    async fn template_metadata(
        &self,
        request: &TemplateListRequest,
    ) -> Result<TemplateListResponse, LookupError>;
}
