//! Storage metadata and lookup payloads
//!
//! The pipeline summary and template metadata lookups answer one question for
//! the resolver: is the entity stored inline, or in a git repository (and if
//! so, which connector and repo)?

use crate::non_empty;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Where an entity's definition is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreType {
    /// Stored in the platform database
    Inline,
    /// Stored in a git repository behind a connector
    Remote,
    /// Missing, empty or unrecognized; records that predate the field
    #[default]
    Unspecified,
}

impl StoreType {
    /// Interpret a wire value
    ///
    /// Only `INLINE` and `REMOTE` are definite; everything else, including
    /// the empty string, is [`StoreType::Unspecified`].
    #[must_use]
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("INLINE") => Self::Inline,
            Some("REMOTE") => Self::Remote,
            _ => Self::Unspecified,
        }
    }

    /// Wire value, if definite
    #[must_use]
    pub const fn as_wire(self) -> Option<&'static str> {
        match self {
            Self::Inline => Some("INLINE"),
            Self::Remote => Some("REMOTE"),
            Self::Unspecified => None,
        }
    }

    /// Whether a detail page can be linked for this store type
    #[inline]
    #[must_use]
    pub const fn is_definite(self) -> bool {
        !matches!(self, Self::Unspecified)
    }
}

impl Display for StoreType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire().unwrap_or("UNSPECIFIED"))
    }
}

/// Storage facts learned from a lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageMetadata {
    /// Inline, remote or unknown
    pub store_type: StoreType,
    /// Git connector (remote only)
    pub connector_ref: Option<String>,
    /// Repository name (remote only)
    pub repo_name: Option<String>,
    /// Template sub-kind (template lookups only)
    pub template_entity_type: Option<String>,
}

impl StorageMetadata {
    /// Metadata for an inline entity
    #[must_use]
    pub fn inline() -> Self {
        Self {
            store_type: StoreType::Inline,
            ..Self::default()
        }
    }

    /// Metadata for a git-backed entity
    #[must_use]
    pub fn remote(connector_ref: impl Into<String>, repo_name: impl Into<String>) -> Self {
        Self {
            store_type: StoreType::Remote,
            connector_ref: Some(connector_ref.into()),
            repo_name: Some(repo_name.into()),
            template_entity_type: None,
        }
    }

    /// Connector ref, only when remote and non-empty
    #[must_use]
    pub fn remote_connector_ref(&self) -> Option<&str> {
        match self.store_type {
            StoreType::Remote => non_empty(self.connector_ref.as_deref()),
            _ => None,
        }
    }

    /// Repository name, only when remote and non-empty
    #[must_use]
    pub fn remote_repo_name(&self) -> Option<&str> {
        match self.store_type {
            StoreType::Remote => non_empty(self.repo_name.as_deref()),
            _ => None,
        }
    }
}

/// Outcome flag carried by every lookup response
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponseStatus {
    /// `SUCCESS`
    Success,
    /// `FAILURE`
    Failure,
    /// `ERROR`
    Error,
    /// Any other value the server sent
    Other(String),
}

impl ResponseStatus {
    /// Whether the server reported success
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<String> for ResponseStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SUCCESS" => Self::Success,
            "FAILURE" => Self::Failure,
            "ERROR" => Self::Error,
            _ => Self::Other(value),
        }
    }
}

impl From<ResponseStatus> for String {
    fn from(value: ResponseStatus) -> Self {
        match value {
            ResponseStatus::Success => "SUCCESS".to_string(),
            ResponseStatus::Failure => "FAILURE".to_string(),
            ResponseStatus::Error => "ERROR".to_string(),
            ResponseStatus::Other(other) => other,
        }
    }
}

/// Standard `{status, data, message}` response wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<T> {
    /// Outcome flag
    pub status: ResponseStatus,
    /// Payload, usually present on success
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Server message, usually present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ResponseEnvelope<T> {
    /// Successful response carrying `data`
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    /// Failed response with a message
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Failure,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Payload, only when the status is success
    #[must_use]
    pub fn success_data(&self) -> Option<&T> {
        if self.status.is_success() {
            self.data.as_ref()
        } else {
            None
        }
    }
}

/// Git location details attached to remote entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitDetails {
    /// Repository name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    /// Branch the server resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Path of the definition file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Pipeline summary returned by the metadata-only lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    /// Pipeline identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Raw store type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_type: Option<String>,
    /// Git connector ref
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_ref: Option<String>,
    /// Git details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_details: Option<GitDetails>,
}

impl PipelineSummary {
    /// Storage facts for routing
    #[must_use]
    pub fn storage_metadata(&self) -> StorageMetadata {
        StorageMetadata {
            store_type: StoreType::from_wire(self.store_type.as_deref()),
            connector_ref: self.connector_ref.clone(),
            repo_name: self.git_details.as_ref().and_then(|g| g.repo_name.clone()),
            template_entity_type: None,
        }
    }
}

/// Template entry returned by the list-metadata lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    /// Template identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Raw store type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_type: Option<String>,
    /// Template sub-kind (`Step`, `Stage`, `Pipeline`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_entity_type: Option<String>,
    /// Version label of this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_label: Option<String>,
    /// Git connector ref
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_ref: Option<String>,
    /// Git details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_details: Option<GitDetails>,
}

impl TemplateSummary {
    /// Storage facts for routing
    #[must_use]
    pub fn storage_metadata(&self) -> StorageMetadata {
        StorageMetadata {
            store_type: StoreType::from_wire(self.store_type.as_deref()),
            connector_ref: self.connector_ref.clone(),
            repo_name: self.git_details.as_ref().and_then(|g| g.repo_name.clone()),
            template_entity_type: self.template_entity_type.clone(),
        }
    }
}

/// Paged list payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    /// Total items across pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
    /// Zero-based page index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_index: Option<u32>,
    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl<T> PageResponse<T> {
    /// Single-page response
    #[must_use]
    pub fn of(content: Vec<T>) -> Self {
        Self {
            content,
            total_elements: None,
            page_index: None,
            page_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn store_type_wire_values() {
        assert_eq!(StoreType::from_wire(Some("INLINE")), StoreType::Inline);
        assert_eq!(StoreType::from_wire(Some("REMOTE")), StoreType::Remote);
        assert_eq!(StoreType::from_wire(Some("")), StoreType::Unspecified);
        assert_eq!(StoreType::from_wire(Some("remote")), StoreType::Unspecified);
        assert_eq!(StoreType::from_wire(None), StoreType::Unspecified);
        assert!(!StoreType::Unspecified.is_definite());
    }

    #[test]
    fn pipeline_summary_from_json() {
        let json = r#"{
            "status": "SUCCESS",
            "data": {
                "storeType": "REMOTE",
                "connectorRef": "conn1",
                "gitDetails": {"repoName": "repo1"}
            }
        }"#;
        let envelope: ResponseEnvelope<PipelineSummary> = serde_json::from_str(json).unwrap();
        assert!(envelope.status.is_success());

        let metadata = envelope.success_data().unwrap().storage_metadata();
        assert_eq!(metadata, StorageMetadata::remote("conn1", "repo1"));
    }

    #[test]
    fn non_success_hides_data() {
        let json = r#"{"status": "ERROR", "data": {"storeType": "INLINE"}, "message": "nope"}"#;
        let envelope: ResponseEnvelope<PipelineSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status, ResponseStatus::Error);
        assert!(envelope.success_data().is_none());
    }

    #[test]
    fn unknown_status_kept() {
        let envelope: ResponseEnvelope<PipelineSummary> =
            serde_json::from_str(r#"{"status": "PARTIAL"}"#).unwrap();
        assert_eq!(envelope.status, ResponseStatus::Other("PARTIAL".into()));
        assert!(!envelope.status.is_success());
    }

    #[test]
    fn remote_fields_hidden_for_inline() {
        let mut metadata = StorageMetadata::remote("c", "r");
        metadata.store_type = StoreType::Inline;
        assert_eq!(metadata.remote_connector_ref(), None);
        assert_eq!(metadata.remote_repo_name(), None);
    }

    #[test]
    fn template_page_from_json() {
        let json = r#"{
            "status": "SUCCESS",
            "data": {"content": [{"storeType": "INLINE", "templateEntityType": "Step"}], "totalElements": 1}
        }"#;
        let envelope: ResponseEnvelope<PageResponse<TemplateSummary>> =
            serde_json::from_str(json).unwrap();
        let page = envelope.success_data().unwrap();
        let metadata = page.content[0].storage_metadata();
        assert_eq!(metadata.store_type, StoreType::Inline);
        assert_eq!(metadata.template_entity_type.as_deref(), Some("Step"));
    }
}
