//! Ordered query string builder
//!
//! Parameters are emitted in insertion order so identical inputs always
//! produce byte-identical URLs.

use crate::table::{EnvironmentParams, GitRouteParams, TemplateStudioParams};
use crate::{INFRASTRUCTURE_SECTION, SERVICE_CONFIGURATION_TAB};
use navlink_model::non_empty;
use url::form_urlencoded::{byte_serialize, Serializer};

/// Ordered, form-urlencoded query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    /// Empty query
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, even if its value is empty
    pub fn push(&mut self, key: &'static str, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key, value.into()));
        self
    }

    /// Append a parameter only when the value is present and non-empty
    pub fn push_opt(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = non_empty(value) {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Append `storeType`, `connectorRef`, `repoName`, `branch`
    ///
    /// Git-specific parameters are only written for remote entities.
    pub fn push_git(&mut self, git: &GitRouteParams<'_>) -> &mut Self {
        self.push_opt("storeType", git.store_type.as_wire());
        if git.is_remote() {
            self.push_opt("connectorRef", git.connector_ref);
            self.push_opt("repoName", git.repo_name);
            self.push_opt("branch", git.branch);
        }
        self
    }

    /// Whether no parameter has been added
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Parameter value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Encoded form, without the leading `?`
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// `path?query`, or just `path` when there are no parameters
    #[must_use]
    pub fn append_to(&self, path: String) -> String {
        if self.is_empty() {
            path
        } else {
            format!("{path}?{}", self.encode())
        }
    }
}

/// Percent-encode one path segment
///
/// Everything except alphanumerics and `*-._` is escaped, so `/`, `?` and `#`
/// cannot split the segment. Spaces become `%20`, never `+`. The dot
/// segments `.` and `..` are escaped whole so they never navigate upwards.
pub(crate) fn segment(raw: &str) -> String {
    if matches!(raw, "." | "..") {
        return raw.replace('.', "%2E");
    }
    byte_serialize(raw.as_bytes())
        .map(|chunk| if chunk == "+" { "%20" } else { chunk })
        .collect()
}

/// `tab=configuration`
pub(crate) fn service_query() -> QueryString {
    let mut query = QueryString::new();
    query.push("tab", SERVICE_CONFIGURATION_TAB);
    query
}

/// `sectionId=INFRASTRUCTURE&infrastructureId=..` when an infra is selected
pub(crate) fn environment_query(params: &EnvironmentParams<'_>) -> QueryString {
    let mut query = QueryString::new();
    if let Some(infrastructure_id) = non_empty(params.infrastructure_id) {
        query
            .push("sectionId", INFRASTRUCTURE_SECTION)
            .push("infrastructureId", infrastructure_id);
    }
    query
}

pub(crate) fn git_query(git: &GitRouteParams<'_>) -> QueryString {
    let mut query = QueryString::new();
    query.push_git(git);
    query
}

/// `versionLabel`, `branch` (always), then store details
pub(crate) fn template_studio_query(params: &TemplateStudioParams<'_>) -> QueryString {
    let mut query = QueryString::new();
    query
        .push("versionLabel", params.version_label)
        .push("branch", params.branch)
        .push_opt("storeType", params.store_type.as_wire());
    if params.store_type == navlink_model::StoreType::Remote {
        query
            .push_opt("connectorRef", params.connector_ref)
            .push_opt("repoName", params.repo_name);
    }
    query
}
