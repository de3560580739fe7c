//! Route table trait and typed route parameters

use crate::mode::NavMode;
use navlink_model::{Scope, StorageMetadata, StoreType};
use std::fmt::Debug;

/// Git storage parameters for pipeline and trigger routes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GitRouteParams<'a> {
    /// Store type; [`StoreType::Unspecified`] writes no parameters at all
    pub store_type: StoreType,
    /// Git connector (remote only)
    pub connector_ref: Option<&'a str>,
    /// Repository name (remote only)
    pub repo_name: Option<&'a str>,
    /// Branch (remote only, skipped when empty)
    pub branch: Option<&'a str>,
}

impl<'a> GitRouteParams<'a> {
    /// No storage information
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Parameters for an inline entity
    #[inline]
    #[must_use]
    pub fn inline() -> Self {
        Self {
            store_type: StoreType::Inline,
            ..Self::default()
        }
    }

    /// Parameters derived from fetched metadata plus the caller's branch
    #[must_use]
    pub fn from_metadata(metadata: &'a StorageMetadata, branch: Option<&'a str>) -> Self {
        match metadata.store_type {
            StoreType::Remote => Self {
                store_type: StoreType::Remote,
                connector_ref: metadata.remote_connector_ref(),
                repo_name: metadata.remote_repo_name(),
                branch,
            },
            other => Self {
                store_type: other,
                ..Self::default()
            },
        }
    }

    /// Whether git parameters apply
    #[inline]
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.store_type == StoreType::Remote
    }
}

/// Environment details, optionally focused on one infrastructure
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentParams<'a> {
    /// Scope
    pub scope: &'a Scope,
    /// Environment identifier
    pub environment_id: &'a str,
    /// Infrastructure to select in the infrastructure section
    pub infrastructure_id: Option<&'a str>,
}

/// Pipeline studio
#[derive(Debug, Clone, Copy)]
pub struct PipelineStudioParams<'a> {
    /// Scope
    pub scope: &'a Scope,
    /// Pipeline identifier
    pub pipeline_id: &'a str,
    /// Storage parameters
    pub git: GitRouteParams<'a>,
}

/// Triggers of one pipeline
///
/// Carries no storage parameters: the list is linked when storage is unknown.
#[derive(Debug, Clone, Copy)]
pub struct TriggerListParams<'a> {
    /// Scope
    pub scope: &'a Scope,
    /// Owning pipeline
    pub pipeline_id: &'a str,
}

/// One trigger's detail page
#[derive(Debug, Clone, Copy)]
pub struct TriggerDetailsParams<'a> {
    /// Scope
    pub scope: &'a Scope,
    /// Owning pipeline
    pub pipeline_id: &'a str,
    /// Trigger identifier
    pub trigger_id: &'a str,
    /// Storage parameters of the owning pipeline
    pub git: GitRouteParams<'a>,
}

/// Template studio
///
/// `version_label` and `branch` are always written, empty when unknown.
#[derive(Debug, Clone, Copy)]
pub struct TemplateStudioParams<'a> {
    /// Scope
    pub scope: &'a Scope,
    /// Template identifier
    pub template_id: &'a str,
    /// Template sub-kind (`Step`, `Stage`, ...)
    pub template_type: &'a str,
    /// Version label
    pub version_label: &'a str,
    /// Branch
    pub branch: &'a str,
    /// Store type of the template
    pub store_type: StoreType,
    /// Git connector (remote only)
    pub connector_ref: Option<&'a str>,
    /// Repository name (remote only)
    pub repo_name: Option<&'a str>,
}

/// Builds client-side route strings for every linkable page
///
/// Implementations must be pure: the same inputs always give the same string.
/// The two implementations encode the same pages and differ only in path
/// shape and the `mode=all` parameter.
pub trait RouteTable: Send + Sync + Debug {
    /// Mode this table serves
    fn nav_mode(&self) -> NavMode;

    /// Top-level landing dashboard
    fn landing_dashboard(&self, account_id: &str) -> String;

    /// Connector details
    fn connector_details(&self, scope: &Scope, connector_id: &str) -> String;

    /// Secret details overview
    fn secret_details(&self, scope: &Scope, secret_id: &str) -> String;

    /// Service studio on its configuration tab
    fn service_studio(&self, scope: &Scope, service_id: &str) -> String;

    /// Environments list
    fn environments(&self, scope: &Scope) -> String;

    /// Environment details
    fn environment_details(&self, params: &EnvironmentParams<'_>) -> String;

    /// Environment group details
    fn environment_group_details(&self, scope: &Scope, group_id: &str) -> String;

    /// Monitored service edit page
    fn monitored_service_edit(&self, scope: &Scope, identifier: &str) -> String;

    /// Pipelines list
    fn pipelines(&self, scope: &Scope) -> String;

    /// Pipeline studio
    fn pipeline_studio(&self, params: &PipelineStudioParams<'_>) -> String;

    /// Triggers list of a pipeline
    fn triggers(&self, params: &TriggerListParams<'_>) -> String;

    /// Trigger details
    fn trigger_details(&self, params: &TriggerDetailsParams<'_>) -> String;

    /// Templates list
    fn templates(&self, scope: &Scope) -> String;

    /// Template studio
    fn template_studio(&self, params: &TemplateStudioParams<'_>) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_params_from_inline_metadata_drop_git_fields() {
        let metadata = StorageMetadata::inline();
        let git = GitRouteParams::from_metadata(&metadata, Some("main"));
        assert_eq!(git, GitRouteParams::inline());
    }

    #[test]
    fn git_params_from_remote_metadata() {
        let metadata = StorageMetadata::remote("c1", "r1");
        let git = GitRouteParams::from_metadata(&metadata, Some("b1"));
        assert!(git.is_remote());
        assert_eq!(git.connector_ref, Some("c1"));
        assert_eq!(git.repo_name, Some("r1"));
        assert_eq!(git.branch, Some("b1"));
    }
}
