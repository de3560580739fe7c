//! Entity URL resolution
//!
//! Maps an [`EntityReference`] to the route a user lands on when clicking it.
//! Most entity kinds route straight from their identifiers. Pipelines,
//! triggers and templates first look up where they are stored, because a
//! git-backed entity can only be opened with its connector and repository.
//!
//! Whenever storage cannot be established the resolver links the matching
//! list page instead of a detail page; a list page is always navigable.

use crate::client::{
    MetadataClient, PipelineSummaryRequest, PipelineSummaryResponse, TemplateListRequest,
};
use crate::config::{FailurePolicy, ResolverConfig};
use crate::error::{LookupError, ResolveError};
use navlink_model::{non_empty, EntityReference, EntityType, StorageMetadata};
use navlink_routes::{
    EnvironmentParams, GitRouteParams, NavMode, PipelineStudioParams, RouteTable,
    TemplateStudioParams, TriggerDetailsParams, TriggerListParams,
};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Kind of page a link opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// The referenced entity itself
    Detail,
    /// A list the entity belongs to
    List,
    /// Account landing dashboard
    Landing,
}

/// Why a detail page could not be linked
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum FallbackReason {
    /// Lookup failed and the failure policy degrades
    LookupFailed(String),
    /// Lookup answered with a non-success status
    NonSuccessStatus,
    /// Lookup succeeded without a usable store type
    MissingStoreType,
    /// Template lookup returned no entries
    EmptyResult,
    /// Template lookup returned no template entity type
    MissingTemplateType,
    /// Trigger or infrastructure reference without its owner
    MissingParent,
    /// Entity kind is not routable
    UnknownEntityType,
}

/// A resolved link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    /// Route to navigate to
    pub url: String,
    /// Kind of page
    pub kind: LinkKind,
    /// Set whenever a detail page was wanted but could not be linked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackReason>,
}

impl ResolvedLink {
    fn detail(url: String) -> Self {
        Self {
            url,
            kind: LinkKind::Detail,
            fallback: None,
        }
    }

    fn list(url: String, reason: FallbackReason) -> Self {
        Self {
            url,
            kind: LinkKind::List,
            fallback: Some(reason),
        }
    }

    /// Whether the resolver had to settle for a list or landing page
    #[inline]
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Outcome of a pipeline storage lookup
enum Storage {
    Known(StorageMetadata),
    Unknown(FallbackReason),
}

/// What a reference needs before it can be routed
enum Dispatch<'a> {
    Direct(ResolvedLink),
    Pipeline,
    Trigger { pipeline_id: &'a str },
    Template,
}

/// Resolves entity references into routes
///
/// The route table is fixed at construction; callers never pass the
/// navigation mode per call. Resolutions share no mutable state and can run
/// concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use navlink_resolver::{EntityUrlResolver, HttpMetadataClient, ResolverConfig};
///
/// let config = ResolverConfig::load("navlink.toml")?;
/// let client = HttpMetadataClient::new(&config.api)?;
/// let resolver = EntityUrlResolver::from_config(Arc::new(client), &config);
///
/// let url = resolver.resolve(&reference).await?;
/// ```
#[derive(Clone)]
pub struct EntityUrlResolver {
    client: Arc<dyn MetadataClient>,
    routes: Arc<dyn RouteTable>,
    failure_policy: FailurePolicy,
    lookup_timeout: Duration,
}

impl fmt::Debug for EntityUrlResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityUrlResolver")
            .field("routes", &self.routes)
            .field("failure_policy", &self.failure_policy)
            .field("lookup_timeout", &self.lookup_timeout)
            .finish_non_exhaustive()
    }
}

impl EntityUrlResolver {
    /// Create a resolver with default policy and timeout
    #[must_use]
    pub fn new(client: Arc<dyn MetadataClient>, routes: Arc<dyn RouteTable>) -> Self {
        let defaults = ResolverConfig::default();
        Self {
            client,
            routes,
            failure_policy: defaults.failure_policy,
            lookup_timeout: defaults.lookup_timeout(),
        }
    }

    /// Create a resolver with the route table and policies from `config`
    #[must_use]
    pub fn from_config(client: Arc<dyn MetadataClient>, config: &ResolverConfig) -> Self {
        let routes = config.nav_mode.route_table(config.route_options());
        Self::new(client, routes)
            .with_failure_policy(config.failure_policy)
            .with_lookup_timeout(config.lookup_timeout())
    }

    /// With failure policy
    #[inline]
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// With lookup timeout
    #[inline]
    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Navigation mode of the route table
    #[inline]
    #[must_use]
    pub fn nav_mode(&self) -> NavMode {
        self.routes.nav_mode()
    }

    /// Route table in use
    #[inline]
    #[must_use]
    pub fn routes(&self) -> &dyn RouteTable {
        self.routes.as_ref()
    }

    /// Resolve a reference to its route
    ///
    /// # Errors
    /// Only under [`FailurePolicy::Propagate`], when a pipeline or trigger
    /// lookup fails outright.
    pub async fn resolve(&self, reference: &EntityReference) -> Result<String, ResolveError> {
        self.resolve_link(reference).await.map(|link| link.url)
    }

    /// Resolve a reference, reporting what kind of page was linked and why
    ///
    /// # Errors
    /// As [`EntityUrlResolver::resolve`].
    pub async fn resolve_link(
        &self,
        reference: &EntityReference,
    ) -> Result<ResolvedLink, ResolveError> {
        tracing::debug!(
            entity_type = %reference.entity_type,
            identifier = %reference.identifier,
            scope = %reference.scope,
            "resolving entity link"
        );

        let link = match self.dispatch(reference) {
            Dispatch::Direct(link) => link,
            Dispatch::Pipeline => self.resolve_pipeline(reference).await?,
            Dispatch::Trigger { pipeline_id } => {
                self.resolve_trigger(reference, pipeline_id).await?
            }
            Dispatch::Template => self.resolve_template(reference).await,
        };

        if let Some(reason) = &link.fallback {
            tracing::debug!(?reason, url = %link.url, "linked fallback page");
        }
        Ok(link)
    }

    /// Resolve a reference without any lookup
    ///
    /// Returns `None` for references that need storage metadata first.
    #[must_use]
    pub fn resolve_sync(&self, reference: &EntityReference) -> Option<ResolvedLink> {
        match self.dispatch(reference) {
            Dispatch::Direct(link) => Some(link),
            _ => None,
        }
    }

    /// Resolve a batch concurrently, preserving input order
    pub async fn resolve_many(
        &self,
        references: &[EntityReference],
    ) -> Vec<Result<ResolvedLink, ResolveError>> {
        futures::future::join_all(references.iter().map(|r| self.resolve_link(r))).await
    }

    fn dispatch<'a>(&self, reference: &'a EntityReference) -> Dispatch<'a> {
        let scope = &reference.scope;
        let id = reference.identifier.as_str();
        let routes = self.routes.as_ref();

        let link = match reference.entity_type {
            EntityType::Pipelines => return Dispatch::Pipeline,
            EntityType::Template => return Dispatch::Template,
            EntityType::Triggers => match reference.parent_identifier() {
                Some(pipeline_id) => return Dispatch::Trigger { pipeline_id },
                None => ResolvedLink::list(routes.pipelines(scope), FallbackReason::MissingParent),
            },
            EntityType::Connectors => ResolvedLink::detail(routes.connector_details(scope, id)),
            EntityType::Service => ResolvedLink::detail(routes.service_studio(scope, id)),
            EntityType::Secrets => ResolvedLink::detail(routes.secret_details(scope, id)),
            EntityType::Environment => {
                ResolvedLink::detail(routes.environment_details(&EnvironmentParams {
                    scope,
                    environment_id: id,
                    infrastructure_id: None,
                }))
            }
            EntityType::EnvironmentGroup => {
                ResolvedLink::detail(routes.environment_group_details(scope, id))
            }
            EntityType::Infrastructure => match reference.parent_identifier() {
                Some(environment_id) => {
                    ResolvedLink::detail(routes.environment_details(&EnvironmentParams {
                        scope,
                        environment_id,
                        infrastructure_id: Some(id),
                    }))
                }
                None => {
                    ResolvedLink::list(routes.environments(scope), FallbackReason::MissingParent)
                }
            },
            EntityType::MonitoredService => {
                ResolvedLink::detail(routes.monitored_service_edit(scope, id))
            }
            EntityType::Unknown => ResolvedLink {
                url: routes.landing_dashboard(scope.account_id()),
                kind: LinkKind::Landing,
                fallback: Some(FallbackReason::UnknownEntityType),
            },
        };
        Dispatch::Direct(link)
    }

    async fn resolve_pipeline(
        &self,
        reference: &EntityReference,
    ) -> Result<ResolvedLink, ResolveError> {
        let scope = &reference.scope;
        let link = match self.pipeline_storage(reference, &reference.identifier).await? {
            Storage::Known(metadata) => {
                ResolvedLink::detail(self.routes.pipeline_studio(&PipelineStudioParams {
                    scope,
                    pipeline_id: &reference.identifier,
                    git: GitRouteParams::from_metadata(&metadata, reference.branch()),
                }))
            }
            Storage::Unknown(reason) => ResolvedLink::list(self.routes.pipelines(scope), reason),
        };
        Ok(link)
    }

    async fn resolve_trigger(
        &self,
        reference: &EntityReference,
        pipeline_id: &str,
    ) -> Result<ResolvedLink, ResolveError> {
        let scope = &reference.scope;
        let link = match self.pipeline_storage(reference, pipeline_id).await? {
            Storage::Known(metadata) => {
                ResolvedLink::detail(self.routes.trigger_details(&TriggerDetailsParams {
                    scope,
                    pipeline_id,
                    trigger_id: &reference.identifier,
                    git: GitRouteParams::from_metadata(&metadata, reference.branch()),
                }))
            }
            Storage::Unknown(reason) => ResolvedLink::list(
                self.routes.triggers(&TriggerListParams { scope, pipeline_id }),
                reason,
            ),
        };
        Ok(link)
    }

    /// Storage of `pipeline_id`, applying the failure policy to lookup errors
    async fn pipeline_storage(
        &self,
        reference: &EntityReference,
        pipeline_id: &str,
    ) -> Result<Storage, ResolveError> {
        let request = PipelineSummaryRequest::metadata_only(pipeline_id, reference.scope.clone());

        match self.bounded(self.client.pipeline_summary(&request)).await {
            Ok(envelope) => Ok(pipeline_storage_from(&envelope)),
            Err(source) => match self.failure_policy {
                FailurePolicy::Propagate => Err(ResolveError::Lookup {
                    entity_type: reference.entity_type,
                    identifier: pipeline_id.to_string(),
                    source,
                }),
                FailurePolicy::Degrade => {
                    tracing::warn!(
                        pipeline = %pipeline_id,
                        error = %source,
                        "pipeline lookup failed; linking list page"
                    );
                    Ok(Storage::Unknown(FallbackReason::LookupFailed(
                        source.to_string(),
                    )))
                }
            },
        }
    }

    async fn resolve_template(&self, reference: &EntityReference) -> ResolvedLink {
        let scope = &reference.scope;
        let list = |reason| ResolvedLink::list(self.routes.templates(scope), reason);

        let request = TemplateListRequest::for_identifier(&reference.identifier, scope.clone());
        let envelope = match self.bounded(self.client.template_metadata(&request)).await {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::debug!(%error, template = %reference.identifier, "template lookup failed");
                return list(FallbackReason::LookupFailed(error.to_string()));
            }
        };

        let Some(page) = envelope.success_data() else {
            return list(FallbackReason::NonSuccessStatus);
        };
        let Some(first) = page.content.first() else {
            return list(FallbackReason::EmptyResult);
        };

        let metadata = first.storage_metadata();
        if !metadata.store_type.is_definite() {
            return list(FallbackReason::MissingStoreType);
        }
        let Some(template_type) = non_empty(metadata.template_entity_type.as_deref()) else {
            return list(FallbackReason::MissingTemplateType);
        };

        ResolvedLink::detail(self.routes.template_studio(&TemplateStudioParams {
            scope,
            template_id: &reference.identifier,
            template_type,
            version_label: reference.version_label().unwrap_or_default(),
            branch: reference.branch().unwrap_or_default(),
            store_type: metadata.store_type,
            connector_ref: metadata.remote_connector_ref(),
            repo_name: metadata.remote_repo_name(),
        }))
    }

    /// Apply the lookup timeout
    async fn bounded<T>(
        &self,
        lookup: impl Future<Output = Result<T, LookupError>>,
    ) -> Result<T, LookupError> {
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout {
                timeout_ms: u64::try_from(self.lookup_timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

fn pipeline_storage_from(envelope: &PipelineSummaryResponse) -> Storage {
    if !envelope.status.is_success() {
        return Storage::Unknown(FallbackReason::NonSuccessStatus);
    }

    let metadata = envelope
        .data
        .as_ref()
        .map(|summary| summary.storage_metadata())
        .unwrap_or_default();

    if metadata.store_type.is_definite() {
        Storage::Known(metadata)
    } else {
        Storage::Unknown(FallbackReason::MissingStoreType)
    }
}
