//! Testing utilities for navlink workspace
//!
//! Shared fixtures and a scripted [`MetadataClient`] that records every call.

#![allow(missing_docs)]

use async_trait::async_trait;
use navlink_model::{
    EntityReference, EntityType, GitDetails, PageResponse, PipelineSummary, ResponseEnvelope,
    Scope, TemplateSummary,
};
use navlink_resolver::{
    EntityUrlResolver, LookupError, MetadataClient, PipelineSummaryRequest,
    PipelineSummaryResponse, TemplateListRequest, TemplateListResponse,
};
use navlink_routes::{NavMode, RouteOptions};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted lookup client
///
/// Replies are keyed by identifier; unknown identifiers get a `FAILURE`
/// envelope, like the server's not-found answer.
#[derive(Debug, Default)]
pub struct StubMetadataClient {
    pipelines: HashMap<String, Result<PipelineSummaryResponse, LookupError>>,
    templates: HashMap<String, Result<TemplateListResponse, LookupError>>,
    delay: Option<Duration>,
    pipeline_calls: AtomicUsize,
    template_calls: AtomicUsize,
    pipeline_requests: Mutex<Vec<PipelineSummaryRequest>>,
    template_requests: Mutex<Vec<TemplateListRequest>>,
}

impl StubMetadataClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pipeline(mut self, identifier: &str, response: PipelineSummaryResponse) -> Self {
        self.pipelines.insert(identifier.to_string(), Ok(response));
        self
    }

    pub fn with_pipeline_error(mut self, identifier: &str, error: LookupError) -> Self {
        self.pipelines.insert(identifier.to_string(), Err(error));
        self
    }

    pub fn with_template(mut self, identifier: &str, response: TemplateListResponse) -> Self {
        self.templates.insert(identifier.to_string(), Ok(response));
        self
    }

    pub fn with_template_error(mut self, identifier: &str, error: LookupError) -> Self {
        self.templates.insert(identifier.to_string(), Err(error));
        self
    }

    /// Delay every reply, for timeout and concurrency tests
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn pipeline_calls(&self) -> usize {
        self.pipeline_calls.load(Ordering::SeqCst)
    }

    pub fn template_calls(&self) -> usize {
        self.template_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.pipeline_calls() + self.template_calls()
    }

    pub fn pipeline_requests(&self) -> Vec<PipelineSummaryRequest> {
        self.pipeline_requests.lock().unwrap().clone()
    }

    pub fn template_requests(&self) -> Vec<TemplateListRequest> {
        self.template_requests.lock().unwrap().clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl MetadataClient for StubMetadataClient {
    async fn pipeline_summary(
        &self,
        request: &PipelineSummaryRequest,
    ) -> Result<PipelineSummaryResponse, LookupError> {
        self.pipeline_calls.fetch_add(1, Ordering::SeqCst);
        self.pipeline_requests.lock().unwrap().push(request.clone());
        self.pause().await;

        self.pipelines
            .get(&request.identifier)
            .cloned()
            .unwrap_or_else(|| Ok(ResponseEnvelope::failure("pipeline not found")))
    }

    async fn template_metadata(
        &self,
        request: &TemplateListRequest,
    ) -> Result<TemplateListResponse, LookupError> {
        self.template_calls.fetch_add(1, Ordering::SeqCst);
        self.template_requests.lock().unwrap().push(request.clone());
        self.pause().await;

        let identifier = request
            .filter
            .template_identifiers
            .first()
            .cloned()
            .unwrap_or_default();
        self.templates
            .get(&identifier)
            .cloned()
            .unwrap_or_else(|| Ok(ResponseEnvelope::success(PageResponse::of(Vec::new()))))
    }
}

pub fn project_scope() -> Scope {
    Scope::project("a", "o", "p").unwrap()
}

pub fn entity(kind: EntityType, identifier: &str) -> EntityReference {
    EntityReference::new(kind, identifier, project_scope()).unwrap()
}

pub fn inline_pipeline() -> PipelineSummaryResponse {
    ResponseEnvelope::success(PipelineSummary {
        store_type: Some("INLINE".to_string()),
        ..PipelineSummary::default()
    })
}

pub fn remote_pipeline(connector_ref: &str, repo_name: &str) -> PipelineSummaryResponse {
    ResponseEnvelope::success(PipelineSummary {
        store_type: Some("REMOTE".to_string()),
        connector_ref: Some(connector_ref.to_string()),
        git_details: Some(GitDetails {
            repo_name: Some(repo_name.to_string()),
            ..GitDetails::default()
        }),
        ..PipelineSummary::default()
    })
}

/// Successful summary without a store type, as legacy records return
pub fn legacy_pipeline() -> PipelineSummaryResponse {
    ResponseEnvelope::success(PipelineSummary::default())
}

pub fn template_page(store_type: &str, template_entity_type: &str) -> TemplateListResponse {
    ResponseEnvelope::success(PageResponse::of(vec![TemplateSummary {
        store_type: Some(store_type.to_string()),
        template_entity_type: Some(template_entity_type.to_string()),
        ..TemplateSummary::default()
    }]))
}

/// Template page whose single entry also names a git connector and repository
pub fn stored_template_page(
    store_type: &str,
    template_entity_type: &str,
    connector_ref: &str,
    repo_name: &str,
) -> TemplateListResponse {
    ResponseEnvelope::success(PageResponse::of(vec![TemplateSummary {
        store_type: Some(store_type.to_string()),
        template_entity_type: Some(template_entity_type.to_string()),
        connector_ref: Some(connector_ref.to_string()),
        git_details: Some(GitDetails {
            repo_name: Some(repo_name.to_string()),
            ..GitDetails::default()
        }),
        ..TemplateSummary::default()
    }]))
}

pub fn empty_template_page() -> TemplateListResponse {
    ResponseEnvelope::success(PageResponse::of(Vec::new()))
}

/// Resolver over `stub` with default route options
pub fn resolver_with(stub: &Arc<StubMetadataClient>, mode: NavMode) -> EntityUrlResolver {
    let client: Arc<dyn MetadataClient> = Arc::clone(stub) as Arc<dyn MetadataClient>;
    EntityUrlResolver::new(client, mode.route_table(RouteOptions::default()))
}
