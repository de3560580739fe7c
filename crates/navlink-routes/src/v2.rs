//! v2 (unified) route table
//!
//! Paths drop the module segment; every route ends with `mode=all` so the
//! unified navigation opens in its cross-module view.

use crate::mode::{NavMode, RouteOptions};
use crate::query::{
    environment_query, git_query, segment, service_query, template_studio_query,
    QueryString,
};
use crate::table::{
    EnvironmentParams, PipelineStudioParams, RouteTable, TemplateStudioParams,
    TriggerDetailsParams, TriggerListParams,
};
use navlink_model::{Scope, ScopeLevel};

/// Route table for v2 navigation
#[derive(Debug, Clone)]
pub struct V2Routes {
    options: RouteOptions,
}

impl V2Routes {
    /// Create the table
    #[inline]
    #[must_use]
    pub fn new(options: RouteOptions) -> Self {
        Self { options }
    }

    fn scoped(&self, scope: &Scope) -> String {
        let base = &self.options.base_path;
        let account = segment(scope.account_id());
        match (
            scope.level(),
            scope.org_id().map(segment),
            scope.project_id().map(segment),
        ) {
            (ScopeLevel::Project, Some(org), Some(project)) => {
                format!("{base}/account/{account}/orgs/{org}/projects/{project}")
            }
            (ScopeLevel::Org, Some(org), _) => format!("{base}/account/{account}/orgs/{org}"),
            _ => format!("{base}/account/{account}"),
        }
    }

    /// Appends `mode=all` after any route-specific parameters
    fn finish(path: String, mut query: QueryString) -> String {
        query.push("mode", "all");
        query.append_to(path)
    }
}

impl RouteTable for V2Routes {
    fn nav_mode(&self) -> NavMode {
        NavMode::V2
    }

    fn landing_dashboard(&self, account_id: &str) -> String {
        let account_id = segment(account_id);
        Self::finish(
            format!("{}/account/{account_id}/landing-dashboard", self.options.base_path),
            QueryString::new(),
        )
    }

    fn connector_details(&self, scope: &Scope, connector_id: &str) -> String {
        let connector_id = segment(connector_id);
        Self::finish(
            format!("{}/settings/connectors/{connector_id}", self.scoped(scope)),
            QueryString::new(),
        )
    }

    fn secret_details(&self, scope: &Scope, secret_id: &str) -> String {
        let secret_id = segment(secret_id);
        Self::finish(
            format!("{}/settings/secrets/{secret_id}/overview", self.scoped(scope)),
            QueryString::new(),
        )
    }

    fn service_studio(&self, scope: &Scope, service_id: &str) -> String {
        let service_id = segment(service_id);
        Self::finish(
            format!("{}/settings/services/{service_id}", self.scoped(scope)),
            service_query(),
        )
    }

    fn environments(&self, scope: &Scope) -> String {
        Self::finish(
            format!("{}/settings/environments", self.scoped(scope)),
            QueryString::new(),
        )
    }

    fn environment_details(&self, params: &EnvironmentParams<'_>) -> String {
        Self::finish(
            format!(
                "{}/settings/environments/{}/details",
                self.scoped(params.scope),
                segment(params.environment_id)
            ),
            environment_query(params),
        )
    }

    fn environment_group_details(&self, scope: &Scope, group_id: &str) -> String {
        let group_id = segment(group_id);
        Self::finish(
            format!(
                "{}/settings/environments/groups/{group_id}/details",
                self.scoped(scope)
            ),
            QueryString::new(),
        )
    }

    fn monitored_service_edit(&self, scope: &Scope, identifier: &str) -> String {
        let identifier = segment(identifier);
        Self::finish(
            format!("{}/monitoredservices/edit/{identifier}", self.scoped(scope)),
            QueryString::new(),
        )
    }

    fn pipelines(&self, scope: &Scope) -> String {
        Self::finish(format!("{}/pipelines", self.scoped(scope)), QueryString::new())
    }

    fn pipeline_studio(&self, params: &PipelineStudioParams<'_>) -> String {
        Self::finish(
            format!(
                "{}/pipelines/{}/pipeline-studio/",
                self.scoped(params.scope),
                segment(params.pipeline_id)
            ),
            git_query(&params.git),
        )
    }

    fn triggers(&self, params: &TriggerListParams<'_>) -> String {
        Self::finish(
            format!(
                "{}/pipelines/{}/triggers",
                self.scoped(params.scope),
                segment(params.pipeline_id)
            ),
            QueryString::new(),
        )
    }

    fn trigger_details(&self, params: &TriggerDetailsParams<'_>) -> String {
        Self::finish(
            format!(
                "{}/pipelines/{}/triggers/{}/detail",
                self.scoped(params.scope),
                segment(params.pipeline_id),
                segment(params.trigger_id)
            ),
            git_query(&params.git),
        )
    }

    fn templates(&self, scope: &Scope) -> String {
        Self::finish(
            format!("{}/settings/templates", self.scoped(scope)),
            QueryString::new(),
        )
    }

    fn template_studio(&self, params: &TemplateStudioParams<'_>) -> String {
        Self::finish(
            format!(
                "{}/settings/template-studio/{}/template/{}/",
                self.scoped(params.scope),
                segment(params.template_type),
                segment(params.template_id)
            ),
            template_studio_query(params),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navlink_model::StoreType;
    use pretty_assertions::assert_eq;

    fn routes() -> V2Routes {
        V2Routes::new(RouteOptions::default())
    }

    #[test]
    fn every_route_ends_with_mode_all() {
        let scope = Scope::project("a", "o", "p").unwrap();
        assert_eq!(
            routes().pipelines(&scope),
            "/account/a/orgs/o/projects/p/pipelines?mode=all"
        );
        assert_eq!(
            routes().landing_dashboard("a"),
            "/account/a/landing-dashboard?mode=all"
        );
    }

    #[test]
    fn service_tab_precedes_mode() {
        let scope = Scope::org("a", "o").unwrap();
        assert_eq!(
            routes().service_studio(&scope, "svc"),
            "/account/a/orgs/o/settings/services/svc?tab=configuration&mode=all"
        );
    }

    #[test]
    fn template_studio_writes_empty_version_and_branch() {
        let scope = Scope::account("a").unwrap();
        let url = routes().template_studio(&TemplateStudioParams {
            scope: &scope,
            template_id: "t1",
            template_type: "Stage",
            version_label: "",
            branch: "",
            store_type: StoreType::Inline,
            connector_ref: None,
            repo_name: None,
        });
        assert_eq!(
            url,
            "/account/a/settings/template-studio/Stage/template/t1/?versionLabel=&branch=&storeType=INLINE&mode=all"
        );
    }
}
