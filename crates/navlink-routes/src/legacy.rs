//! Legacy (module-based) route table
//!
//! Project routes carry the product module in the path
//! (`/account/{a}/{module}/orgs/{o}/projects/{p}/...`); org and account
//! routes live under the settings area.

use crate::mode::{NavMode, RouteOptions};
use crate::query::{
    environment_query, git_query, segment, service_query, template_studio_query,
};
use crate::table::{
    EnvironmentParams, PipelineStudioParams, RouteTable, TemplateStudioParams,
    TriggerDetailsParams, TriggerListParams,
};
use crate::MONITORING_MODULE;
use navlink_model::{Scope, ScopeLevel};

/// Route table for legacy navigation
#[derive(Debug, Clone)]
pub struct LegacyRoutes {
    options: RouteOptions,
}

impl LegacyRoutes {
    /// Create the table
    #[inline]
    #[must_use]
    pub fn new(options: RouteOptions) -> Self {
        Self { options }
    }

    fn prefix(&self, scope: &Scope, module: &str) -> String {
        let base = &self.options.base_path;
        let account = segment(scope.account_id());
        match (
            scope.level(),
            scope.org_id().map(segment),
            scope.project_id().map(segment),
        ) {
            (ScopeLevel::Project, Some(org), Some(project)) => {
                format!("{base}/account/{account}/{module}/orgs/{org}/projects/{project}")
            }
            (ScopeLevel::Org, Some(org), _) => {
                format!("{base}/account/{account}/settings/organizations/{org}")
            }
            _ => format!("{base}/account/{account}/settings"),
        }
    }

    fn scoped(&self, scope: &Scope) -> String {
        self.prefix(scope, &self.options.module)
    }
}

impl RouteTable for LegacyRoutes {
    fn nav_mode(&self) -> NavMode {
        NavMode::Legacy
    }

    fn landing_dashboard(&self, account_id: &str) -> String {
        let account_id = segment(account_id);
        format!(
            "{}/account/{account_id}/home/landing-dashboard",
            self.options.base_path
        )
    }

    fn connector_details(&self, scope: &Scope, connector_id: &str) -> String {
        let connector_id = segment(connector_id);
        format!(
            "{}/setup/resources/connectors/{connector_id}",
            self.scoped(scope)
        )
    }

    fn secret_details(&self, scope: &Scope, secret_id: &str) -> String {
        let secret_id = segment(secret_id);
        format!(
            "{}/setup/resources/secrets/{secret_id}/overview",
            self.scoped(scope)
        )
    }

    fn service_studio(&self, scope: &Scope, service_id: &str) -> String {
        let service_id = segment(service_id);
        service_query().append_to(format!("{}/services/{service_id}", self.scoped(scope)))
    }

    fn environments(&self, scope: &Scope) -> String {
        format!("{}/environments", self.scoped(scope))
    }

    fn environment_details(&self, params: &EnvironmentParams<'_>) -> String {
        environment_query(params).append_to(format!(
            "{}/environments/{}/details",
            self.scoped(params.scope),
            segment(params.environment_id)
        ))
    }

    fn environment_group_details(&self, scope: &Scope, group_id: &str) -> String {
        let group_id = segment(group_id);
        format!(
            "{}/environments/groups/{group_id}/details",
            self.scoped(scope)
        )
    }

    fn monitored_service_edit(&self, scope: &Scope, identifier: &str) -> String {
        let identifier = segment(identifier);
        format!(
            "{}/monitoringservices/edit/{identifier}",
            self.prefix(scope, MONITORING_MODULE)
        )
    }

    fn pipelines(&self, scope: &Scope) -> String {
        format!("{}/pipelines", self.scoped(scope))
    }

    fn pipeline_studio(&self, params: &PipelineStudioParams<'_>) -> String {
        git_query(&params.git).append_to(format!(
            "{}/pipelines/{}/pipeline-studio/",
            self.scoped(params.scope),
            segment(params.pipeline_id)
        ))
    }

    fn triggers(&self, params: &TriggerListParams<'_>) -> String {
        format!(
            "{}/pipelines/{}/triggers",
            self.scoped(params.scope),
            segment(params.pipeline_id)
        )
    }

    fn trigger_details(&self, params: &TriggerDetailsParams<'_>) -> String {
        git_query(&params.git).append_to(format!(
            "{}/pipelines/{}/triggers/{}/detail",
            self.scoped(params.scope),
            segment(params.pipeline_id),
            segment(params.trigger_id)
        ))
    }

    fn templates(&self, scope: &Scope) -> String {
        format!("{}/setup/resources/templates", self.scoped(scope))
    }

    fn template_studio(&self, params: &TemplateStudioParams<'_>) -> String {
        template_studio_query(params).append_to(format!(
            "{}/setup/resources/template-studio/{}/template/{}/",
            self.scoped(params.scope),
            segment(params.template_type),
            segment(params.template_id)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::GitRouteParams;
    use navlink_model::StoreType;
    use pretty_assertions::assert_eq;

    fn routes() -> LegacyRoutes {
        LegacyRoutes::new(RouteOptions::default())
    }

    fn project() -> Scope {
        Scope::project("a", "o", "p").unwrap()
    }

    #[test]
    fn project_prefix_carries_module() {
        assert_eq!(
            routes().connector_details(&project(), "c1"),
            "/account/a/cd/orgs/o/projects/p/setup/resources/connectors/c1"
        );
    }

    #[test]
    fn org_and_account_prefixes() {
        let org = Scope::org("a", "o").unwrap();
        let account = Scope::account("a").unwrap();
        assert_eq!(
            routes().secret_details(&org, "s1"),
            "/account/a/settings/organizations/o/setup/resources/secrets/s1/overview"
        );
        assert_eq!(
            routes().templates(&account),
            "/account/a/settings/setup/resources/templates"
        );
    }

    #[test]
    fn monitored_service_uses_cv_module() {
        assert_eq!(
            routes().monitored_service_edit(&project(), "ms1"),
            "/account/a/cv/orgs/o/projects/p/monitoringservices/edit/ms1"
        );
    }

    #[test]
    fn environment_with_infrastructure_section() {
        let scope = project();
        let url = routes().environment_details(&EnvironmentParams {
            scope: &scope,
            environment_id: "env1",
            infrastructure_id: Some("infra1"),
        });
        assert_eq!(
            url,
            "/account/a/cd/orgs/o/projects/p/environments/env1/details?sectionId=INFRASTRUCTURE&infrastructureId=infra1"
        );
    }

    #[test]
    fn pipeline_studio_remote() {
        let scope = project();
        let url = routes().pipeline_studio(&PipelineStudioParams {
            scope: &scope,
            pipeline_id: "p1",
            git: GitRouteParams {
                store_type: StoreType::Remote,
                connector_ref: Some("conn1"),
                repo_name: Some("repo1"),
                branch: None,
            },
        });
        assert_eq!(
            url,
            "/account/a/cd/orgs/o/projects/p/pipelines/p1/pipeline-studio/?storeType=REMOTE&connectorRef=conn1&repoName=repo1"
        );
    }

    #[test]
    fn base_path_and_module_are_honoured() {
        let routes = LegacyRoutes::new(
            RouteOptions::default()
                .with_base_path("/ng")
                .with_module("ci"),
        );
        assert_eq!(
            routes.pipelines(&project()),
            "/ng/account/a/ci/orgs/o/projects/p/pipelines"
        );
        assert_eq!(
            routes.landing_dashboard("a"),
            "/ng/account/a/home/landing-dashboard"
        );
    }
}
