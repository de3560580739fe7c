//! Cross-table properties: the legacy and v2 tables encode the same pages.

use navlink_model::{Scope, StoreType};
use navlink_routes::{
    GitRouteParams, NavMode, PipelineStudioParams, RouteOptions, RouteTable,
    TemplateStudioParams, TriggerDetailsParams, TriggerListParams,
};
use proptest::prelude::*;
use std::sync::Arc;

fn tables() -> (Arc<dyn RouteTable>, Arc<dyn RouteTable>) {
    (
        NavMode::Legacy.route_table(RouteOptions::default()),
        NavMode::V2.route_table(RouteOptions::default()),
    )
}

/// Query pairs of a URL, without `mode=all`
fn identifying_params(url: &str) -> Vec<(String, String)> {
    let query = url.split_once('?').map_or("", |(_, q)| q);
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .filter(|(k, v)| !(k == "mode" && v == "all"))
        .collect()
}

fn has_mode_all(url: &str) -> bool {
    let query = url.split_once('?').map_or("", |(_, q)| q);
    url::form_urlencoded::parse(query.as_bytes()).any(|(k, v)| k == "mode" && v == "all")
}

fn store_type() -> impl Strategy<Value = StoreType> {
    prop_oneof![
        Just(StoreType::Inline),
        Just(StoreType::Remote),
        Just(StoreType::Unspecified),
    ]
}

proptest! {
    #[test]
    fn pipeline_studio_params_match_across_tables(
        pipeline in "[a-zA-Z_][a-zA-Z0-9_]{0,15}",
        connector in proptest::option::of("[a-z0-9.]{1,10}"),
        repo in proptest::option::of("[a-z0-9-]{1,10}"),
        branch in proptest::option::of("[a-z0-9/ _-]{0,12}"),
        store in store_type(),
    ) {
        let (legacy, v2) = tables();
        let scope = Scope::project("acc", "org", "proj").unwrap();
        let params = PipelineStudioParams {
            scope: &scope,
            pipeline_id: &pipeline,
            git: GitRouteParams {
                store_type: store,
                connector_ref: connector.as_deref(),
                repo_name: repo.as_deref(),
                branch: branch.as_deref(),
            },
        };

        let legacy_url = legacy.pipeline_studio(&params);
        let v2_url = v2.pipeline_studio(&params);

        prop_assert_eq!(identifying_params(&legacy_url), identifying_params(&v2_url));
        prop_assert!(!has_mode_all(&legacy_url));
        prop_assert!(has_mode_all(&v2_url));
    }

    #[test]
    fn template_studio_params_match_across_tables(
        template in "[a-zA-Z_][a-zA-Z0-9_]{0,15}",
        kind in prop_oneof![Just("Step"), Just("Stage"), Just("Pipeline")],
        version in "[a-zA-Z0-9.]{0,6}",
        branch in "[a-z0-9/]{0,8}",
    ) {
        let (legacy, v2) = tables();
        let scope = Scope::org("acc", "org").unwrap();
        let params = TemplateStudioParams {
            scope: &scope,
            template_id: &template,
            template_type: kind,
            version_label: &version,
            branch: &branch,
            store_type: StoreType::Inline,
            connector_ref: None,
            repo_name: None,
        };

        let legacy_params = identifying_params(&legacy.template_studio(&params));
        prop_assert_eq!(&legacy_params, &identifying_params(&v2.template_studio(&params)));
        prop_assert!(legacy_params.contains(&("versionLabel".to_string(), version.clone())));
        prop_assert!(legacy_params.contains(&("branch".to_string(), branch.clone())));
    }
}

#[test]
fn trigger_details_embed_pipeline_in_both_tables() {
    let (legacy, v2) = tables();
    let scope = Scope::project("a", "o", "p").unwrap();
    let params = TriggerDetailsParams {
        scope: &scope,
        pipeline_id: "pipe1",
        trigger_id: "trig1",
        git: GitRouteParams::inline(),
    };

    for table in [legacy, v2] {
        let url = table.trigger_details(&params);
        assert!(url.contains("/pipelines/pipe1/triggers/trig1/detail"), "{url}");
    }
}

#[test]
fn every_page_differs_only_by_mode_param() {
    let (legacy, v2) = tables();
    let scope = Scope::project("a", "o", "p").unwrap();

    let pairs = [
        (legacy.connector_details(&scope, "x"), v2.connector_details(&scope, "x")),
        (legacy.secret_details(&scope, "x"), v2.secret_details(&scope, "x")),
        (legacy.service_studio(&scope, "x"), v2.service_studio(&scope, "x")),
        (legacy.environments(&scope), v2.environments(&scope)),
        (
            legacy.environment_group_details(&scope, "x"),
            v2.environment_group_details(&scope, "x"),
        ),
        (
            legacy.monitored_service_edit(&scope, "x"),
            v2.monitored_service_edit(&scope, "x"),
        ),
        (legacy.pipelines(&scope), v2.pipelines(&scope)),
        (legacy.templates(&scope), v2.templates(&scope)),
        (legacy.landing_dashboard("a"), v2.landing_dashboard("a")),
    ];

    for (legacy_url, v2_url) in pairs {
        assert_ne!(legacy_url, v2_url);
        assert_eq!(identifying_params(&legacy_url), identifying_params(&v2_url));
        assert!(has_mode_all(&v2_url), "{v2_url}");
        assert!(!has_mode_all(&legacy_url), "{legacy_url}");
    }
}

#[test]
fn trigger_list_carries_no_storage_params() {
    let (legacy, v2) = tables();
    let scope = Scope::project("a", "o", "p").unwrap();
    let params = TriggerListParams {
        scope: &scope,
        pipeline_id: "pipe1",
    };

    assert_eq!(
        legacy.triggers(&params),
        "/account/a/cd/orgs/o/projects/p/pipelines/pipe1/triggers"
    );
    assert_eq!(
        v2.triggers(&params),
        "/account/a/orgs/o/projects/p/pipelines/pipe1/triggers?mode=all"
    );
}

#[test]
fn path_delimiters_in_identifiers_stay_in_one_segment() {
    let (legacy, v2) = tables();
    let scope = Scope::project("a", "o", "p").unwrap();
    let params = PipelineStudioParams {
        scope: &scope,
        pipeline_id: "x/../admin?storeType=REMOTE#frag",
        git: GitRouteParams::inline(),
    };

    let legacy_url = legacy.pipeline_studio(&params);
    assert_eq!(
        legacy_url,
        "/account/a/cd/orgs/o/projects/p/pipelines/x%2F..%2Fadmin%3FstoreType%3DREMOTE%23frag/pipeline-studio/?storeType=INLINE"
    );
    let v2_url = v2.pipeline_studio(&params);
    assert!(v2_url.contains("/pipelines/x%2F..%2Fadmin%3FstoreType%3DREMOTE%23frag/pipeline-studio/"));
    assert_eq!(identifying_params(&legacy_url), identifying_params(&v2_url));
    assert_eq!(
        identifying_params(&legacy_url),
        vec![("storeType".to_string(), "INLINE".to_string())]
    );

    let spaced = Scope::project("acc one", "o/rg", "p").unwrap();
    assert_eq!(
        legacy.connector_details(&spaced, "c 1"),
        "/account/acc%20one/cd/orgs/o%2Frg/projects/p/setup/resources/connectors/c%201"
    );
    assert!(v2
        .secret_details(&scope, "..")
        .ends_with("/settings/secrets/%2E%2E/overview?mode=all"));
}
