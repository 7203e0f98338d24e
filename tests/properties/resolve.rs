//! Property tests for configuration resolution.

use std::path::Path;

use proptest::prelude::*;
use serde_json::json;

use firebase_ssr_adapter::domain::services::{resolve_document, ResolveOptions};
use firebase_ssr_adapter::error::ConfigError;

const CONFIG: &str = "/project/firebase.json";

fn options(target: Option<String>) -> ResolveOptions {
    ResolveOptions {
        firebase_json_path: CONFIG.into(),
        target,
        ..ResolveOptions::default()
    }
}

fn site_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z]{3,8}", 2..5).prop_map(|s| s.into_iter().collect())
}

fn document(names: &[String]) -> String {
    let entries: Vec<_> = names
        .iter()
        .map(|name| {
            json!({
                "target": name,
                "public": format!("public-{}", name),
                "rewrites": [{ "source": "**", "run": { "serviceId": format!("svc-{}", name) } }],
            })
        })
        .collect();
    json!({ "hosting": entries }).to_string()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: resolving the same input twice gives the same outcome.
    #[test]
    fn property_resolve_is_idempotent(names in site_names(), pick in any::<prop::sample::Index>()) {
        let text = document(&names);
        let wanted = names[pick.index(names.len())].clone();
        let opts = options(Some(wanted));

        let first = resolve_document(&text, Path::new(CONFIG), &opts);
        let second = resolve_document(&text, Path::new(CONFIG), &opts);
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: selecting a declared target picks that entry.
    #[test]
    fn property_declared_target_selected(names in site_names(), pick in any::<prop::sample::Index>()) {
        let text = document(&names);
        let wanted = names[pick.index(names.len())].clone();

        let plan = resolve_document(&text, Path::new(CONFIG), &options(Some(wanted.clone())))
            .expect("declared target resolves");

        prop_assert_eq!(plan.hosting_site.as_deref(), Some(wanted.as_str()));
        let expected_service = format!("svc-{}", wanted);
        prop_assert_eq!(
            plan.cloud_run_target().map(|t| t.service_id.as_str()),
            Some(expected_service.as_str())
        );
    }

    /// PROPERTY: without a selection, several entries are always ambiguous.
    #[test]
    fn property_multiple_entries_need_selection(names in site_names()) {
        let text = document(&names);
        let err = resolve_document(&text, Path::new(CONFIG), &options(None)).unwrap_err();
        prop_assert!(
            matches!(&err, ConfigError::AmbiguousSiteSelection { candidates, .. } if *candidates == names),
            "unexpected error: {:?}", err
        );
    }

    /// PROPERTY: an unknown target fails and lists every candidate.
    #[test]
    fn property_unknown_target_lists_candidates(names in site_names()) {
        let text = document(&names);
        let err = resolve_document(&text, Path::new(CONFIG), &options(Some("0000".to_string())))
            .unwrap_err();
        prop_assert!(
            matches!(&err, ConfigError::NoMatchingSite { candidates, .. } if *candidates == names),
            "unexpected error: {:?}", err
        );
    }
}
