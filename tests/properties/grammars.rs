//! Property tests for service id, function name and runtime grammars.

use proptest::prelude::*;

use firebase_ssr_adapter::domain::value_objects::{
    normalize_version, valid_cloud_function_name, valid_cloud_run_service_id, RuntimeVersion,
    MAX_FUNCTION_NAME_LEN, MAX_SERVICE_ID_LEN, MIN_SERVICE_ID_LEN, SUPPORTED_NODE_VERSIONS,
};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: generated well-formed service ids are accepted.
    #[test]
    fn property_well_formed_service_ids_accepted(
        id in "[a-z0-9][a-z0-9-]{0,61}[a-z0-9]"
    ) {
        prop_assert!(valid_cloud_run_service_id(&id));
    }

    /// PROPERTY: a leading or trailing dash is always rejected.
    #[test]
    fn property_dash_edges_rejected(body in "[a-z0-9-]{0,20}") {
        let leading = format!("-{}", body);
        let trailing = format!("{}-", body);
        prop_assert!(!valid_cloud_run_service_id(&leading));
        prop_assert!(!valid_cloud_run_service_id(&trailing));
    }

    /// PROPERTY: uppercase never passes the service id grammar.
    #[test]
    fn property_uppercase_service_id_rejected(prefix in "[a-z0-9]{0,5}", upper in "[A-Z]", suffix in "[a-z0-9]{0,5}") {
        let id = format!("{}{}{}", prefix, upper, suffix);
        prop_assert!(!valid_cloud_run_service_id(&id));
    }

    /// PROPERTY: service id validity implies the length bound.
    #[test]
    fn property_service_id_length_bound(id in "[a-z0-9-]{0,80}") {
        if valid_cloud_run_service_id(&id) {
            prop_assert!(id.len() >= MIN_SERVICE_ID_LEN && id.len() <= MAX_SERVICE_ID_LEN);
        }
    }

    /// PROPERTY: function names are exactly 1..=62 word characters.
    #[test]
    fn property_function_name_grammar(name in "[A-Za-z0-9_]{1,80}") {
        prop_assert_eq!(
            valid_cloud_function_name(&name),
            name.len() <= MAX_FUNCTION_NAME_LEN
        );
    }

    /// PROPERTY: any non-word character rejects a function name.
    #[test]
    fn property_function_name_rejects_punctuation(
        head in "[A-Za-z0-9_]{0,10}",
        bad in "[-. /:@]",
        tail in "[A-Za-z0-9_]{0,10}"
    ) {
        let name = format!("{}{}{}", head, bad, tail);
        prop_assert!(!valid_cloud_function_name(&name));
    }

    /// PROPERTY: normalization strips non-digits and is idempotent.
    #[test]
    fn property_normalize_version_idempotent(declared in "[a-z>=^~ ]{0,8}[0-9]{1,3}(\\.[0-9x]{1,2}){0,2}") {
        let once = normalize_version(&declared);
        prop_assert!(once.is_some());
        let once = once.unwrap();
        prop_assert!(once.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(normalize_version(&once), Some(once.clone()));
    }

    /// PROPERTY: parse accepts exactly the supported majors.
    #[test]
    fn property_runtime_parse_supported_only(major in 0u32..40) {
        let declared = format!("nodejs{}", major);
        let supported = SUPPORTED_NODE_VERSIONS.contains(&major.to_string().as_str());
        prop_assert_eq!(RuntimeVersion::parse(&declared).is_some(), supported);
    }
}
