//! Property tests for header coalescing.

use proptest::prelude::*;

use firebase_ssr_adapter::request::{to_headers, HeaderValue, PlatformHeaders};

fn header_value() -> impl Strategy<Value = HeaderValue> {
    let text = "[ -~&&[^,]]{0,12}";
    prop_oneof![
        text.prop_map(HeaderValue::Single),
        proptest::collection::vec(text, 0..4).prop_map(HeaderValue::Multiple),
    ]
}

fn headers() -> impl Strategy<Value = PlatformHeaders> {
    proptest::collection::btree_map("[a-z-]{1,12}", header_value(), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: names are preserved one-to-one.
    #[test]
    fn property_header_names_preserved(input in headers()) {
        let out = to_headers(&input);
        prop_assert_eq!(
            out.keys().collect::<Vec<_>>(),
            input.keys().collect::<Vec<_>>()
        );
    }

    /// PROPERTY: multi-value headers split back into their parts.
    #[test]
    fn property_multi_values_join_with_comma(input in headers()) {
        let out = to_headers(&input);
        for (name, value) in &input {
            match value {
                HeaderValue::Single(v) => prop_assert_eq!(&out[name], v),
                HeaderValue::Multiple(parts) if !parts.is_empty() => {
                    let split: Vec<&str> = out[name].split(',').collect();
                    let expected: Vec<&str> = parts.iter().map(String::as_str).collect();
                    prop_assert_eq!(split, expected);
                }
                HeaderValue::Multiple(_) => prop_assert_eq!(out[name].as_str(), ""),
            }
        }
    }
}
