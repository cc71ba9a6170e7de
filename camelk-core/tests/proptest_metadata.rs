//! Property-based tests for metadata merging and lexical extraction

mod common;

use camelk_core::domain::{Capability, Metadata, SourceSpec};
use common::test_factory;
use proptest::prelude::*;

fn capability() -> impl Strategy<Value = Capability> {
    prop_oneof![
        Just(Capability::Rest),
        Just(Capability::CircuitBreaker),
        Just(Capability::PlatformHttp),
        Just(Capability::Cron),
    ]
}

prop_compose! {
    fn metadata()(
        from_uris in prop::collection::vec("[a-z]{1,6}:[a-z]{1,6}", 0..4),
        to_uris in prop::collection::vec("[a-z]{1,6}:[a-z]{1,6}", 0..4),
        dependencies in prop::collection::btree_set("camel:[a-z]{1,8}", 0..5),
        required_capabilities in prop::collection::btree_set(capability(), 0..3),
        exposes_http_services in any::<bool>(),
        passive_endpoints in any::<bool>(),
        kamelets in prop::collection::vec("[a-z]{1,8}", 0..3),
    ) -> Metadata {
        Metadata {
            from_uris,
            to_uris,
            error_handler_uris: Vec::new(),
            dependencies,
            required_capabilities,
            exposes_http_services,
            passive_endpoints,
            kamelets,
        }
    }
}

proptest! {
    #[test]
    fn test_default_is_neutral_for_merge(meta in metadata()) {
        prop_assert_eq!(Metadata::default().merge(meta.clone()), meta.clone());
        prop_assert_eq!(meta.clone().merge(Metadata::default()), meta);
    }

    #[test]
    fn test_merge_is_associative(a in metadata(), b in metadata(), c in metadata()) {
        let left = a.clone().merge(b.clone()).merge(c.clone());
        let right = a.merge(b.merge(c));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn test_merge_concatenates_lists_and_unions_sets(a in metadata(), b in metadata()) {
        let merged = a.clone().merge(b.clone());

        let mut from_uris = a.from_uris.clone();
        from_uris.extend(b.from_uris.clone());
        prop_assert_eq!(&merged.from_uris, &from_uris);

        let swapped = b.clone().merge(a.clone());
        prop_assert_eq!(&merged.dependencies, &swapped.dependencies);
        prop_assert_eq!(&merged.required_capabilities, &swapped.required_capabilities);
        prop_assert_eq!(merged.exposes_http_services, a.exposes_http_services || b.exposes_http_services);
        prop_assert_eq!(merged.passive_endpoints, a.passive_endpoints && b.passive_endpoints);
    }

    #[test]
    fn test_java_from_literal_is_found(
        scheme in "[a-z][a-z0-9-]{0,10}",
        path in "[a-zA-Z0-9/?=&._-]{1,20}",
    ) {
        let uri = format!("{scheme}:{path}");
        let content = format!("from(\"{uri}\").to(\"log:info\");");
        let meta = test_factory()
            .extract(&SourceSpec::new("Routes.java", content))
            .unwrap();
        prop_assert_eq!(meta.from_uris, vec![uri]);
    }

    #[test]
    fn test_lexical_inspection_never_fails(content in "\\PC{0,200}") {
        let factory = test_factory();
        for name in ["Routes.java", "routes.groovy", "routes.js", "routes.kts"] {
            prop_assert!(factory.extract(&SourceSpec::new(name, content.clone())).is_ok());
        }
    }
}
