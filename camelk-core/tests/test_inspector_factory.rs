//! Integration tests for the inspector factory

mod common;

use camelk_core::domain::{Capability, Language, SourceSpec};
use common::*;
use rstest::rstest;

#[rstest]
#[case("Routes.java", Some(Language::Java))]
#[case("routes.groovy", Some(Language::Groovy))]
#[case("routes.js", Some(Language::JavaScript))]
#[case("routes.kts", Some(Language::Kotlin))]
#[case("routes.flow.yaml", Some(Language::YamlFlow))]
#[case("routes.yaml", Some(Language::Yaml))]
#[case("routes.xml", Some(Language::Xml))]
#[case("README.md", None)]
fn test_inspector_selection_by_name(#[case] name: &str, #[case] expected: Option<Language>) {
    let factory = test_factory();
    let inspector = factory.inspector_for_source(&SourceSpec::new(name, ""));
    assert_eq!(inspector.language(), expected);
}

#[test]
fn test_declared_language_wins_over_name() {
    let factory = test_factory();
    let source = SourceSpec::new("routes.txt", sample_groovy_rest()).with_language(Language::Groovy);
    let meta = factory.extract(&source).unwrap();
    assert_eq!(meta.from_uris, vec!["direct:hello"]);
}

#[test]
fn test_java_routes() {
    let meta = test_factory()
        .extract(&source("Routes.java", sample_java_routes()))
        .unwrap();

    assert_eq!(meta.from_uris, vec!["timer:tick?period=5000", "direct:ingest"]);
    assert_eq!(
        meta.to_uris,
        vec![
            "telegram:bots?authorizationToken=xxx",
            "log:info",
            "kamelet:my-sink/main?kameletVersion=v1",
        ]
    );
    for dependency in ["camel:timer", "camel:direct", "camel:telegram", "camel:log", "camel:kamelet", "camel:jackson"] {
        assert!(meta.dependencies.contains(dependency), "missing {dependency}");
    }
    assert_eq!(meta.kamelets, vec!["my-sink/main?kameletVersion=v1"]);
    assert!(!meta.exposes_http_services);
    assert!(!meta.passive_endpoints);
}

#[test]
fn test_groovy_rest_service() {
    let meta = test_factory()
        .extract(&source("rest.groovy", sample_groovy_rest()))
        .unwrap();

    assert!(meta.required_capabilities.contains(&Capability::Rest));
    assert!(meta.dependencies.contains("camel:rest"));
    assert!(meta.dependencies.contains("camel:platform-http"));
    assert!(meta.dependencies.contains("camel:groovy"));
    assert!(meta.exposes_http_services);
    assert!(meta.passive_endpoints);
}

#[test]
fn test_javascript_platform_http() {
    let meta = test_factory()
        .extract(&source("routes.js", sample_js_routes()))
        .unwrap();

    assert_eq!(meta.from_uris, vec!["platform-http:/greetings"]);
    assert!(meta.required_capabilities.contains(&Capability::PlatformHttp));
    assert!(meta.dependencies.contains("camel:platform-http"));
    assert!(meta.dependencies.contains("camel:log"));
    assert!(meta.exposes_http_services);
    assert!(meta.passive_endpoints);
}

#[test]
fn test_kotlin_circuit_breaker() {
    let meta = test_factory()
        .extract(&source("routes.kts", sample_kotlin_routes()))
        .unwrap();

    assert!(meta.required_capabilities.contains(&Capability::CircuitBreaker));
    assert!(meta.dependencies.contains("camel:microprofile-fault-tolerance"));
    assert!(meta.dependencies.contains("camel:http"));
    assert_eq!(meta.to_uris, vec!["http://example.com"]);
}

#[test]
fn test_xml_routes() {
    let meta = test_factory()
        .extract(&source("routes.xml", sample_xml_routes()))
        .unwrap();

    assert_eq!(meta.from_uris, vec!["direct:users"]);
    assert_eq!(meta.to_uris, vec!["direct:users", "log:info"]);
    assert!(meta.required_capabilities.contains(&Capability::Rest));
    assert!(meta.dependencies.contains("camel:gson"));
    assert!(meta.dependencies.contains("camel:rest"));
    assert!(meta.exposes_http_services);
    assert!(meta.passive_endpoints);
}

#[test]
fn test_yaml_routes() {
    let meta = test_factory()
        .extract(&source("routes.yaml", sample_yaml_routes()))
        .unwrap();

    assert_eq!(meta.from_uris, vec!["cron:tab?schedule=*+*+*+*+%3F"]);
    assert_eq!(meta.to_uris, vec!["seda:out"]);
    assert_eq!(meta.kamelets, vec!["my-action"]);
    assert!(meta.dependencies.contains("camel:cron"));
    assert!(meta.dependencies.contains("camel:jackson"));
    assert!(meta.dependencies.contains("camel:seda"));
}

#[test]
fn test_yaml_rest_and_platform_http() {
    let content = r#"
- rest:
    path: "/api"
- from:
    uri: "platform-http:/hello"
    steps:
      - to: "log:info"
"#;
    let meta = test_factory().extract(&source("rest.yaml", content)).unwrap();

    assert!(meta.exposes_http_services);
    assert!(meta.required_capabilities.contains(&Capability::Rest));
    assert!(meta.required_capabilities.contains(&Capability::PlatformHttp));
    assert!(meta.dependencies.contains("camel:rest"));
    assert!(meta.dependencies.contains("camel:platform-http"));
    assert!(meta.passive_endpoints);
}

#[test]
fn test_yaml_property_placeholder_is_skipped() {
    let content = r#"
- from:
    uri: "{{url}}"
    steps:
      - to: "log:info"
"#;
    let meta = test_factory().extract(&source("routes.yaml", content)).unwrap();

    assert_eq!(meta.from_uris, vec!["{{url}}"]);
    assert_eq!(meta.dependencies.iter().collect::<Vec<_>>(), vec!["camel:log"]);
    assert!(!meta.passive_endpoints);
}

#[test]
fn test_yaml_json_library() {
    let content = r#"
- from:
    uri: "direct:start"
    steps:
      - unmarshal:
          json:
            library: Gson
"#;
    let meta = test_factory().extract(&source("routes.yaml", content)).unwrap();
    assert!(meta.dependencies.contains("camel:gson"));
    assert!(!meta.dependencies.contains("camel:jackson"));
}

#[test]
fn test_yaml_invalid_step_fails_whole_batch() {
    let bad = r#"
- from:
    uri: "timer:tick"
    steps:
      - to: "log:a"
        log: "b"
"#;
    let sources = [
        source("good.groovy", "from('timer:tick').to('log:info')"),
        source("bad.yaml", bad),
    ];
    assert!(test_factory().extract_sources(&sources).is_err());
}

#[test]
fn test_yaml_flow() {
    let meta = test_factory()
        .extract(&source("routes.flow.yaml", sample_yaml_flow()))
        .unwrap();

    assert_eq!(meta.from_uris, vec!["timer:tick"]);
    assert_eq!(meta.to_uris, vec!["log:info", "seda:out"]);
    assert!(meta.dependencies.contains("camel:seda"));
}

#[test]
fn test_integration_metadata_is_merged_in_order() {
    let sources = [
        source("Routes.java", sample_java_routes()),
        source("routes.js", sample_js_routes()),
        source("routes.yaml", sample_yaml_routes()),
    ];
    let integration = test_factory().extract_sources(&sources).unwrap();

    assert_eq!(integration.sources, vec!["Routes.java", "routes.js", "routes.yaml"]);
    assert_eq!(
        integration.from_uris,
        vec![
            "timer:tick?period=5000",
            "direct:ingest",
            "platform-http:/greetings",
            "cron:tab?schedule=*+*+*+*+%3F",
        ]
    );
    assert_eq!(integration.kamelets, vec!["my-sink/main?kameletVersion=v1", "my-action"]);
    assert!(integration.exposes_http_services);
    assert!(!integration.passive_endpoints);
}
