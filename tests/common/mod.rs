//! Shared helpers for the end-to-end tests

#![allow(dead_code)]

use std::sync::Arc;

use camelk::IntegrationBuildUseCase;
use camelk::camelk_core::Config;
use camelk::camelk_core::domain::SourceSpec;
use camelk::camelk_core::infrastructure::load_default_catalog;

pub fn use_case() -> IntegrationBuildUseCase {
    let catalog = load_default_catalog().expect("embedded catalog parses");
    IntegrationBuildUseCase::new(Arc::new(catalog), &Config::default())
}

pub fn source(name: &str, content: &str) -> SourceSpec {
    SourceSpec::new(name, content)
}

pub fn telegram_bot() -> SourceSpec {
    source(
        "Bot.java",
        r#"
public class Bot extends org.apache.camel.builder.RouteBuilder {
    public void configure() {
        from("telegram:bots?authorizationToken={{token}}")
            .to("telegram:bots?authorizationToken={{token}}");
    }
}
"#,
    )
}

pub fn yaml_bridge() -> SourceSpec {
    source(
        "bridge.yaml",
        r#"
- from:
    uri: "timer:tick"
    parameters:
      period: 1000
    steps:
      - marshal:
          json: {}
      - to: "seda:out"
- from:
    uri: "seda:out"
    steps:
      - to: "log:info"
"#,
    )
}
