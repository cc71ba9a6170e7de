//! Test data fixtures for camelk-core

#![allow(dead_code)]

use std::sync::Arc;

use camelk_core::domain::SourceSpec;
use camelk_core::infrastructure::{InspectorFactory, RuntimeCatalog, load_default_catalog};

/// The embedded catalog, indexed
pub fn test_catalog() -> Arc<RuntimeCatalog> {
    Arc::new(load_default_catalog().expect("embedded catalog parses"))
}

pub fn test_factory() -> InspectorFactory {
    InspectorFactory::new(test_catalog())
}

pub fn source(name: &str, content: &str) -> SourceSpec {
    SourceSpec::new(name, content)
}

/// Java route consuming from a timer and a Telegram bot
pub fn sample_java_routes() -> &'static str {
    r#"
import org.apache.camel.builder.RouteBuilder;

public class Routes extends RouteBuilder {
    @Override
    public void configure() throws Exception {
        from("timer:tick?period=5000")
            .setBody().simple("Hello")
            .to("telegram:bots?authorizationToken=xxx")
            .to("log:info");

        from("direct:ingest")
            .unmarshal().json()
            .to("kamelet:my-sink/main?kameletVersion=v1");
    }
}
"#
}

/// Groovy REST service
pub fn sample_groovy_rest() -> &'static str {
    r#"
rest {
    get '/hello' to 'direct:hello'
}

from('direct:hello')
    .transform().groovy('"Hello " + body')
"#
}

/// JavaScript route using the platform HTTP consumer
pub fn sample_js_routes() -> &'static str {
    r#"
from('platform-http:/greetings')
    .setBody().constant('hi')
    .to('log:info');
"#
}

/// Kotlin route with a circuit breaker
pub fn sample_kotlin_routes() -> &'static str {
    r#"
from("timer:tick")
    .circuitBreaker()
        .to("http://example.com")
    .end()
"#
}

/// XML routes with a REST block and a JSON data format
pub fn sample_xml_routes() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<routes xmlns="http://camel.apache.org/schema/spring">
  <rest path="/api">
    <get uri="/users">
      <to uri="direct:users"/>
    </get>
  </rest>
  <route>
    <from uri="direct:users"/>
    <marshal>
      <json library="Gson"/>
    </marshal>
    <to uri="log:info"/>
  </route>
</routes>
"#
}

/// Structural YAML route with parameters and a Kamelet step
pub fn sample_yaml_routes() -> &'static str {
    r#"
- from:
    uri: "cron:tab"
    parameters:
      schedule: "* * * * ?"
    steps:
      - kamelet:
          name: my-action
      - marshal:
          json: {}
      - to:
          uri: "seda:out"
"#
}

/// Legacy flow with one consumer and two producers
pub fn sample_yaml_flow() -> &'static str {
    r#"
- steps:
    - kind: endpoint
      uri: "timer:tick"
    - kind: endpoint
      uri: "log:info"
    - kind: endpoint
      uri: "seda:out"
"#
}
