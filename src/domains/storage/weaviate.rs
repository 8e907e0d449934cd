//! Weaviate storage connector.
//!
//! Talks to Weaviate's REST API for inserts (`POST /v1/objects`) and to its
//! GraphQL endpoint for hybrid search (`POST /v1/graphql`). One pooled
//! `reqwest::Client` is shared by all calls.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use super::connector::{InsertedObject, StorageConnector};
use super::error::ConnectorError;
use crate::core::config::WeaviateConfig;

/// Weaviate connector.
pub struct WeaviateConnector {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

impl WeaviateConnector {
    /// Create a connector from configuration.
    pub fn new(config: &WeaviateConfig) -> Result<Self, ConnectorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

#[async_trait::async_trait]
impl StorageConnector for WeaviateConnector {
    #[instrument(skip(self, properties))]
    async fn insert_one(
        &self,
        collection: &str,
        properties: &Map<String, Value>,
    ) -> Result<InsertedObject, ConnectorError> {
        check_identifier("collection", collection)?;

        let response = self
            .request(Method::POST, "/v1/objects")
            .json(&json!({ "class": collection, "properties": properties }))
            .send()
            .await?;
        let object: ObjectResponse = check_status(response).await?.json().await?;

        debug!("Inserted object {} into {}", object.id, collection);
        Ok(InsertedObject { id: object.id })
    }

    #[instrument(skip(self))]
    async fn query(
        &self,
        collection: &str,
        query: &str,
        target_properties: &[String],
    ) -> Result<String, ConnectorError> {
        let graphql = build_hybrid_query(collection, query, target_properties)?;
        debug!("GraphQL: {}", graphql);

        let response = self
            .request(Method::POST, "/v1/graphql")
            .json(&json!({ "query": graphql }))
            .send()
            .await?;
        let body: GraphqlResponse = check_status(response).await?.json().await?;

        render_hits(body, collection)
    }
}

async fn check_status(response: Response) -> Result<Response, ConnectorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(status_error(status.as_u16(), response.text().await))
}

fn status_error<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> ConnectorError {
    let body = match body {
        Ok(body) => body,
        Err(e) => format!("<failed to read response body: {}>", e),
    };
    ConnectorError::Status { status, body }
}

/// Build a `Get` hybrid-search query.
///
/// Names are interpolated into the document, so they must be GraphQL
/// identifiers; the query text is passed as an escaped string literal.
fn build_hybrid_query(
    collection: &str,
    query: &str,
    target_properties: &[String],
) -> Result<String, ConnectorError> {
    check_identifier("collection", collection)?;
    for property in target_properties {
        check_identifier("property", property)?;
    }

    let fields = if target_properties.is_empty() {
        "_additional { id }".to_string()
    } else {
        target_properties.join(" ")
    };
    let literal =
        serde_json::to_string(query).map_err(|e| ConnectorError::malformed(e.to_string()))?;

    Ok(format!(
        "{{ Get {{ {collection}(hybrid: {{query: {literal}}}) {{ {fields} }} }} }}"
    ))
}

fn render_hits(response: GraphqlResponse, collection: &str) -> Result<String, ConnectorError> {
    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
        return Err(ConnectorError::Graphql(messages.join("; ")));
    }

    let hits = response
        .data
        .as_ref()
        .and_then(|data| data.get("Get"))
        .and_then(|get| get.get(collection))
        .ok_or_else(|| ConnectorError::malformed(format!("missing data.Get.{}", collection)))?;

    serde_json::to_string_pretty(hits).map_err(|e| ConnectorError::malformed(e.to_string()))
}

fn check_identifier(kind: &'static str, value: &str) -> Result<(), ConnectorError> {
    let mut chars = value.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ConnectorError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_hybrid_query() {
        let query = build_hybrid_query("Article", "cute cats", &props(&["title", "body"])).unwrap();
        assert_eq!(
            query,
            r#"{ Get { Article(hybrid: {query: "cute cats"}) { title body } } }"#
        );
    }

    #[test]
    fn test_build_hybrid_query_escapes_text() {
        let query = build_hybrid_query("Article", "say \"hi\"\n", &props(&["title"])).unwrap();
        assert!(query.contains(r#"query: "say \"hi\"\n""#));
    }

    #[test]
    fn test_build_hybrid_query_without_properties() {
        let query = build_hybrid_query("Article", "q", &[]).unwrap();
        assert!(query.contains("{ _additional { id } }"));
    }

    #[test]
    fn test_rejects_injected_names() {
        let err = build_hybrid_query("Article) { x } #", "q", &[]).unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidIdentifier { kind: "collection", .. }));

        let err = build_hybrid_query("Article", "q", &props(&["title", "a b"])).unwrap_err();
        assert_eq!(err.to_string(), "invalid property name 'a b'");

        assert!(check_identifier("collection", "").is_err());
        assert!(check_identifier("collection", "1Article").is_err());
        assert!(check_identifier("collection", "_Article_2").is_ok());
    }

    #[test]
    fn test_render_hits() {
        let response: GraphqlResponse = serde_json::from_value(json!({
            "data": { "Get": { "Article": [{ "title": "Cats" }] } }
        }))
        .unwrap();

        let text = render_hits(response, "Article").unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!([{ "title": "Cats" }]));
    }

    #[test]
    fn test_render_graphql_errors() {
        let response: GraphqlResponse = serde_json::from_value(json!({
            "data": null,
            "errors": [{ "message": "class not found" }, { "message": "bad field" }]
        }))
        .unwrap();

        let err = render_hits(response, "Article").unwrap_err();
        assert_eq!(err.to_string(), "query errors: class not found; bad field");
    }

    #[test]
    fn test_render_missing_collection() {
        let response: GraphqlResponse =
            serde_json::from_value(json!({ "data": { "Get": {} } })).unwrap();
        assert!(matches!(
            render_hits(response, "Article"),
            Err(ConnectorError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_connector_base_url() {
        let config = WeaviateConfig {
            scheme: "https".to_string(),
            host: "weaviate.example.com".to_string(),
            api_key: None,
            request_timeout_secs: 5,
        };
        let connector = WeaviateConnector::new(&config).unwrap();
        assert_eq!(connector.base_url(), "https://weaviate.example.com");
    }

    #[tokio::test]
    async fn test_insert_rejects_bad_collection_before_sending() {
        let connector = WeaviateConnector::new(&WeaviateConfig::default()).unwrap();
        let err = connector
            .insert_one("not a class", &Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidIdentifier { .. }));
    }

    #[tokio::test]
    async fn test_check_status_keeps_error_body() {
        let response = axum::http::Response::builder()
            .status(503)
            .body("weaviate is starting")
            .unwrap();

        let err = check_status(reqwest::Response::from(response)).await.unwrap_err();
        assert_eq!(err.to_string(), "weaviate returned 503: weaviate is starting");
    }

    #[test]
    fn test_status_error_reports_unreadable_body() {
        let err = status_error(502, Err::<String, _>("connection reset"));
        match err {
            ConnectorError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "<failed to read response body: connection reset>");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
