#![allow(clippy::unwrap_used)]
// Integration tests for `CmsClient` using wiremock.

use serde::Deserialize;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use congreso_api::{CmsClient, Error, Forwarded, TransportConfig, endpoints};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CmsClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = CmsClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, client)
}

// ── get_json ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_json_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/seo-setting"))
        .and(query_param("populate", "*"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "site_description": "Congreso de Pediatría" }
        })))
        .mount(&server)
        .await;

    let value = client.get_json(endpoints::SEO_SETTINGS).await.unwrap().unwrap();
    assert_eq!(value["data"]["site_description"], "Congreso de Pediatría");
}

#[tokio::test]
async fn test_get_json_bracket_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/home-page"))
        .and(query_param("populate[HomeSection][populate]", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let value = client.get_json(endpoints::HOME_HERO).await.unwrap();
    assert!(value.is_some());
}

#[tokio::test]
async fn test_not_found_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/talleres"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let value = client.get_json("/api/talleres").await.unwrap();
    assert!(value.is_none());
}

#[tokio::test]
async fn test_server_error_is_classified() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    match client.get_json("/api/home-page").await {
        Err(Error::Http {
            status,
            ref status_text,
            ref body,
        }) => {
            assert_eq!(status, 503);
            assert_eq!(status_text, "Service Unavailable");
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.get_json("/api/home-page").await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_get_json_as_typed() {
    #[derive(Deserialize)]
    struct Envelope {
        data: Vec<Taller>,
    }
    #[derive(Deserialize)]
    struct Taller {
        titulo: String,
    }

    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/talleres"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "titulo": "RCP neonatal" }, { "titulo": "Ecografía" }]
        })))
        .mount(&server)
        .await;

    let envelope: Envelope = client
        .get_json_as(endpoints::WORKSHOPS)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(envelope.data.len(), 2);
    assert_eq!(envelope.data[0].titulo, "RCP neonatal");
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    let transport = TransportConfig {
        api_token: Some("s3cret".to_string().into()),
        ..TransportConfig::default()
    };
    let client = CmsClient::new(Url::parse(&server.uri()).unwrap(), &transport).unwrap();

    Mock::given(method("GET"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.get_json("/api/configuracion").await.unwrap();
}

// ── forward ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_forward_rebuilds_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/Disertantes"))
        .and(query_param("populate[avatar][populate]", "*"))
        .and(query_param("sort", "nombre"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let query = vec![
        ("populate[avatar][populate]".to_string(), "*".to_string()),
        ("sort".to_string(), "nombre".to_string()),
    ];
    let forwarded = client.forward("Disertantes", &query).await.unwrap();
    assert_eq!(forwarded, Forwarded::Json(json!({ "data": [] })));
}

#[tokio::test]
async fn test_forward_mirrors_failure_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let forwarded = client.forward("configuracion", &[]).await.unwrap();
    assert_eq!(
        forwarded,
        Forwarded::Failed {
            status: 403,
            status_text: "Forbidden".into()
        }
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = CmsClient::new(
        Url::parse("http://127.0.0.1:9").unwrap(),
        &TransportConfig::default(),
    )
    .unwrap();

    let err = client.get_json("/api/home-page").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(err.is_transient());
}
