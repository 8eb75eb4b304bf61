use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use passport_core::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ScriptedHttpClient, UpstreamConfig,
};
use passport_tests::*;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router(http: &Arc<ScriptedHttpClient>, config: UpstreamConfig) -> Router {
    passport_web::app(http.clone(), config, Path::new("does-not-exist"))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("router is infallible");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, body.to_vec())
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_slice(&body).expect("JSON body"))
}

#[tokio::test]
async fn test_health_probe() {
    let http = Arc::new(ScriptedHttpClient::new());
    let (status, body) = get(router(&http, unkeyed_config()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_random_user_success_shape() {
    let http = Arc::new(japan_scripted());
    let (status, body) = get_json(router(&http, unkeyed_config()), "/api/random-user").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Aiko");
    assert_eq!(body["country"], "Japan");
    assert_eq!(body["fullAddress"], "Sakura-dori 4127");
    assert_eq!(body["age"], 34);
}

#[tokio::test]
async fn test_random_user_upstream_failure_is_bad_gateway() {
    let http = Arc::new(ScriptedHttpClient::new().respond(RANDOMUSER, upstream_error()));
    let (status, body) = get_json(router(&http, unkeyed_config()), "/api/random-user").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "RandomUser API failed"}));
}

#[tokio::test]
async fn test_empty_country_name_is_rejected_without_upstream_call() {
    let http = Arc::new(japan_scripted());

    for uri in ["/api/country?name=", "/api/country"] {
        let (status, body) = get_json(router(&http, unkeyed_config()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing country name"}));
    }
    assert!(http.recorded_requests().is_empty());
}

#[tokio::test]
async fn test_undecodable_query_is_json_bad_request() {
    let http = Arc::new(japan_scripted());

    for uri in [
        "/api/country?name=Japan&name=Peru",
        "/api/news?country=Japan&country=Peru",
    ] {
        let (status, body) = get_json(router(&http, keyed_config()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["error"].as_str().expect("error message");
        assert!(message.contains("duplicate field"), "{message}");
    }
    assert!(http.recorded_requests().is_empty());
}

#[tokio::test]
async fn test_country_success_and_not_found() {
    let http = Arc::new(
        ScriptedHttpClient::new()
            .respond_json(format!("{RESTCOUNTRIES}v3.1/name/Japan"), JAPAN_PAYLOAD)
            .respond_json(RESTCOUNTRIES, "[]"),
    );

    let (status, body) = get_json(router(&http, unkeyed_config()), "/api/country?name=Japan").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "countryName": "Japan",
            "capital": "Tokyo",
            "languages": "Japanese",
            "currencyCode": "JPY",
            "currencyName": "Japanese yen",
            "flag": "https://flagcdn.com/w320/jp.png"
        })
    );

    let (status, body) =
        get_json(router(&http, unkeyed_config()), "/api/country?name=Atlantis").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "Country not found"}));
}

#[tokio::test]
async fn test_rates_narrow_to_usd_and_kzt() {
    let http = Arc::new(ScriptedHttpClient::new().respond_json(
        rates_url("USD"),
        r#"{"result":"success","conversion_rates":{"USD":1,"KZT":520.31,"EUR":0.92}}"#,
    ));

    let (status, body) = get_json(router(&http, keyed_config()), "/api/rates?base=USD").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"base": "USD", "USD": 1.0, "KZT": 520.31}));
}

#[tokio::test]
async fn test_rates_configuration_is_checked_before_parameter() {
    let http = Arc::new(ScriptedHttpClient::new());

    let (status, body) = get_json(router(&http, unkeyed_config()), "/api/rates").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Missing configuration: EXCHANGERATE_API_KEY"}));

    let (status, body) = get_json(router(&http, keyed_config()), "/api/rates?base=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing base currency"}));

    assert!(http.recorded_requests().is_empty());
}

#[tokio::test]
async fn test_news_filters_titles_and_reports_count() {
    let http = Arc::new(japan_scripted());

    let (status, body) = get_json(router(&http, keyed_config()), "/api/news?country=Japan").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["country"], "Japan");
    assert_eq!(body["count"], 2);
    assert_eq!(body["articles"][1]["title"], "Typhoon nears JAPAN");
    assert_eq!(body["articles"][0]["image"], "");
}

#[tokio::test]
async fn test_news_failures_by_kind() {
    let http = Arc::new(ScriptedHttpClient::new().respond(NEWSAPI, upstream_error()));

    let (status, body) = get_json(router(&http, unkeyed_config()), "/api/news?country=Peru").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Missing configuration: NEWS_API_KEY"}));

    let (status, body) = get_json(router(&http, keyed_config()), "/api/news").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing country"}));

    let (status, body) = get_json(router(&http, keyed_config()), "/api/news?country=Peru").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "NewsAPI failed"}));
}

#[tokio::test]
async fn test_profile_reports_sections() {
    let http = Arc::new(
        ScriptedHttpClient::new()
            .respond_json(RANDOMUSER, user_payload("Japan"))
            .respond(RESTCOUNTRIES, upstream_error())
            .respond_json(NEWSAPI, news_payload(&["Japan hosts summit"])),
    );

    let (status, body) = get_json(router(&http, keyed_config()), "/api/profile").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["firstName"], "Aiko");
    assert_eq!(body["country"]["status"], "error");
    assert_eq!(body["country"]["where"], "Country");
    assert_eq!(body["rates"], json!({"status": "blocked", "blockedBy": "Country"}));
    assert_eq!(body["news"]["status"], "ok");
    assert_eq!(body["news"]["data"]["count"], 1);
}

#[tokio::test]
async fn test_profile_user_failure_is_attributed() {
    let http = Arc::new(ScriptedHttpClient::new().respond(RANDOMUSER, upstream_error()));

    let (status, body) = get_json(router(&http, keyed_config()), "/api/profile").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "RandomUser API failed", "where": "User"}));
    assert_eq!(http.recorded_requests().len(), 1);
}

struct PanickingHttpClient;

impl HttpClient for PanickingHttpClient {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        panic!("transport exploded")
    }
}

#[tokio::test]
async fn test_handler_panic_becomes_internal_error() {
    let app = passport_web::app(
        Arc::new(PanickingHttpClient),
        unkeyed_config(),
        Path::new("does-not-exist"),
    );

    let (status, body) = get(app.clone(), "/api/random-user").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).expect("JSON body");
    assert_eq!(body, json!({"error": "Internal server error"}));

    let (status, _) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_static_assets_served_for_non_api_paths() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("index.html"), "<h1>passport</h1>").expect("write index");

    let http = Arc::new(ScriptedHttpClient::new());
    let app = passport_web::app(http, unkeyed_config(), dir.path());

    let (status, body) = get(app.clone(), "/index.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>passport</h1>");

    let (status, _) = get(app, "/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
