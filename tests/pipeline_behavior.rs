use std::sync::Arc;

use passport_core::{
    HttpResponse, PipelineOrchestrator, ScriptedHttpClient, Section, Stage, StageErrorKind,
};
use passport_tests::*;
use serde_json::json;

fn orchestrator(http: &Arc<ScriptedHttpClient>) -> PipelineOrchestrator {
    PipelineOrchestrator::new(client(http, keyed_config()))
}

#[tokio::test]
async fn test_all_stages_succeed() {
    let http = Arc::new(japan_scripted());

    let report = orchestrator(&http).run().await.expect("user succeeds");

    assert_eq!(report.user.country, "Japan");
    assert_eq!(
        report.country.data().map(|c| c.currency_code.as_str()),
        Some("JPY")
    );
    let rates = report.rates.data().expect("rates ok");
    assert_eq!(rates.base, "JPY");
    assert_eq!(rates.kzt_rate, Some(3.48));
    assert_eq!(report.news.data().map(|n| n.count), Some(2));
    assert_eq!(http.recorded_requests().len(), 4);
}

#[tokio::test]
async fn test_user_failure_halts_pipeline() {
    let http = Arc::new(japan_scripted_with_user(upstream_error()));

    let error = orchestrator(&http).run().await.expect_err("user fails");

    assert_eq!(error.kind(), StageErrorKind::Upstream);
    assert_eq!(error.message(), "RandomUser API failed");
    assert_eq!(http.recorded_requests().len(), 1);
}

#[tokio::test]
async fn test_country_failure_blocks_rates_but_not_news() {
    let http = Arc::new(
        ScriptedHttpClient::new()
            .respond_json(RANDOMUSER, user_payload("Japan"))
            .respond(RESTCOUNTRIES, upstream_error())
            .respond_json(NEWSAPI, news_payload(&["Japan hosts summit"])),
    );

    let report = orchestrator(&http).run().await.expect("user succeeds");

    assert_eq!(
        report.country,
        Section::Error {
            stage: Stage::Country,
            message: String::from("REST Countries API failed"),
        }
    );
    assert_eq!(
        report.rates,
        Section::Blocked {
            blocked_by: Stage::Country
        }
    );
    assert_eq!(report.news.data().map(|n| n.count), Some(1));
    assert!(http.requests_to(EXCHANGERATE).is_empty());
}

#[tokio::test]
async fn test_news_keyed_by_user_country_not_country_name() {
    let http = Arc::new(
        ScriptedHttpClient::new()
            .respond_json(RANDOMUSER, user_payload("Korea"))
            .respond(RESTCOUNTRIES, HttpResponse::new(404, "{}"))
            .respond_json(NEWSAPI, news_payload(&[])),
    );

    orchestrator(&http).run().await.expect("user succeeds");

    let news_calls = http.requests_to(NEWSAPI);
    assert_eq!(news_calls.len(), 1);
    assert!(news_calls[0].url.contains("q=Korea&"));
    assert_eq!(http.requests_to(&format!("{RESTCOUNTRIES}v3.1/name/Korea")).len(), 1);
}

#[tokio::test]
async fn test_news_failure_leaves_country_branch_intact() {
    let http = Arc::new(
        ScriptedHttpClient::new()
            .respond_json(RANDOMUSER, user_payload("Japan"))
            .respond_json(RESTCOUNTRIES, JAPAN_PAYLOAD)
            .respond_json(rates_url("JPY"), JPY_RATES_PAYLOAD)
            .respond(NEWSAPI, HttpResponse::new(429, r#"{"status":"error"}"#)),
    );

    let report = orchestrator(&http).run().await.expect("user succeeds");

    assert!(report.country.is_ok());
    assert!(report.rates.is_ok());
    assert_eq!(
        report.news,
        Section::Error {
            stage: Stage::News,
            message: String::from("NewsAPI failed"),
        }
    );
}

#[tokio::test]
async fn test_missing_currency_reports_rates_as_upstream_failure() {
    let http = Arc::new(
        ScriptedHttpClient::new()
            .respond_json(RANDOMUSER, user_payload("Antarctica"))
            .respond_json(RESTCOUNTRIES, ANTARCTICA_PAYLOAD)
            .respond(EXCHANGERATE, HttpResponse::new(404, r#"{"result":"error"}"#))
            .respond_json(NEWSAPI, news_payload(&[])),
    );

    let report = orchestrator(&http).run().await.expect("user succeeds");

    assert_eq!(
        report.rates,
        Section::Error {
            stage: Stage::Rates,
            message: String::from("ExchangeRate API failed"),
        }
    );
    assert_eq!(http.requests_to(EXCHANGERATE).len(), 1);
}

#[tokio::test]
async fn test_missing_keys_surface_per_section() {
    let http = Arc::new(japan_scripted());
    let orchestrator = PipelineOrchestrator::new(client(&http, unkeyed_config()));

    let report = orchestrator.run().await.expect("user succeeds");

    assert!(report.country.is_ok());
    assert_eq!(
        report.rates,
        Section::Error {
            stage: Stage::Rates,
            message: String::from("Missing configuration: EXCHANGERATE_API_KEY"),
        }
    );
    assert!(matches!(report.news, Section::Error { stage: Stage::News, .. }));
    assert_eq!(http.recorded_requests().len(), 2);
}

#[tokio::test]
async fn test_report_serializes_for_consumers() {
    let http = Arc::new(
        ScriptedHttpClient::new()
            .respond_json(RANDOMUSER, user_payload("Japan"))
            .respond(RESTCOUNTRIES, upstream_error())
            .respond_json(NEWSAPI, news_payload(&[])),
    );

    let report = orchestrator(&http).run().await.expect("user succeeds");
    let value = serde_json::to_value(&report).expect("serialize");

    assert!(value["requestId"].is_string());
    assert!(value["generatedAt"].is_string());
    assert_eq!(value["user"]["country"], "Japan");
    assert_eq!(
        value["country"],
        json!({"status": "error", "where": "Country", "message": "REST Countries API failed"})
    );
    assert_eq!(value["rates"], json!({"status": "blocked", "blockedBy": "Country"}));
    assert_eq!(
        value["news"],
        json!({"status": "ok", "data": {"country": "Japan", "count": 0, "articles": []}})
    );
}

fn japan_scripted_with_user(user: HttpResponse) -> ScriptedHttpClient {
    ScriptedHttpClient::new()
        .respond(RANDOMUSER, user)
        .respond_json(RESTCOUNTRIES, JAPAN_PAYLOAD)
        .respond_json(rates_url("JPY"), JPY_RATES_PAYLOAD)
        .respond_json(NEWSAPI, news_payload(&[]))
}
