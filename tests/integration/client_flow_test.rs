// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{fixture, PSI_PATH, TEST_API_KEY};
use chrono::NaiveDate;
use serde_json::json;
use speedanalyzer::application::use_cases::analyze_use_case::AnalyzeUseCase;
use speedanalyzer::client::controller::{AnalysisController, ViewState};
use speedanalyzer::client::relay::RelayClient;
use speedanalyzer::client::store::{FileReportStore, ReportStore};
use speedanalyzer::client::view::Grade;
use speedanalyzer::config::settings::PageSpeedSettings;
use speedanalyzer::domain::services::normalizer::ResultNormalizer;
use speedanalyzer::engines::router::FallbackRouter;
use speedanalyzer::infrastructure::pagespeed::client::HttpPageSpeedClient;
use speedanalyzer::presentation::routes;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 在随机端口上启动完整服务，返回根地址
async fn spawn_service(psi: &MockServer) -> String {
    let settings = PageSpeedSettings {
        api_key: TEST_API_KEY.to_string(),
        api_base_url: format!("{}{}", psi.uri(), PSI_PATH),
        timeout_seconds: 5,
        locale: "en".to_string(),
        user_agent: "SpeedAnalyzer/1.0".to_string(),
    };
    let use_case = Arc::new(AnalyzeUseCase::new(
        Arc::new(HttpPageSpeedClient::new(&settings).unwrap()),
        ResultNormalizer::new(FallbackRouter::disabled()),
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, routes::app(use_case)).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn controller_round_trip_through_service() {
    let psi = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PSI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture()))
        .mount(&psi)
        .await;

    let base_url = spawn_service(&psi).await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileReportStore::new(dir.path()));
    let relay = Arc::new(RelayClient::new(&base_url, Duration::from_secs(10)).unwrap());

    let mut controller = AnalysisController::new(relay, store.clone());
    controller.submit("https://example.com").await.unwrap();

    match controller.state() {
        ViewState::Results(view) => {
            assert_eq!(view.grade.grade, Grade::C);
            assert_eq!(view.grade.score, 73);
        }
        other => panic!("unexpected state: {:?}", other),
    }

    let saved = store.load().await.unwrap().unwrap();
    assert_eq!(saved.url, "https://example.com");

    let export = controller
        .download(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
        .unwrap();
    assert_eq!(export.file_name, "performance-analysis-2025-01-15.har");
    assert!(export.contents.contains("\"creator\""));
}

#[tokio::test]
async fn controller_surfaces_service_errors() {
    let psi = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PSI_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"status": "down"})))
        .mount(&psi)
        .await;

    let base_url = spawn_service(&psi).await;
    let relay = Arc::new(RelayClient::new(&base_url, Duration::from_secs(10)).unwrap());
    let dir = tempfile::tempdir().unwrap();
    let mut controller =
        AnalysisController::new(relay, Arc::new(FileReportStore::new(dir.path())));

    assert!(controller.submit("https://example.com").await.is_err());
    assert_eq!(
        controller.state(),
        &ViewState::Error("PageSpeed Insights API returned status 503".to_string())
    );
    assert!(controller.current_report().is_none());
}
