// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use serde_json::Value;
use speedanalyzer::application::use_cases::analyze_use_case::AnalyzeUseCase;
use speedanalyzer::config::settings::{PageSpeedSettings, ScreenshotSettings};
use speedanalyzer::domain::services::normalizer::ResultNormalizer;
use speedanalyzer::engines::router::FallbackRouter;
use speedanalyzer::infrastructure::pagespeed::client::HttpPageSpeedClient;
use speedanalyzer::presentation::routes;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PSI_PATH: &str = "/pagespeedonline/v5/runPagespeed";
pub const TEST_API_KEY: &str = "test-api-key";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    /// 模拟的 PageSpeed Insights 服务
    pub psi: MockServer,
    /// 模拟的备用截图服务
    pub screenshots: MockServer,
}

pub fn fixture() -> Value {
    serde_json::from_str(include_str!("../../fixtures/pagespeed_response.json"))
        .expect("fixture is valid JSON")
}

/// 去掉所有内嵌截图审计的 PageSpeed 响应
pub fn fixture_without_screenshots() -> Value {
    let mut raw = fixture();
    if let Some(audits) = raw["lighthouseResult"]["audits"].as_object_mut() {
        audits.remove("final-screenshot");
        audits.remove("screenshot-thumbnails");
        audits.remove("full-page-screenshot");
    }
    raw
}

pub async fn create_test_app() -> TestApp {
    let psi = MockServer::start().await;
    let screenshots = MockServer::start().await;

    let pagespeed = PageSpeedSettings {
        api_key: TEST_API_KEY.to_string(),
        api_base_url: format!("{}{}", psi.uri(), PSI_PATH),
        timeout_seconds: 5,
        locale: "en".to_string(),
        user_agent: "SpeedAnalyzer/1.0".to_string(),
    };
    let screenshot = ScreenshotSettings {
        fallback_services: vec![
            format!("{}/primary?url={{url}}", screenshots.uri()),
            format!("{}/secondary?url={{url}}", screenshots.uri()),
        ],
        timeout_seconds: 2,
        width: 1024,
        height: 768,
    };

    let client = HttpPageSpeedClient::new(&pagespeed).expect("Failed to build PageSpeed client");
    let fallback = FallbackRouter::from_settings(&screenshot, &pagespeed.user_agent);
    let use_case = Arc::new(AnalyzeUseCase::new(
        Arc::new(client),
        ResultNormalizer::new(fallback),
    ));

    let server = TestServer::new(routes::app(use_case)).expect("Failed to start test server");

    TestApp {
        server,
        psi,
        screenshots,
    }
}

/// 让模拟的 PageSpeed 服务返回指定响应
pub async fn mount_psi(app: &TestApp, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(PSI_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&app.psi)
        .await;
}
