// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::helpers::{
    create_test_app, fixture, fixture_without_screenshots, mount_psi, TEST_API_KEY,
};
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn analyze_returns_normalized_report() {
    let app = create_test_app().await;
    mount_psi(&app, 200, fixture()).await;

    let response = app
        .server
        .post("/analyze")
        .json(&json!({"url": "https://example.com", "device": "desktop"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("access-control-allow-origin"), "*");

    let body: Value = response.json();
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(body["device"], "desktop");
    assert_eq!(
        body["scores"],
        json!({"performance": 73, "accessibility": 92, "bestPractices": 100, "seo": 83})
    );
    assert_eq!(body["metrics"]["fcp"]["rating"], "good");
    assert_eq!(body["screenshot"]["type"], "final");
    assert!(!body["screenshot"]["data"]
        .as_str()
        .unwrap()
        .starts_with("data:"));
    assert_eq!(body["opportunities"][0]["id"], "unused-javascript");
    assert!(body["opportunities"].as_array().unwrap().len() <= 10);
    assert!(body["diagnostics"].as_array().unwrap().len() <= 10);
    assert_eq!(
        body["rawData"]["loadingExperience"]["overall_category"],
        "FAST"
    );

    // 出站查询参数
    let requests = app.psi.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(query.contains(&("url".to_string(), "https://example.com".to_string())));
    assert!(query.contains(&("key".to_string(), TEST_API_KEY.to_string())));
    assert!(query.contains(&("strategy".to_string(), "DESKTOP".to_string())));
    assert_eq!(query.iter().filter(|(k, _)| k == "category").count(), 4);
}

#[tokio::test]
async fn unknown_device_defaults_to_mobile() {
    let app = create_test_app().await;
    mount_psi(&app, 200, fixture()).await;

    let response = app
        .server
        .post("/analyze")
        .json(&json!({"url": "https://example.com", "device": 42}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["device"], "mobile");
}

#[tokio::test]
async fn invalid_url_is_rejected_without_upstream_call() {
    let app = create_test_app().await;
    mount_psi(&app, 200, fixture()).await;

    let response = app
        .server
        .post("/analyze")
        .json(&json!({"url": "not-a-url"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "Invalid URL format"})
    );
    assert!(app.psi.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_url_is_rejected() {
    let app = create_test_app().await;

    for body in [json!({}), json!({"device": "mobile"}), json!([1, 2])] {
        let response = app.server.post("/analyze").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "URL is required"})
        );
    }

    let response = app.server.post("/analyze").text("not json at all").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "URL is required");

    let response = app.server.post("/analyze").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let app = create_test_app().await;

    for verb in [Method::GET, Method::PUT, Method::DELETE] {
        let response = app.server.method(verb, "/analyze").await;
        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Method not allowed"})
        );
        assert_eq!(response.header("access-control-allow-origin"), "*");
    }
}

#[tokio::test]
async fn preflight_returns_cors_headers() {
    let app = create_test_app().await;

    let response = app.server.method(Method::OPTIONS, "/analyze").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().is_empty());
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(response.header("access-control-allow-methods"), "POST");
    assert_eq!(
        response.header("access-control-allow-headers"),
        "Content-Type"
    );
}

#[tokio::test]
async fn upstream_error_payload_is_relayed() {
    let app = create_test_app().await;
    mount_psi(
        &app,
        400,
        json!({"error": {"code": 400, "message": "Lighthouse returned error: NO_FCP"}}),
    )
    .await;

    let response = app
        .server
        .post("/analyze")
        .json(&json!({"url": "https://example.com"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "API Error: Lighthouse returned error: NO_FCP"})
    );
}

#[tokio::test]
async fn missing_category_is_malformed() {
    let app = create_test_app().await;
    let mut raw = fixture();
    raw["lighthouseResult"]["categories"]
        .as_object_mut()
        .unwrap()
        .remove("seo");
    mount_psi(&app, 200, raw).await;

    let response = app
        .server
        .post("/analyze")
        .json(&json!({"url": "https://example.com"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "Malformed response from PageSpeed Insights API"})
    );
}

#[tokio::test]
async fn fallback_screenshot_is_used_in_order() {
    let app = create_test_app().await;
    mount_psi(&app, 200, fixture_without_screenshots()).await;

    Mock::given(method("GET"))
        .and(path("/primary"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.screenshots)
        .await;
    Mock::given(method("GET"))
        .and(path("/secondary"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fake-png".to_vec()))
        .expect(1)
        .mount(&app.screenshots)
        .await;

    let response = app
        .server
        .post("/analyze")
        .json(&json!({"url": "https://example.com"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let shot = &response.json::<Value>()["screenshot"];
    assert_eq!(shot["type"], "fallback");
    assert_eq!(shot["data"], "ZmFrZS1wbmc=");
    assert_eq!(shot["width"], 1024);
    assert_eq!(shot["height"], 768);
    assert_eq!(shot["service"], "external");
}

#[tokio::test]
async fn screenshot_is_null_when_all_fallbacks_fail() {
    let app = create_test_app().await;
    mount_psi(&app, 200, fixture_without_screenshots()).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.screenshots)
        .await;

    let response = app
        .server
        .post("/analyze")
        .json(&json!({"url": "https://example.com"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["screenshot"], Value::Null);
    assert_eq!(app.screenshots.received_requests().await.unwrap().len(), 2);
}
