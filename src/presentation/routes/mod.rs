// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::analyze_use_case::AnalyzeUseCase;
use crate::presentation::handlers::analyze_handler;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let analyze_routes = Router::new()
        .route(
            "/analyze",
            post(analyze_handler::analyze)
                .options(analyze_handler::preflight)
                .fallback(analyze_handler::method_not_allowed),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ));

    Router::new().merge(public_routes).merge(analyze_routes)
}

/// 组装完整应用
///
/// 注入分析用例，所有响应附带 `Access-Control-Allow-Origin: *`
pub fn app(use_case: Arc<AnalyzeUseCase>) -> Router {
    routes()
        .layer(Extension(use_case))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
