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

use axum::{
    body::Bytes,
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    application::{
        dto::analyze_request::AnalyzeRequestDto, use_cases::analyze_use_case::AnalyzeUseCase,
    },
    domain::models::report::NormalizedReport,
    utils::errors::AnalysisError,
};

/// 分析端点
///
/// 请求体按原始字节读取，缺失或非JSON对象的请求体统一视为缺少URL
pub async fn analyze(
    Extension(use_case): Extension<Arc<AnalyzeUseCase>>,
    body: Bytes,
) -> Result<Json<NormalizedReport>, AnalysisError> {
    let dto = AnalyzeRequestDto::from_body(&body)?;
    let report = use_case.execute(dto).await?;
    Ok(Json(report))
}

/// 预检请求
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> impl IntoResponse {
    AnalysisError::MethodNotAllowed
}
