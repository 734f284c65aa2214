// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::utils::errors::AnalysisError;

impl AnalysisError {
    /// 错误对应的HTTP状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AnalysisError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AnalysisError::UpstreamUnavailable(_)
            | AnalysisError::UpstreamError(_)
            | AnalysisError::MalformedUpstreamData(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        // Display never carries the malformed-data detail
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
