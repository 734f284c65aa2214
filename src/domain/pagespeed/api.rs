// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::analysis_request::AnalysisRequest;
use crate::utils::errors::AnalysisError;
use async_trait::async_trait;
use serde_json::Value;

/// 一次请求中拉取的四个分类
pub const CATEGORIES: [&str; 4] = ["PERFORMANCE", "ACCESSIBILITY", "BEST_PRACTICES", "SEO"];

#[async_trait]
pub trait PageSpeedApi: Send + Sync {
    /// Run a PageSpeed analysis and return the raw response body.
    ///
    /// Implementations map transport failures and timeouts to
    /// `UpstreamUnavailable`, and unparseable bodies or explicit error
    /// payloads to `UpstreamError`.
    async fn run_pagespeed(&self, request: &AnalysisRequest) -> Result<Value, AnalysisError>;
}
