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

use metrics::counter;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;

use crate::{
    application::dto::analyze_request::AnalyzeRequestDto,
    domain::{
        models::{analysis_request::AnalysisRequest, report::NormalizedReport},
        pagespeed::api::PageSpeedApi,
        services::normalizer::ResultNormalizer,
    },
    utils::errors::AnalysisError,
};

/// 分析用例
///
/// 校验请求 → 调用 PageSpeed Insights → 归一化结果，
/// 单次请求单条流水线，没有重试和缓存
pub struct AnalyzeUseCase {
    api: Arc<dyn PageSpeedApi>,
    normalizer: ResultNormalizer,
}

impl AnalyzeUseCase {
    pub fn new(api: Arc<dyn PageSpeedApi>, normalizer: ResultNormalizer) -> Self {
        Self { api, normalizer }
    }

    /// 处理客户端提交的请求
    pub async fn execute(&self, dto: AnalyzeRequestDto) -> Result<NormalizedReport, AnalysisError> {
        let request = dto.into_request().inspect_err(|e| {
            counter!("analysis_failures_total", "kind" => e.kind()).increment(1);
            if e.is_client_error() {
                debug!(error = %e, "Rejected analysis request");
            }
        })?;
        self.analyze(&request).await
    }

    /// 分析已校验的请求
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<NormalizedReport, AnalysisError> {
        let span = tracing::info_span!(
            "analyze",
            request_id = %Uuid::new_v4(),
            url = %request.url,
            device = %request.device
        );

        async {
            counter!("analysis_requests_total", "device" => request.device.as_str()).increment(1);
            let start = Instant::now();

            let result = match self.api.run_pagespeed(request).await {
                Ok(raw) => self.normalizer.normalize(&raw, request).await,
                Err(e) => Err(e),
            };

            match &result {
                Ok(report) => info!(
                    performance = report.scores.performance,
                    opportunities = report.opportunities.len(),
                    screenshot = report.screenshot.is_some(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Analysis completed"
                ),
                Err(e @ AnalysisError::MalformedUpstreamData(detail)) => {
                    counter!("analysis_failures_total", "kind" => e.kind()).increment(1);
                    error!(detail = %detail, "PageSpeed response is missing required fields");
                }
                Err(e) => {
                    counter!("analysis_failures_total", "kind" => e.kind()).increment(1);
                    warn!(error = %e, kind = e.kind(), "Analysis failed");
                }
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "analyze_use_case_test.rs"]
mod tests;
