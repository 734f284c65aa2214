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

use async_trait::async_trait;
use metrics::histogram;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::settings::PageSpeedSettings;
use crate::domain::models::analysis_request::AnalysisRequest;
use crate::domain::pagespeed::api::{PageSpeedApi, CATEGORIES};
use crate::utils::errors::AnalysisError;

const CONNECT_FAILED: &str = "Failed to connect to PageSpeed Insights API";
const INVALID_RESPONSE: &str = "Invalid response from PageSpeed Insights API";

/// PageSpeed Insights HTTP 客户端
///
/// 基于reqwest实现，一次请求拉取全部四个分类
pub struct HttpPageSpeedClient {
    client: reqwest::Client,
    api_key: String,
    api_base_url: String,
    locale: String,
}

impl HttpPageSpeedClient {
    /// 创建客户端
    ///
    /// # 参数
    ///
    /// * `settings` - PageSpeed 配置（密钥、地址、超时、语言、User-Agent）
    pub fn new(settings: &PageSpeedSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .build()?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            api_base_url: settings.api_base_url.clone(),
            locale: settings.locale.clone(),
        })
    }

    /// 构建查询参数，`category` 重复出现四次
    pub fn query_params<'a>(&'a self, request: &'a AnalysisRequest) -> Vec<(&'a str, &'a str)> {
        let mut params = vec![
            ("url", request.url.as_str()),
            ("key", self.api_key.as_str()),
            ("strategy", request.device.strategy()),
        ];
        params.extend(CATEGORIES.iter().map(|c| ("category", *c)));
        params.push(("locale", self.locale.as_str()));
        params
    }
}

#[async_trait]
impl PageSpeedApi for HttpPageSpeedClient {
    async fn run_pagespeed(&self, request: &AnalysisRequest) -> Result<Value, AnalysisError> {
        let start = Instant::now();
        let response = self
            .client
            .get(&self.api_base_url)
            .query(&self.query_params(request))
            .send()
            .await
            .map_err(|e| {
                warn!(url = %request.url, timeout = e.is_timeout(), error = %e, "PageSpeed request failed");
                AnalysisError::UpstreamUnavailable(CONNECT_FAILED.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!(url = %request.url, timeout = e.is_timeout(), error = %e, "Failed to read PageSpeed response");
            AnalysisError::UpstreamUnavailable(CONNECT_FAILED.to_string())
        })?;

        let elapsed = start.elapsed();
        histogram!("pagespeed_request_duration_seconds").record(elapsed.as_secs_f64());
        debug!(
            url = %request.url,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "PageSpeed response received"
        );

        let data: Value = serde_json::from_slice(&body)
            .map_err(|_| AnalysisError::UpstreamError(INVALID_RESPONSE.to_string()))?;

        if let Some(message) = upstream_error_message(&data) {
            return Err(AnalysisError::UpstreamError(format!("API Error: {}", message)));
        }

        if !status.is_success() {
            return Err(AnalysisError::UpstreamError(format!(
                "PageSpeed Insights API returned status {}",
                status.as_u16()
            )));
        }

        // An empty document carries nothing to normalize
        match &data {
            Value::Object(map) if !map.is_empty() => Ok(data),
            _ => Err(AnalysisError::UpstreamError(INVALID_RESPONSE.to_string())),
        }
    }
}

/// 提取上游返回的错误信息
///
/// 错误既可能是 `{"error": {"message": ...}}` 也可能直接是字符串
pub fn upstream_error_message(data: &Value) -> Option<String> {
    match data.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        error => Some(
            error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string(),
        ),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
