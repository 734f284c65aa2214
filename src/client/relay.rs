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
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::errors::ClientError;
use crate::domain::models::{analysis_request::Device, report::NormalizedReport};

/// 分析服务接口
#[async_trait]
pub trait AnalysisRelay: Send + Sync {
    async fn analyze(&self, url: &str, device: Device) -> Result<NormalizedReport, ClientError>;
}

/// 通过HTTP调用 `/analyze` 的客户端
pub struct RelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    /// 创建客户端
    ///
    /// # 参数
    ///
    /// * `base_url` - 服务根地址，例如 `http://localhost:8080`
    /// * `timeout` - 整个请求的超时，需要覆盖服务端调用PageSpeed的耗时
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/analyze", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisRelay for RelayClient {
    async fn analyze(&self, url: &str, device: Device) -> Result<NormalizedReport, ClientError> {
        debug!(endpoint = %self.endpoint, url = %url, device = %device, "Submitting analysis");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "url": url, "device": device }))
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        // 服务端错误体优先于状态码
        let data: Value = match serde_json::from_slice(&body) {
            Ok(data) => data,
            Err(_) if !status.is_success() => return Err(ClientError::HttpStatus(status.as_u16())),
            Err(e) => return Err(ClientError::InvalidResponse(e)),
        };

        if let Some(message) = data.get("error").and_then(Value::as_str) {
            return Err(ClientError::Server(message.to_string()));
        }
        if !status.is_success() {
            return Err(ClientError::HttpStatus(status.as_u16()));
        }

        serde_json::from_value(data).map_err(ClientError::InvalidResponse)
    }
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
