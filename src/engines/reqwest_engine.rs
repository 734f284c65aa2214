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

use crate::engines::traits::{ScreenshotError, ScreenshotSource};
use async_trait::async_trait;
use bytes::Bytes;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// 目标地址占位符
pub const URL_PLACEHOLDER: &str = "{url}";

/// 截图抓取引擎
///
/// 基于reqwest实现，对一个外部截图服务发起GET请求
pub struct ReqwestScreenshotEngine {
    name: String,
    url_template: String,
    client: reqwest::Client,
}

impl ReqwestScreenshotEngine {
    /// 创建截图引擎
    ///
    /// # 参数
    ///
    /// * `url_template` - 服务地址模板，`{url}` 会被替换为URL编码后的目标地址
    /// * `timeout` - 单次请求超时时间
    /// * `user_agent` - 出站请求的 User-Agent
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestScreenshotEngine)` - 创建成功
    /// * `Err(ScreenshotError)` - 模板不是有效地址或客户端构建失败
    pub fn new(
        url_template: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ScreenshotError> {
        let url_template = url_template.into();
        let probe = url_template.replace(URL_PLACEHOLDER, "");
        let name = Url::parse(&probe)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .ok_or_else(|| ScreenshotError::InvalidServiceUrl(url_template.clone()))?;

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            name,
            url_template,
            client,
        })
    }

    /// 生成针对目标页面的服务地址
    pub fn service_url(&self, target_url: &str) -> String {
        self.url_template
            .replace(URL_PLACEHOLDER, &urlencoding::encode(target_url))
    }
}

#[async_trait]
impl ScreenshotSource for ReqwestScreenshotEngine {
    /// 执行截图请求
    ///
    /// 非 2xx 状态码和空响应体都视为失败
    async fn fetch(&self, target_url: &str) -> Result<Bytes, ScreenshotError> {
        let start = Instant::now();
        let response = self.client.get(self.service_url(target_url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScreenshotError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(ScreenshotError::EmptyBody);
        }

        debug!(
            service = %self.name,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched fallback screenshot"
        );
        Ok(body)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
