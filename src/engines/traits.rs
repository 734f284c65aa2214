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
use bytes::Bytes;
use thiserror::Error;

/// 截图服务错误类型
#[derive(Error, Debug)]
pub enum ScreenshotError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 服务返回非成功状态码
    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),
    /// 服务返回空内容
    #[error("Empty response body")]
    EmptyBody,
    /// 服务地址无效
    #[error("Invalid service url: {0}")]
    InvalidServiceUrl(String),
}

impl ScreenshotError {
    /// 判断是否为超时
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScreenshotError::RequestFailed(e) if e.is_timeout())
    }
}

/// 截图服务特质
///
/// 每个实现代表一个外部截图服务，按配置顺序依次尝试
#[async_trait]
pub trait ScreenshotSource: Send + Sync {
    /// 获取目标页面的截图原始字节
    async fn fetch(&self, target_url: &str) -> Result<Bytes, ScreenshotError>;

    /// 服务名称
    fn name(&self) -> &str;
}
