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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 未配置时的API密钥占位符
pub const API_KEY_PLACEHOLDER: &str = "YOUR_GOOGLE_PAGESPEED_API_KEY";

/// 默认的备用截图服务列表，`{url}` 会被替换为URL编码后的目标地址
pub const DEFAULT_FALLBACK_SCREENSHOT_SERVICES: [&str; 2] = [
    "https://api.screenshotmachine.com/?key=demo&url={url}&dimension=1024x768&format=jpg",
    "https://htmlcsstoimage.com/demo_images/image.jpeg",
];

/// 应用程序配置设置
///
/// 包含服务器、PageSpeed API、备用截图服务和指标导出等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// PageSpeed Insights API 配置
    pub pagespeed: PageSpeedSettings,
    /// 备用截图配置
    pub screenshot: ScreenshotSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// PageSpeed Insights API 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct PageSpeedSettings {
    /// API密钥
    pub api_key: String,
    /// API地址
    pub api_base_url: String,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
    /// 报告语言
    pub locale: String,
    /// 出站请求的 User-Agent
    pub user_agent: String,
}

impl PageSpeedSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// 备用截图配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenshotSettings {
    /// 按顺序尝试的截图服务地址模板
    pub fallback_services: Vec<String>,
    /// 单次尝试的超时时间（秒）
    pub timeout_seconds: u64,
    /// 备用截图宽度
    pub width: u32,
    /// 备用截图高度
    pub height: u32,
}

impl ScreenshotSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// 指标导出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 文件
    /// 以及 `SPEEDANALYZER__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("SPEEDANALYZER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("screenshot.fallback_services")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// 仅包含默认值的配置构建器
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError>
    {
        let fallback_services: Vec<String> = DEFAULT_FALLBACK_SCREENSHOT_SERVICES
            .iter()
            .map(|s| s.to_string())
            .collect();

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("pagespeed.api_key", API_KEY_PLACEHOLDER)?
            .set_default(
                "pagespeed.api_base_url",
                "https://www.googleapis.com/pagespeedonline/v5/runPagespeed",
            )?
            .set_default("pagespeed.timeout_seconds", 60)?
            .set_default("pagespeed.locale", "en")?
            .set_default("pagespeed.user_agent", "SpeedAnalyzer/1.0")?
            .set_default("screenshot.fallback_services", fallback_services)?
            .set_default("screenshot.timeout_seconds", 30)?
            .set_default("screenshot.width", 1024)?
            .set_default("screenshot.height", 768)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }

    /// 校验API密钥
    ///
    /// 空密钥或仍为占位符时返回错误
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = self.pagespeed.api_key.trim();
        if key.is_empty() {
            return Err(ConfigError::Message(
                "Google PageSpeed Insights API key is required".to_string(),
            ));
        }
        if key == API_KEY_PLACEHOLDER {
            return Err(ConfigError::Message(
                "Please configure your Google PageSpeed Insights API key (SPEEDANALYZER__PAGESPEED__API_KEY)"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
