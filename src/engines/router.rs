// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ScreenshotSettings;
use crate::domain::models::report::{ScreenshotInfo, ScreenshotKind};
use crate::engines::reqwest_engine::ReqwestScreenshotEngine;
use crate::engines::traits::ScreenshotSource;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use tracing::{info, warn};

/// 备用截图路由器
///
/// 按配置顺序逐个尝试截图服务，前一个失败或超时后才尝试下一个，
/// 返回第一个成功的结果。失败只记录日志，不向上传播。
pub struct FallbackRouter {
    /// 截图服务列表（按优先级排序）
    sources: Vec<Arc<dyn ScreenshotSource>>,
    /// 备用截图宽度
    width: u32,
    /// 备用截图高度
    height: u32,
}

impl FallbackRouter {
    /// 创建新的备用截图路由器
    ///
    /// # 参数
    ///
    /// * `sources` - 截图服务列表
    /// * `width` - 上报的截图宽度
    /// * `height` - 上报的截图高度
    pub fn new(sources: Vec<Arc<dyn ScreenshotSource>>, width: u32, height: u32) -> Self {
        Self {
            sources,
            width,
            height,
        }
    }

    /// 根据配置创建路由器
    ///
    /// 无法解析的服务模板会被跳过并记录警告
    pub fn from_settings(settings: &ScreenshotSettings, user_agent: &str) -> Self {
        let sources = settings
            .fallback_services
            .iter()
            .filter_map(|template| {
                match ReqwestScreenshotEngine::new(template.as_str(), settings.timeout(), user_agent) {
                    Ok(engine) => Some(Arc::new(engine) as Arc<dyn ScreenshotSource>),
                    Err(e) => {
                        warn!(template = %template, error = %e, "Skipping screenshot service");
                        None
                    }
                }
            })
            .collect();

        Self::new(sources, settings.width, settings.height)
    }

    /// 不包含任何服务的路由器，`capture` 总是返回 `None`
    pub fn disabled() -> Self {
        Self::new(Vec::new(), 1024, 768)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// 获取备用截图
    ///
    /// # 参数
    ///
    /// * `target_url` - 目标页面地址
    ///
    /// # 返回值
    ///
    /// 第一个成功服务的截图（base64编码），全部失败时返回 `None`
    pub async fn capture(&self, target_url: &str) -> Option<ScreenshotInfo> {
        if target_url.is_empty() || self.sources.is_empty() {
            return None;
        }

        let mut failures = Vec::new();
        for source in &self.sources {
            counter!("screenshot_fallback_attempts_total").increment(1);
            match source.fetch(target_url).await {
                Ok(image) => {
                    info!(
                        service = source.name(),
                        failed_before = failures.len(),
                        "Using fallback screenshot"
                    );
                    return Some(ScreenshotInfo {
                        data: BASE64.encode(&image),
                        timestamp: Some(Utc::now().timestamp() as f64),
                        kind: ScreenshotKind::Fallback,
                        width: Some(self.width),
                        height: Some(self.height),
                        service: Some("external".to_string()),
                    });
                }
                Err(e) => {
                    counter!("screenshot_fallback_failures_total").increment(1);
                    warn!(service = source.name(), error = %e, "Fallback screenshot service failed");
                    failures.push(format!("{}: {}", source.name(), e));
                }
            }
        }

        warn!(
            url = target_url,
            failures = ?failures,
            "All fallback screenshot services failed"
        );
        None
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
