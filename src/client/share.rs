// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

use crate::domain::models::report::NormalizedReport;

/// 系统分享面板的数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// 分享方式
#[derive(Debug, Clone, PartialEq)]
pub enum ShareAction {
    /// 平台支持原生分享
    Native(SharePayload),
    /// 退化为复制到剪贴板的文本
    Clipboard(String),
}

/// 构建分享动作
///
/// # 参数
///
/// * `report` - 当前报告
/// * `page_url` - 分析页面自身的地址
/// * `native_available` - 平台是否支持原生分享
pub fn share_action(report: &NormalizedReport, page_url: &str, native_available: bool) -> ShareAction {
    if native_available {
        ShareAction::Native(SharePayload {
            title: format!("Performance Analysis - {}", report.url),
            text: format!("Performance analysis results for {}", report.url),
            url: page_url.to_string(),
        })
    } else {
        ShareAction::Clipboard(clipboard_text(report))
    }
}

pub fn clipboard_text(report: &NormalizedReport) -> String {
    format!(
        "Performance Analysis Results\nURL: {}\nPerformance Score: {}/100\nAnalyzed: {}",
        report.url,
        report.scores.performance,
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    )
}
