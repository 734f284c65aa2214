// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use tracing::debug;

use crate::domain::models::analysis_request::AnalysisRequest;
use crate::domain::models::raw_report::{Audit, RawReport};
use crate::domain::models::report::{
    CategoryScores, CoreWebVitals, Diagnostic, MetricSummary, NormalizedReport, Opportunity,
    Rating, RawData, ScreenshotInfo, ScreenshotKind,
};
use crate::engines::router::FallbackRouter;
use crate::utils::errors::AnalysisError;
use crate::utils::url_utils::strip_data_uri_prefix;

/// 优化建议和诊断列表的最大长度
pub const MAX_LIST_ENTRIES: usize = 10;

/// 诊断审计项白名单，按输出顺序排列
pub const DIAGNOSTIC_AUDITS: [&str; 10] = [
    "unused-javascript",
    "unused-css-rules",
    "render-blocking-resources",
    "uses-long-cache-ttl",
    "efficient-animated-content",
    "mainthread-work-breakdown",
    "bootup-time",
    "uses-rel-preconnect",
    "font-display",
    "third-party-summary",
];

/// 结果归一化服务
///
/// 把 PageSpeed Insights 的嵌套报告转换为界面使用的扁平结构。
/// 除备用截图外，每一步都是纯函数。
pub struct ResultNormalizer {
    fallback: FallbackRouter,
}

impl ResultNormalizer {
    pub fn new(fallback: FallbackRouter) -> Self {
        Self { fallback }
    }

    /// 归一化上游响应，报告时间取当前时间
    pub async fn normalize(
        &self,
        raw: &Value,
        request: &AnalysisRequest,
    ) -> Result<NormalizedReport, AnalysisError> {
        self.normalize_at(raw, request, Utc::now()).await
    }

    /// 归一化上游响应
    ///
    /// # 参数
    ///
    /// * `raw` - 上游响应体
    /// * `request` - 原始分析请求
    /// * `generated_at` - 报告生成时间
    ///
    /// # 返回值
    ///
    /// * `Ok(NormalizedReport)` - 归一化结果
    /// * `Err(AnalysisError::MalformedUpstreamData)` - 缺少必需的结构字段
    pub async fn normalize_at(
        &self,
        raw: &Value,
        request: &AnalysisRequest,
        generated_at: DateTime<Utc>,
    ) -> Result<NormalizedReport, AnalysisError> {
        let report = RawReport::from_value(raw)?;
        let scores = extract_scores(&report)?;
        let metrics = extract_metrics(&report);

        let screenshot = match extract_embedded_screenshot(&report) {
            Some(shot) => Some(shot),
            None => {
                debug!(url = %request.url, "No embedded screenshot, trying fallback services");
                self.fallback.capture(&request.url).await
            }
        };

        Ok(NormalizedReport {
            url: request.url.clone(),
            timestamp: generated_at,
            device: request.device,
            scores,
            metrics,
            screenshot,
            opportunities: extract_opportunities(&report),
            diagnostics: extract_diagnostics(&report),
            raw_data: RawData {
                loading_experience: report.loading_experience().clone(),
                origin_loading_experience: report.origin_loading_experience().clone(),
            },
        })
    }
}

/// 分数换算为 0-100 的整数，四舍五入（.5 向上）
///
/// 先在 1e-9 精度上取整，避免 0.735 * 100 = 73.49999... 这类浮点误差
pub fn to_percentage(score: f64) -> u8 {
    let scaled = ((score * 100.0) * 1e9).round() / 1e9;
    (scaled + 0.5).floor().clamp(0.0, 100.0) as u8
}

/// 提取四个分类分数，任一分类缺失即失败
pub fn extract_scores(report: &RawReport) -> Result<CategoryScores, AnalysisError> {
    let score = |id: &str| {
        report
            .category_score(id)
            .map(to_percentage)
            .ok_or_else(|| {
                AnalysisError::MalformedUpstreamData(format!("missing categories.{}", id))
            })
    };

    Ok(CategoryScores {
        performance: score("performance")?,
        accessibility: score("accessibility")?,
        best_practices: score("best-practices")?,
        seo: score("seo")?,
    })
}

/// 单个指标摘要，评级取自审计项自身的分数
pub fn summarize_metric(audit: Option<&Audit>) -> MetricSummary {
    let Some(audit) = audit else {
        return MetricSummary::unavailable();
    };

    let score = audit.score.unwrap_or(0.0);
    MetricSummary {
        value: Some(audit.numeric_value.unwrap_or(0.0)),
        display_value: audit
            .display_value
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        rating: Rating::from_score(score),
        score: Some(score),
    }
}

pub fn extract_metrics(report: &RawReport) -> CoreWebVitals {
    CoreWebVitals {
        fcp: summarize_metric(report.audit("first-contentful-paint")),
        lcp: summarize_metric(report.audit("largest-contentful-paint")),
        tbt: summarize_metric(report.audit("total-blocking-time")),
        cls: summarize_metric(report.audit("cumulative-layout-shift")),
        si: summarize_metric(report.audit("speed-index")),
    }
}

/// 按优先级从报告内嵌的审计项中提取截图
///
/// 依次尝试 `final-screenshot`、`screenshot-thumbnails`、`full-page-screenshot`
pub fn extract_embedded_screenshot(report: &RawReport) -> Option<ScreenshotInfo> {
    report
        .audit("final-screenshot")
        .and_then(final_screenshot)
        .or_else(|| report.audit("screenshot-thumbnails").and_then(thumbnail_screenshot))
        .or_else(|| report.audit("full-page-screenshot").and_then(full_page_screenshot))
}

fn final_screenshot(audit: &Audit) -> Option<ScreenshotInfo> {
    let details = &audit.details;
    let data = details.get("data")?.as_str()?;
    Some(ScreenshotInfo {
        data: strip_data_uri_prefix(data).to_string(),
        timestamp: details.get("timestamp").and_then(Value::as_f64),
        kind: ScreenshotKind::Final,
        width: dimension(details.get("width")),
        height: dimension(details.get("height")),
        service: None,
    })
}

fn thumbnail_screenshot(audit: &Audit) -> Option<ScreenshotInfo> {
    let first = audit.details.get("items")?.as_array()?.first()?;
    let data = first.get("data")?.as_str()?;
    Some(ScreenshotInfo {
        data: strip_data_uri_prefix(data).to_string(),
        timestamp: first.get("timing").and_then(Value::as_f64),
        kind: ScreenshotKind::Thumbnail,
        width: None,
        height: None,
        service: None,
    })
}

fn full_page_screenshot(audit: &Audit) -> Option<ScreenshotInfo> {
    let screenshot = audit.details.get("screenshot")?;
    let data = screenshot.get("data")?.as_str()?;
    Some(ScreenshotInfo {
        data: strip_data_uri_prefix(data).to_string(),
        timestamp: None,
        kind: ScreenshotKind::FullPage,
        width: dimension(screenshot.get("width")),
        height: dimension(screenshot.get("height")),
        service: None,
    })
}

fn dimension(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
}

/// 提取优化建议
///
/// 只保留 `details.type == "opportunity"` 且 `numericValue > 0` 的审计项，
/// 按分数升序稳定排序（null 视为 0），最多保留 10 条
pub fn extract_opportunities(report: &RawReport) -> Vec<Opportunity> {
    let mut opportunities: Vec<Opportunity> = report
        .audits()
        .filter(|(_, audit)| {
            audit.details_type() == Some("opportunity")
                && audit.numeric_value.is_some_and(|v| v > 0.0)
        })
        .map(|(id, audit)| Opportunity {
            id: id.to_string(),
            title: audit.title_or_empty(),
            description: audit.description_or_empty(),
            savings: audit.display_value.clone(),
            score: audit.score,
        })
        .collect();

    // Vec::sort_by is stable, ties keep document order
    opportunities.sort_by(|a, b| {
        a.score
            .unwrap_or(0.0)
            .partial_cmp(&b.score.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal)
    });
    opportunities.truncate(MAX_LIST_ENTRIES);
    opportunities
}

/// 提取诊断问题
///
/// 按白名单顺序检查，分数低于 1（含 null）的审计项入选
pub fn extract_diagnostics(report: &RawReport) -> Vec<Diagnostic> {
    DIAGNOSTIC_AUDITS
        .iter()
        .filter_map(|&id| {
            let audit = report.audit(id)?;
            if audit.score.unwrap_or(0.0) >= 1.0 {
                return None;
            }
            Some(Diagnostic {
                id: id.to_string(),
                title: audit.title_or_empty(),
                description: audit.description_or_empty(),
                score: audit.score,
            })
        })
        .take(MAX_LIST_ENTRIES)
        .collect()
}

#[cfg(test)]
#[path = "normalizer_test.rs"]
mod tests;
