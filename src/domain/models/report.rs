// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::analysis_request::Device;

/// 归一化后的分析报告
///
/// 每次请求重新构建，响应发送后即丢弃
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReport {
    pub url: String,
    /// 报告生成时间（ISO-8601）
    pub timestamp: DateTime<Utc>,
    pub device: Device,
    pub scores: CategoryScores,
    pub metrics: CoreWebVitals,
    pub screenshot: Option<ScreenshotInfo>,
    pub opportunities: Vec<Opportunity>,
    pub diagnostics: Vec<Diagnostic>,
    pub raw_data: RawData,
}

/// 四个分类的整数分数（0-100）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub performance: u8,
    pub accessibility: u8,
    pub best_practices: u8,
    pub seo: u8,
}

/// 核心网页指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreWebVitals {
    pub fcp: MetricSummary,
    pub lcp: MetricSummary,
    pub tbt: MetricSummary,
    pub cls: MetricSummary,
    pub si: MetricSummary,
}

/// 指标评级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Good,
    NeedsImprovement,
    Poor,
}

impl Rating {
    /// 根据审计分数评级，0.9 和 0.5 归入较高档
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Rating::Good
        } else if score >= 0.5 {
            Rating::NeedsImprovement
        } else {
            Rating::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    pub value: Option<f64>,
    pub display_value: String,
    pub rating: Rating,
    /// 审计项缺失时不输出
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl MetricSummary {
    /// 审计项缺失时的占位指标
    pub fn unavailable() -> Self {
        Self {
            value: None,
            display_value: "N/A".to_string(),
            rating: Rating::Poor,
            score: None,
        }
    }
}

/// 截图来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenshotKind {
    Final,
    Thumbnail,
    FullPage,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenshotInfo {
    /// 不带 data URI 前缀的 base64 图片数据
    pub data: String,
    pub timestamp: Option<f64>,
    #[serde(rename = "type")]
    pub kind: ScreenshotKind,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

/// 优化建议
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub savings: Option<String>,
    pub score: Option<f64>,
}

/// 诊断问题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub id: String,
    pub title: String,
    pub description: String,
    pub score: Option<f64>,
}

/// 原样透传的真实用户体验数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawData {
    pub loading_experience: Value,
    pub origin_loading_experience: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_boundaries() {
        assert_eq!(Rating::from_score(1.0), Rating::Good);
        assert_eq!(Rating::from_score(0.9), Rating::Good);
        assert_eq!(Rating::from_score(0.89), Rating::NeedsImprovement);
        assert_eq!(Rating::from_score(0.5), Rating::NeedsImprovement);
        assert_eq!(Rating::from_score(0.49), Rating::Poor);
        assert_eq!(Rating::from_score(0.0), Rating::Poor);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_value(Rating::NeedsImprovement).unwrap(),
            "needs-improvement"
        );
        assert_eq!(serde_json::to_value(ScreenshotKind::FullPage).unwrap(), "full-page");

        let unavailable = serde_json::to_value(MetricSummary::unavailable()).unwrap();
        assert_eq!(
            unavailable,
            serde_json::json!({"value": null, "displayValue": "N/A", "rating": "poor"})
        );
    }
}
