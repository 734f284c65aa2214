// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{NaiveDate, SecondsFormat};
use serde::Serialize;
use serde_json::Value;

use super::errors::ClientError;
use crate::domain::models::report::NormalizedReport;

#[derive(Debug, Serialize)]
pub struct Har {
    pub log: HarLog,
}

#[derive(Debug, Serialize)]
pub struct HarLog {
    pub version: &'static str,
    pub creator: HarCreator,
    pub pages: Vec<HarPage>,
    pub entries: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct HarCreator {
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarPage {
    pub started_date_time: String,
    pub id: &'static str,
    pub title: String,
    pub page_timings: PageTimings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTimings {
    pub on_content_load: f64,
    pub on_load: f64,
}

/// 待下载的HAR文件
#[derive(Debug, Clone, PartialEq)]
pub struct HarExport {
    pub file_name: String,
    pub contents: String,
}

/// 从报告构建最小化的HAR文档
///
/// onContentLoad 取 FCP，onLoad 取 LCP，缺失或为零时写 -1
pub fn build_har(report: &NormalizedReport) -> Har {
    let timing = |value: Option<f64>| value.filter(|v| *v != 0.0).unwrap_or(-1.0);

    Har {
        log: HarLog {
            version: "1.2",
            creator: HarCreator {
                name: "SpeedAnalyzer",
                version: "1.0",
            },
            pages: vec![HarPage {
                started_date_time: report
                    .timestamp
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                id: "page_1",
                title: report.url.clone(),
                page_timings: PageTimings {
                    on_content_load: timing(report.metrics.fcp.value),
                    on_load: timing(report.metrics.lcp.value),
                },
            }],
            entries: Vec::new(),
        },
    }
}

pub fn har_file_name(date: NaiveDate) -> String {
    format!("performance-analysis-{}.har", date.format("%Y-%m-%d"))
}

/// 生成下载内容
pub fn export_har(report: &NormalizedReport, today: NaiveDate) -> Result<HarExport, ClientError> {
    Ok(HarExport {
        file_name: har_file_name(today),
        contents: serde_json::to_string_pretty(&build_har(report))?,
    })
}
