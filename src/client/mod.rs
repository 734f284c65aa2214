// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 客户端模块
///
/// 浏览器页面逻辑的Rust实现：调用 `/analyze`、把报告渲染为视图模型、
/// 导出HAR、分享、保存最近一次报告
pub mod controller;
pub mod errors;
pub mod har;
pub mod relay;
pub mod share;
pub mod store;
pub mod view;

#[cfg(test)]
pub(crate) fn sample_report() -> crate::domain::models::report::NormalizedReport {
    serde_json::from_value(serde_json::json!({
        "url": "https://example.com",
        "timestamp": "2025-01-15T10:20:30Z",
        "device": "mobile",
        "scores": {"performance": 73, "accessibility": 92, "bestPractices": 100, "seo": 83},
        "metrics": {
            "fcp": {"value": 1234.5, "displayValue": "1.2 s", "rating": "good", "score": 0.95},
            "lcp": {"value": 2890.0, "displayValue": "2.9 s", "rating": "needs-improvement", "score": 0.62},
            "tbt": {"value": 640.0, "displayValue": "640 ms", "rating": "poor", "score": 0.21},
            "cls": {"value": 0.02, "displayValue": "0.02", "rating": "good", "score": 1.0},
            "si": {"value": null, "displayValue": "N/A", "rating": "poor"}
        },
        "screenshot": {
            "data": "/9j/4AAQ",
            "timestamp": 1736936430123.0,
            "type": "final",
            "width": 412,
            "height": 823
        },
        "opportunities": [
            {"id": "unused-javascript", "title": "Reduce unused JavaScript", "description": "Remove dead code.", "savings": "0.9 s", "score": 0.2},
            {"id": "render-blocking-resources", "title": "Eliminate render-blocking resources", "description": "Inline critical CSS.", "savings": null, "score": 0.7},
            {"id": "unused-css-rules", "title": "Reduce unused CSS", "description": "Remove unused rules.", "savings": "0.1 s", "score": 0.9}
        ],
        "diagnostics": [],
        "rawData": {"loadingExperience": null, "originLoadingExperience": null}
    }))
    .unwrap()
}
