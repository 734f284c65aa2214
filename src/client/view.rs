// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::report::{MetricSummary, NormalizedReport, Opportunity};

pub const SCREENSHOT_PLACEHOLDER: &str = "Screenshot loading...";
pub const NO_OPPORTUNITIES: &str = "No optimization opportunities found";

/// 报告的可渲染视图
///
/// 纯数据，不依赖任何具体的界面实现
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub url: String,
    pub grade: GradeView,
    pub metrics: Vec<MetricView>,
    pub screenshot: ScreenshotPanel,
    pub opportunities: OpportunityList,
}

/// 性能等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            Grade::A => "bg-green-500",
            Grade::B => "bg-green-400",
            Grade::C => "bg-yellow-500",
            Grade::D => "bg-orange-500",
            Grade::F => "bg-red-500",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeView {
    pub grade: Grade,
    pub score: u8,
}

/// 指标状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricStatus {
    Good,
    NeedsImprovement,
    Poor,
}

impl MetricStatus {
    /// 与服务端评级使用相同的阈值，缺失分数视为差
    pub fn from_score(score: Option<f64>) -> Self {
        match score.unwrap_or(0.0) {
            s if s >= 0.9 => MetricStatus::Good,
            s if s >= 0.5 => MetricStatus::NeedsImprovement,
            _ => MetricStatus::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricStatus::Good => "GOOD",
            MetricStatus::NeedsImprovement => "NEEDS IMPROVEMENT",
            MetricStatus::Poor => "POOR",
        }
    }

    pub fn status_class(&self) -> &'static str {
        match self {
            MetricStatus::Good => "metric-good",
            MetricStatus::NeedsImprovement => "metric-needs-improvement",
            MetricStatus::Poor => "metric-poor",
        }
    }

    pub fn value_class(&self) -> &'static str {
        match self {
            MetricStatus::Good => "text-green-600",
            MetricStatus::NeedsImprovement => "text-yellow-600",
            MetricStatus::Poor => "text-red-600",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricView {
    /// 指标键：fcp/lcp/tbt/cls/si
    pub key: &'static str,
    pub value_text: String,
    pub status: MetricStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenshotPanel {
    Image { src: String },
    Placeholder { message: &'static str },
}

/// 优化建议优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// 分数越低优先级越高，缺失分数按 0 处理
    pub fn from_score(score: Option<f64>) -> Self {
        match score.unwrap_or(0.0) {
            s if s <= 0.5 => Priority::High,
            s if s <= 0.8 => Priority::Medium,
            _ => Priority::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            Priority::High => "bg-red-500",
            Priority::Medium => "bg-yellow-500",
            Priority::Low => "bg-green-500",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Priority::High => "bg-red-100 text-red-800",
            Priority::Medium => "bg-yellow-100 text-yellow-800",
            Priority::Low => "bg-green-100 text-green-800",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpportunityCard {
    /// 从 1 开始的序号
    pub rank: usize,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub savings_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OpportunityList {
    Empty { message: &'static str },
    Cards(Vec<OpportunityCard>),
}

/// 把截图数据包装成可直接使用的 data URI
pub fn screenshot_src(data: &str) -> String {
    format!("data:image/jpeg;base64,{}", data)
}

/// 渲染报告
pub fn render(report: &NormalizedReport) -> ReportView {
    let metrics = &report.metrics;
    ReportView {
        url: report.url.clone(),
        grade: GradeView {
            grade: Grade::from_score(report.scores.performance),
            score: report.scores.performance,
        },
        metrics: vec![
            metric_view("fcp", &metrics.fcp),
            metric_view("lcp", &metrics.lcp),
            metric_view("tbt", &metrics.tbt),
            metric_view("cls", &metrics.cls),
            metric_view("si", &metrics.si),
        ],
        screenshot: match &report.screenshot {
            Some(shot) if !shot.data.is_empty() => ScreenshotPanel::Image {
                src: screenshot_src(&shot.data),
            },
            _ => ScreenshotPanel::Placeholder {
                message: SCREENSHOT_PLACEHOLDER,
            },
        },
        opportunities: opportunity_list(&report.opportunities),
    }
}

fn metric_view(key: &'static str, metric: &MetricSummary) -> MetricView {
    let value_text = if metric.display_value.is_empty() {
        "-".to_string()
    } else {
        metric.display_value.clone()
    };
    MetricView {
        key,
        value_text,
        status: MetricStatus::from_score(metric.score),
    }
}

fn opportunity_list(opportunities: &[Opportunity]) -> OpportunityList {
    if opportunities.is_empty() {
        return OpportunityList::Empty {
            message: NO_OPPORTUNITIES,
        };
    }

    OpportunityList::Cards(
        opportunities
            .iter()
            .enumerate()
            .map(|(index, opportunity)| OpportunityCard {
                rank: index + 1,
                title: opportunity.title.clone(),
                description: opportunity.description.clone(),
                priority: Priority::from_score(opportunity.score),
                savings_text: opportunity
                    .savings
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .map(|s| format!("Potential savings: {}", s)),
            })
            .collect(),
    )
}

/// 截图放大弹窗
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenshotModal {
    image_src: Option<String>,
    visible: bool,
}

impl ScreenshotModal {
    pub fn open(&mut self, data: &str) {
        self.image_src = Some(screenshot_src(data));
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// 键盘事件，只响应 Escape
    pub fn handle_key(&mut self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn image_src(&self) -> Option<&str> {
        self.image_src.as_deref()
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
