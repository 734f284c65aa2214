// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::utils::errors::AnalysisError;

/// 单个审计项
///
/// 所有字段都是可选的，缺失或类型不符时退化为默认值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Audit {
    pub title: Option<String>,
    pub description: Option<String>,
    /// 0-1 之间的分数，可能为 null
    pub score: Option<f64>,
    pub numeric_value: Option<f64>,
    pub display_value: Option<String>,
    /// 原始 details 对象，不存在时为 `Value::Null`
    pub details: Value,
}

impl Audit {
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            title: text("title"),
            description: text("description"),
            score: value.get("score").and_then(Value::as_f64),
            numeric_value: value.get("numericValue").and_then(Value::as_f64),
            display_value: text("displayValue"),
            details: value.get("details").cloned().unwrap_or(Value::Null),
        }
    }

    /// details.type 字段
    pub fn details_type(&self) -> Option<&str> {
        self.details.get("type").and_then(Value::as_str)
    }

    pub fn title_or_empty(&self) -> String {
        self.title.clone().unwrap_or_default()
    }

    pub fn description_or_empty(&self) -> String {
        self.description.clone().unwrap_or_default()
    }
}

/// PageSpeed Insights 原始报告
///
/// 只保留归一化需要的部分：分类、按文档顺序排列的审计项和真实用户体验数据
#[derive(Debug, Clone, PartialEq)]
pub struct RawReport {
    categories: Map<String, Value>,
    audits: Vec<(String, Audit)>,
    index: HashMap<String, usize>,
    loading_experience: Value,
    origin_loading_experience: Value,
}

impl RawReport {
    /// 从上游JSON构建原始报告
    ///
    /// # 返回值
    ///
    /// * `Ok(RawReport)` - 结构完整
    /// * `Err(AnalysisError::MalformedUpstreamData)` - 缺少
    ///   `lighthouseResult.categories` 或 `lighthouseResult.audits`
    pub fn from_value(value: &Value) -> Result<Self, AnalysisError> {
        let lighthouse = value
            .get("lighthouseResult")
            .and_then(Value::as_object)
            .ok_or_else(|| malformed("lighthouseResult"))?;

        let categories = lighthouse
            .get("categories")
            .and_then(Value::as_object)
            .cloned()
            .ok_or_else(|| malformed("lighthouseResult.categories"))?;

        let audit_map = lighthouse
            .get("audits")
            .and_then(Value::as_object)
            .ok_or_else(|| malformed("lighthouseResult.audits"))?;

        let mut audits = Vec::with_capacity(audit_map.len());
        let mut index = HashMap::with_capacity(audit_map.len());
        for (id, audit) in audit_map {
            index.insert(id.clone(), audits.len());
            audits.push((id.clone(), Audit::from_value(audit)));
        }

        Ok(Self {
            categories,
            audits,
            index,
            loading_experience: value.get("loadingExperience").cloned().unwrap_or(Value::Null),
            origin_loading_experience: value
                .get("originLoadingExperience")
                .cloned()
                .unwrap_or(Value::Null),
        })
    }

    /// 分类分数
    ///
    /// 分类不存在时返回 `None`；分类存在但分数为 null 时视为 0
    pub fn category_score(&self, id: &str) -> Option<f64> {
        let category = self.categories.get(id)?.as_object()?;
        Some(category.get("score").and_then(Value::as_f64).unwrap_or(0.0))
    }

    pub fn audit(&self, id: &str) -> Option<&Audit> {
        self.index.get(id).map(|&i| &self.audits[i].1)
    }

    /// 按文档顺序遍历审计项
    pub fn audits(&self) -> impl Iterator<Item = (&str, &Audit)> {
        self.audits.iter().map(|(id, audit)| (id.as_str(), audit))
    }

    pub fn loading_experience(&self) -> &Value {
        &self.loading_experience
    }

    pub fn origin_loading_experience(&self) -> &Value {
        &self.origin_loading_experience
    }
}

fn malformed(field: &str) -> AnalysisError {
    AnalysisError::MalformedUpstreamData(format!("missing {}", field))
}
