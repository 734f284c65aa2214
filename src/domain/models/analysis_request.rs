// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use url::Url;

use crate::utils::errors::AnalysisError;
use crate::utils::url_utils::parse_absolute_url;

/// 分析所用的设备类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Mobile,
    Desktop,
}

impl Device {
    /// 将任意输入转换为设备类型
    ///
    /// 缺失、非字符串或不认识的值一律视为 `Mobile`
    pub fn coerce(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("desktop") => Device::Desktop,
            _ => Device::Mobile,
        }
    }

    /// PageSpeed `strategy` 参数值
    pub fn strategy(&self) -> &'static str {
        match self {
            Device::Mobile => "MOBILE",
            Device::Desktop => "DESKTOP",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Mobile => "mobile",
            Device::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 已校验的分析请求
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// 原样保留的目标URL
    pub url: String,
    /// 设备类型
    pub device: Device,
}

impl AnalysisRequest {
    /// 创建分析请求
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL，必须是带主机名的 http/https 绝对地址
    /// * `device` - 设备类型
    ///
    /// # 返回值
    ///
    /// * `Ok(AnalysisRequest)` - 校验通过
    /// * `Err(AnalysisError::InvalidInput)` - URL格式错误
    pub fn new(url: impl Into<String>, device: Device) -> Result<Self, AnalysisError> {
        let url = url.into();
        if parse_absolute_url(&url).is_none() {
            return Err(AnalysisError::InvalidInput("Invalid URL format".to_string()));
        }
        Ok(Self { url, device })
    }

    pub fn parsed_url(&self) -> Option<Url> {
        parse_absolute_url(&self.url)
    }
}
