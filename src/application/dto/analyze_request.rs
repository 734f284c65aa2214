// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::models::analysis_request::{AnalysisRequest, Device};
use crate::utils::errors::AnalysisError;

/// 分析请求数据传输对象
///
/// 对应 `POST /analyze` 的请求体 `{url, device?}`
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct AnalyzeRequestDto {
    /// 要分析的网页URL
    #[validate(url)]
    pub url: Option<String>,
    /// 设备类型，非 mobile/desktop 的值按 mobile 处理
    #[serde(default)]
    pub device: Option<Value>,
}

impl AnalyzeRequestDto {
    /// 从原始请求体解析
    ///
    /// 请求体不是JSON对象或缺少 `url` 时返回 "URL is required"，
    /// `url` 不是字符串时返回 "Invalid URL format"
    pub fn from_body(body: &[u8]) -> Result<Self, AnalysisError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| url_required())?;
        let object = value.as_object().ok_or_else(url_required)?;

        match object.get("url") {
            None | Some(Value::Null) => return Err(url_required()),
            Some(Value::String(_)) => {}
            Some(_) => return Err(invalid_url()),
        }

        serde_json::from_value(value).map_err(|_| invalid_url())
    }

    /// 转换为已校验的领域请求
    pub fn into_request(self) -> Result<AnalysisRequest, AnalysisError> {
        if self.validate().is_err() {
            return Err(invalid_url());
        }
        let device = Device::coerce(self.device.as_ref());
        let url = self.url.ok_or_else(url_required)?;
        AnalysisRequest::new(url, device)
    }
}

fn url_required() -> AnalysisError {
    AnalysisError::InvalidInput("URL is required".to_string())
}

fn invalid_url() -> AnalysisError {
    AnalysisError::InvalidInput("Invalid URL format".to_string())
}
