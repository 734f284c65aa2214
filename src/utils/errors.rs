// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 分析流程错误类型
///
/// 覆盖从请求校验、上游调用到结果归一化的全部失败情形。
/// 对外只暴露一条可读的错误信息，不暴露结构化错误码。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// 请求参数无效（URL缺失或格式错误）
    #[error("{0}")]
    InvalidInput(String),

    /// 请求方法不被允许
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// 无法连接上游API（网络错误或超时）
    #[error("{0}")]
    UpstreamUnavailable(String),

    /// 上游API返回了显式错误或无法解析的响应
    #[error("{0}")]
    UpstreamError(String),

    /// 上游响应缺少必需的结构字段
    #[error("Malformed response from PageSpeed Insights API")]
    MalformedUpstreamData(String),
}

impl AnalysisError {
    /// 错误类别名称，用于日志和指标标签
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidInput(_) => "invalid_input",
            AnalysisError::MethodNotAllowed => "method_not_allowed",
            AnalysisError::UpstreamUnavailable(_) => "upstream_unavailable",
            AnalysisError::UpstreamError(_) => "upstream_error",
            AnalysisError::MalformedUpstreamData(_) => "malformed_upstream_data",
        }
    }

    /// 判断是否为调用方输入错误
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::InvalidInput(_) | AnalysisError::MethodNotAllowed
        )
    }
}
