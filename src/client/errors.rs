// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 客户端错误
///
/// `Display` 文本就是错误面板上展示给用户的消息
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Please enter a valid URL")]
    EmptyUrl,

    #[error("Please enter a valid URL (including http:// or https://)")]
    InvalidUrl,

    /// 服务端返回的 `{"error": ...}` 消息
    #[error("{0}")]
    Server(String),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("Failed to analyze website. Please try again.")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to analyze website. Please try again.")]
    InvalidResponse(#[source] serde_json::Error),

    #[error("No analysis data available to download")]
    NothingToDownload,

    #[error("No analysis data available to share")]
    NothingToShare,

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
