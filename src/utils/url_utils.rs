// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

/// 解析绝对URL
///
/// 只接受带主机名的 http/https 地址，相对路径或其他协议返回 `None`
pub fn parse_absolute_url(input: &str) -> Option<Url> {
    let parsed = Url::parse(input).ok()?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return None;
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Some(parsed),
        _ => None,
    }
}

/// 去掉图片数据的 `data:image/...;base64,` 前缀
pub fn strip_data_uri_prefix(data: &str) -> &str {
    if let Some(rest) = data.strip_prefix("data:image/") {
        if let Some(idx) = rest.find(";base64,") {
            return &rest[idx + ";base64,".len()..];
        }
    }
    data
}
