// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// PageSpeed Insights API 客户端实现
pub mod client;
