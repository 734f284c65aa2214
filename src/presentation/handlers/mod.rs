// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 目前只有分析端点，负责把请求体交给分析用例并返回归一化报告
pub mod analyze_handler;
