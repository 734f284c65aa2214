// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心数据结构，包括：
/// - 分析请求（analysis_request）：已校验的URL和设备类型
/// - 原始报告（raw_report）：PageSpeed Insights 返回的嵌套报告
/// - 归一化报告（report）：面向界面的扁平结构
pub mod analysis_request;
pub mod raw_report;
pub mod report;
