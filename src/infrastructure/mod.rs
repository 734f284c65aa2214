// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含与外部系统交互的技术实现：
/// - 指标（metrics）：Prometheus 指标导出
/// - PageSpeed（pagespeed）：PageSpeed Insights API 的 HTTP 客户端
pub mod metrics;
pub mod pagespeed;
