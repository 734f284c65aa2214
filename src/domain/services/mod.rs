// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 归一化服务（normalizer）：把 PageSpeed Insights 报告转换为
///   分数、核心网页指标、截图、优化建议和诊断组成的扁平报告
pub mod normalizer;
