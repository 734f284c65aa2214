// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：请求、原始报告和归一化报告
/// - PageSpeed 接口（pagespeed）：外部分析API的抽象
/// - 服务（services）：报告归一化规则
pub mod models;
pub mod pagespeed;
pub mod services;
