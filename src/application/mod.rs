// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含请求DTO和分析用例，负责把领域服务和基础设施编排成完整流程
pub mod dto;
pub mod use_cases;
