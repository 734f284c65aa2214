// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含请求DTO和分析用例
pub mod application;

/// 客户端模块
///
/// 报告渲染、HAR导出、分享和本地持久化
pub mod client;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含报告模型和归一化服务
pub mod domain;

/// 引擎模块
///
/// 备用截图服务及其顺序调度
pub mod engines;

/// 基础设施模块
///
/// PageSpeed Insights 客户端和指标导出
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
