// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// PageSpeed 领域模块
///
/// 定义外部分析API的抽象接口，具体实现位于基础设施层
pub mod api;
