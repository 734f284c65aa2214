// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 配置设置测试模块
//!
//! 测试不依赖配置文件的默认加载

use speedanalyzer::config::settings::Settings;

#[test]
fn test_settings_load_without_config_files() {
    // 没有 config/ 目录时全部使用默认值
    let settings = Settings::new().unwrap();

    assert!(!settings.pagespeed.api_base_url.is_empty());
    assert!(settings.pagespeed.timeout_seconds > 0);
    assert!(!settings.screenshot.fallback_services.is_empty());
}
