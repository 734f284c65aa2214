// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use speedanalyzer::utils::telemetry;

#[test]
fn test_telemetry_initialization() {
    // 重复初始化不会 panic
    telemetry::init_telemetry();
    telemetry::init_telemetry();

    tracing::debug!(url = "https://example.com", device = "mobile", "Submitting analysis");
    tracing::info!(performance = 73, opportunities = 3, "Analysis completed");
    tracing::warn!(kind = "upstream_error", "Analysis failed");
}
