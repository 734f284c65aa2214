// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

/// 初始化指标系统
///
/// 启用时在配置地址上暴露 Prometheus 抓取端点，并注册应用指标说明
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(
                "Invalid metrics address {}: {}. Metrics exporter not started.",
                settings.listen_addr, e
            );
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!("analysis_requests_total", "Total number of analysis requests");
    describe_counter!(
        "analysis_failures_total",
        "Total number of failed analysis requests, labelled by error kind"
    );
    describe_histogram!(
        "pagespeed_request_duration_seconds",
        "Duration of PageSpeed Insights API calls in seconds"
    );
    describe_counter!(
        "screenshot_fallback_attempts_total",
        "Total number of fallback screenshot service attempts"
    );
    describe_counter!(
        "screenshot_fallback_failures_total",
        "Total number of failed fallback screenshot service attempts"
    );

    info!("Metrics exporter listening on {}", addr);
}
