// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use speedanalyzer::application::use_cases::analyze_use_case::AnalyzeUseCase;
use speedanalyzer::config::settings::Settings;
use speedanalyzer::domain::services::normalizer::ResultNormalizer;
use speedanalyzer::engines::router::FallbackRouter;
use speedanalyzer::infrastructure::pagespeed::client::HttpPageSpeedClient;
use speedanalyzer::presentation::routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use speedanalyzer::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting speedanalyzer...");

    // 2. Load configuration
    let settings = Settings::new()?;
    settings.validate()?;
    info!("Configuration loaded");

    // Initialize Prometheus Metrics
    speedanalyzer::infrastructure::metrics::init_metrics(&settings.metrics);

    // 3. Initialize components
    let pagespeed = Arc::new(HttpPageSpeedClient::new(&settings.pagespeed)?);
    let fallback =
        FallbackRouter::from_settings(&settings.screenshot, &settings.pagespeed.user_agent);
    info!("{} fallback screenshot services configured", fallback.len());

    let use_case = Arc::new(AnalyzeUseCase::new(
        pagespeed,
        ResultNormalizer::new(fallback),
    ));

    let app = routes::app(use_case);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
