// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, warn};
use url::Url;

use super::{
    errors::ClientError,
    har::{export_har, HarExport},
    relay::AnalysisRelay,
    share::{share_action, ShareAction},
    store::ReportStore,
    view::{render, ReportView, ScreenshotModal},
};
use crate::domain::models::{analysis_request::Device, report::NormalizedReport};

/// 页面当前显示的区域
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Results(Box<ReportView>),
    Error(String),
}

/// 客户端控制器
///
/// 持有当前报告和界面状态。提交需要 `&mut self`，同一控制器上不会有并发的分析
pub struct AnalysisController {
    relay: Arc<dyn AnalysisRelay>,
    store: Arc<dyn ReportStore>,
    device: Device,
    input: String,
    state: ViewState,
    current: Option<NormalizedReport>,
    modal: ScreenshotModal,
}

impl AnalysisController {
    /// 默认以桌面设备分析
    pub fn new(relay: Arc<dyn AnalysisRelay>, store: Arc<dyn ReportStore>) -> Self {
        Self {
            relay,
            store,
            device: Device::Desktop,
            input: String::new(),
            state: ViewState::Idle,
            current: None,
            modal: ScreenshotModal::default(),
        }
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn current_report(&self) -> Option<&NormalizedReport> {
        self.current.as_ref()
    }

    pub fn modal(&self) -> &ScreenshotModal {
        &self.modal
    }

    /// 提交分析
    ///
    /// 输入先在本地校验，失败时不会发出请求。任何失败都转为错误面板，不自动重试
    pub async fn submit(&mut self, input: &str) -> Result<(), ClientError> {
        let url = input.trim().to_string();
        self.input = url.clone();

        if let Err(e) = validate_input(&url) {
            self.state = ViewState::Error(e.to_string());
            return Err(e);
        }

        self.state = ViewState::Loading;

        match self.relay.analyze(&url, self.device).await {
            Ok(report) => {
                if let Err(e) = self.store.save(&report).await {
                    warn!(error = %e, "Failed to persist analysis");
                }
                self.state = ViewState::Results(Box::new(render(&report)));
                self.current = Some(report);
                Ok(())
            }
            Err(e) => {
                error!(error = ?e, url = %url, "Analysis error");
                self.state = ViewState::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// 关闭错误面板
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, ViewState::Error(_)) {
            self.state = ViewState::Idle;
        }
    }

    /// 清空输入和当前报告
    pub fn reset(&mut self) {
        self.input.clear();
        self.current = None;
        self.modal.close();
        self.state = ViewState::Idle;
    }

    pub fn download(&self, today: NaiveDate) -> Result<HarExport, ClientError> {
        let report = self.current.as_ref().ok_or(ClientError::NothingToDownload)?;
        export_har(report, today)
    }

    pub fn share(&self, page_url: &str, native_available: bool) -> Result<ShareAction, ClientError> {
        let report = self.current.as_ref().ok_or(ClientError::NothingToShare)?;
        Ok(share_action(report, page_url, native_available))
    }

    /// 打开截图弹窗，没有截图时不做任何事
    pub fn open_screenshot(&mut self) {
        if let Some(shot) = self.current.as_ref().and_then(|r| r.screenshot.as_ref()) {
            self.modal.open(&shot.data);
        }
    }

    pub fn close_screenshot(&mut self) {
        self.modal.close();
    }

    pub fn handle_key(&mut self, key: &str) {
        self.modal.handle_key(key);
    }

    /// 恢复上一次保存的报告
    pub async fn restore_previous(&mut self) -> Result<bool, ClientError> {
        match self.store.load().await? {
            Some(report) => {
                self.input = report.url.clone();
                self.state = ViewState::Results(Box::new(render(&report)));
                self.current = Some(report);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// 本地输入校验
pub fn validate_input(input: &str) -> Result<(), ClientError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClientError::EmptyUrl);
    }
    Url::parse(trimmed).map_err(|_| ClientError::InvalidUrl)?;
    Ok(())
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
