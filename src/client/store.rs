// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use super::errors::ClientError;
use crate::domain::models::report::NormalizedReport;

/// 上一次成功分析的存储键
pub const PREVIOUS_ANALYSIS_KEY: &str = "previousAnalysis";

/// 报告存储特质
///
/// 以JSON文本保存最近一次成功的报告
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn save(&self, report: &NormalizedReport) -> Result<(), ClientError>;

    async fn load(&self) -> Result<Option<NormalizedReport>, ClientError>;

    async fn clear(&self) -> Result<(), ClientError>;
}

/// 本地文件系统存储实现
pub struct FileReportStore {
    base_path: PathBuf,
}

impl FileReportStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn full_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", PREVIOUS_ANALYSIS_KEY))
    }
}

#[async_trait]
impl ReportStore for FileReportStore {
    async fn save(&self, report: &NormalizedReport) -> Result<(), ClientError> {
        let full_path = self.full_path();
        let data = serde_json::to_vec(report)?;

        if let Some(parent) = Path::new(&full_path).parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&full_path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        Ok(())
    }

    async fn load(&self) -> Result<Option<NormalizedReport>, ClientError> {
        match fs::read(self.full_path()).await {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Storage(e)),
        }
    }

    async fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(self.full_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(e)),
        }
    }
}

/// 内存存储实现
#[derive(Default, Clone)]
pub struct InMemoryReportStore {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save(&self, report: &NormalizedReport) -> Result<(), ClientError> {
        let json = serde_json::to_string(report)?;
        let mut map = self.data.write().await;
        map.insert(PREVIOUS_ANALYSIS_KEY.to_string(), json);
        Ok(())
    }

    async fn load(&self) -> Result<Option<NormalizedReport>, ClientError> {
        let map = self.data.read().await;
        match map.get(PREVIOUS_ANALYSIS_KEY) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    async fn clear(&self) -> Result<(), ClientError> {
        let mut map = self.data.write().await;
        map.remove(PREVIOUS_ANALYSIS_KEY);
        Ok(())
    }
}
