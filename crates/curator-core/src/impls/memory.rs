//! In-memory devices - 開発・テスト用の AssetApi 実装
//!
//! # 含まれる実装
//! - **InMemoryDevice**: 固定のアセット一覧を返し、削除を記録する
//! - **InMemoryConnector**: ホストアドレス → InMemoryDevice の対応表
//! - **CountingLimiter**: 待機せずに呼び出し回数だけ数える RateLimiter

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::{Asset, AssetId, CuratorError, HostTarget};
use crate::ports::{AssetApi, AssetApiConnector, RateLimiter};

/// How a device's fetch should fail.
#[derive(Debug, Clone)]
pub enum FetchFailure {
    Unreachable(String),
    Status(StatusCode),
    Malformed(String),
}

impl FetchFailure {
    fn to_error(&self) -> CuratorError {
        match self {
            FetchFailure::Unreachable(message) => CuratorError::Transport(message.clone()),
            FetchFailure::Status(status) => CuratorError::Api { status: *status },
            FetchFailure::Malformed(message) => CuratorError::MalformedData(message.clone()),
        }
    }
}

/// A device with a fixed catalog.
#[derive(Debug, Default)]
pub struct InMemoryDevice {
    assets: Vec<Asset>,
    fetch_failure: Option<FetchFailure>,
    rejected_deletes: HashMap<AssetId, StatusCode>,
    deleted: Mutex<Vec<AssetId>>,
    fetches: AtomicUsize,
}

impl InMemoryDevice {
    pub fn with_assets(assets: Vec<Asset>) -> Self {
        Self {
            assets,
            ..Self::default()
        }
    }

    pub fn failing(failure: FetchFailure) -> Self {
        Self {
            fetch_failure: Some(failure),
            ..Self::default()
        }
    }

    /// Deleting `asset_id` answers `status` instead of succeeding.
    pub fn reject_delete(mut self, asset_id: &str, status: StatusCode) -> Self {
        self.rejected_deletes.insert(AssetId::new(asset_id), status);
        self
    }

    /// Every delete request received, in order, including rejected ones.
    pub fn delete_requests(&self) -> Vec<AssetId> {
        self.deleted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetApi for Arc<InMemoryDevice> {
    async fn fetch_assets(&self) -> Result<Vec<Asset>, CuratorError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.fetch_failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(self.assets.clone()),
        }
    }

    async fn delete_asset(&self, asset_id: &AssetId) -> Result<(), CuratorError> {
        self.deleted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(asset_id.clone());
        match self.rejected_deletes.get(asset_id) {
            Some(status) => Err(CuratorError::Api { status: *status }),
            None => Ok(()),
        }
    }
}

/// Host address → device. Unknown hosts are unreachable.
#[derive(Debug, Default)]
pub struct InMemoryConnector {
    devices: HashMap<String, Arc<InMemoryDevice>>,
    connections: Mutex<Vec<String>>,
}

impl InMemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, address: &str, device: InMemoryDevice) -> Self {
        self.devices.insert(address.to_string(), Arc::new(device));
        self
    }

    pub fn device(&self, address: &str) -> Option<Arc<InMemoryDevice>> {
        self.devices.get(address).cloned()
    }

    /// Addresses connected to, in order.
    pub fn connections(&self) -> Vec<String> {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AssetApiConnector for InMemoryConnector {
    fn connect(&self, target: &HostTarget) -> Result<Box<dyn AssetApi>, CuratorError> {
        let address = target.address.as_str().to_string();
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(address.clone());

        let device = self.devices.get(&address).cloned().unwrap_or_else(|| {
            Arc::new(InMemoryDevice::failing(FetchFailure::Unreachable(format!(
                "no route to host {address}"
            ))))
        });
        Ok(Box::new(device))
    }
}

/// A `RateLimiter` that returns immediately and counts calls.
#[derive(Debug, Default)]
pub struct CountingLimiter {
    waits: AtomicUsize,
}

impl CountingLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits(&self) -> usize {
        self.waits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateLimiter for CountingLimiter {
    async fn wait(&self) {
        self.waits.fetch_add(1, Ordering::SeqCst);
    }
}
