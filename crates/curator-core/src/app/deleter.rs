//! BatchDeleter - 期限切れアセットの一括削除
//!
//! # フロー
//! 1. worklist を先頭から 1 件ずつ DELETE（並行しない）
//! 2. リクエストの間に RateLimiter::wait()
//! 3. 失敗（non-2xx / transport）は記録して次へ進む
//!
//! ロールバックはしません。途中で失敗してもデバイス側は部分的に削除された状態になります。

use tracing::{info, warn};

use crate::domain::{AssetId, CuratorError, DeletionFailure, HostAddress, HostOutcome};
use crate::ports::{AssetApi, RateLimiter};

pub struct BatchDeleter<'a> {
    api: &'a dyn AssetApi,
    limiter: &'a dyn RateLimiter,
}

impl<'a> BatchDeleter<'a> {
    pub fn new(api: &'a dyn AssetApi, limiter: &'a dyn RateLimiter) -> Self {
        Self { api, limiter }
    }

    /// Delete every id in `worklist`.
    ///
    /// Returns `HostOutcome::Deleted` with `processed == worklist.len()`, no
    /// matter how many individual deletes failed.
    pub async fn run(&self, host: &HostAddress, worklist: &[AssetId]) -> HostOutcome {
        let mut failures = Vec::new();

        for (index, asset_id) in worklist.iter().enumerate() {
            if index > 0 {
                self.limiter.wait().await;
            }

            if let Err(error) = self.api.delete_asset(asset_id).await {
                let reason = failure_reason(&error);
                warn!(host = %host, asset_id = %asset_id, reason = %reason, "asset deletion failed");
                failures.push(DeletionFailure {
                    asset_id: asset_id.clone(),
                    reason,
                });
            }
        }

        info!(
            host = %host,
            processed = worklist.len(),
            failed = failures.len(),
            "deletion batch finished"
        );

        HostOutcome::Deleted {
            processed: worklist.len(),
            failures,
        }
    }
}

fn failure_reason(error: &CuratorError) -> String {
    match error {
        CuratorError::Api { status } => status.to_string(),
        CuratorError::Transport(message) => message.clone(),
        other => other.to_string(),
    }
}
