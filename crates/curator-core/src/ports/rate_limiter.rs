//! RateLimiter port - 削除リクエスト間の待機
//!
//! デバイスは非力なので、削除は 1 件ずつ間隔を空けて送ります。
//! 待機そのものを trait にしておくと、テストでは実時間を使わずに
//! 「何回待ったか」だけを確認できます。

use std::time::Duration;

use async_trait::async_trait;

/// Paces consecutive requests to one host.
///
/// `wait` is awaited in-line by the caller; the next request is not issued
/// until it returns.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn wait(&self);
}

/// Sleeps a fixed interval on every call.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    interval: Duration,
}

impl FixedDelay {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn wait(&self) {
        tokio::time::sleep(self.interval).await;
    }
}
