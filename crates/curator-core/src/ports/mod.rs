//! Ports - 抽象化レイヤー
//!
//! 外部（デバイスの HTTP API、時計、待機）へのインターフェースを定義します。
//! 本番実装は impls、テスト用の実装は impls::memory にあります。

pub mod asset_api;
pub mod clock;
pub mod rate_limiter;

pub use self::asset_api::{AssetApi, AssetApiConnector};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::rate_limiter::{FixedDelay, RateLimiter};
