//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **HttpConnector / HttpAssetApi**: reqwest による本番用の実装
//! - **InMemoryConnector / InMemoryDevice / CountingLimiter**: 開発・テスト用

pub mod http;
pub mod memory;

pub use self::http::{HttpAssetApi, HttpConnector};
pub use self::memory::{CountingLimiter, FetchFailure, InMemoryConnector, InMemoryDevice};
