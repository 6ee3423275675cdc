//! curator-core
//!
//! Multi-host asset lifecycle engine for signage players that expose a JSON
//! asset API: fetch each host's catalog, classify assets against an end-date
//! cutoff, then list them, delete them, or report the whole catalog.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（asset, host, cutoff, outcome, errors）
//! - **ports**: 抽象化レイヤー（AssetApi, Clock, RateLimiter）
//! - **app**: アプリケーションロジック（config, filter, deleter, report, orchestrator）
//! - **impls**: 実装（reqwest による HTTP 実装、開発用の in-memory 実装）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{CuratorConfig, Orchestrator};
pub use domain::{CuratorError, ErrorKind, RunSummary};
