//! App - アプリケーション層
//!
//! ports を組み合わせて 1 run 分のロジックを実装します。
//!
//! # 主要コンポーネント
//! - **CuratorConfig**: run 全体の不変設定（構築時に検証）
//! - **filter**: cutoff による分類
//! - **BatchDeleter**: 順次・間隔付きの一括削除
//! - **report**: 出力の整形
//! - **Orchestrator**: ホストごとの fetch → filter → act → report

pub mod config;
pub mod deleter;
pub mod filter;
pub mod orchestrator;
pub mod report;

pub use self::config::{ConfigBuilder, CuratorConfig};
pub use self::deleter::BatchDeleter;
pub use self::orchestrator::Orchestrator;
