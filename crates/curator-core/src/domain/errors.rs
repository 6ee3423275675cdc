//! Errors - エラー型と分類
//!
//! CuratorError の kind でオーケストレーターの扱いが決まります:
//! - Configuration / Api / Output: run 全体を止める（fatal）
//! - Transport / MalformedData: そのホストだけスキップ

use reqwest::StatusCode;
use thiserror::Error;

/// Operational classification of a `CuratorError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input supplied before any I/O (no address, scheme prefix, template).
    Configuration,
    /// DNS, connect, timeout.
    Transport,
    /// The device answered with a non-2xx status.
    Api,
    /// The device answered 2xx with a body that is not a valid asset list.
    MalformedData,
    /// The report could not be written.
    Output,
}

#[derive(Debug, Error)]
pub enum CuratorError {
    #[error("No addresses specified.")]
    NoAddress,

    #[error(
        "Do not include 'http://' or 'https://' in the remote address; just the IP address or hostname (got '{address}')"
    )]
    SchemePrefix { address: String },

    #[error("Invalid endpoint template '{0}': it must contain the host slot {{0}}")]
    InvalidTemplate(String),

    #[error("A problem happened querying the API: {0}")]
    Transport(String),

    #[error("Unable to fetch assets, error: {status}")]
    Api { status: StatusCode },

    #[error("Unable to read assets: {0}")]
    MalformedData(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl CuratorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CuratorError::NoAddress
            | CuratorError::SchemePrefix { .. }
            | CuratorError::InvalidTemplate(_)
            | CuratorError::Client(_) => ErrorKind::Configuration,
            CuratorError::Transport(_) => ErrorKind::Transport,
            CuratorError::Api { .. } => ErrorKind::Api,
            CuratorError::MalformedData(_) => ErrorKind::MalformedData,
            CuratorError::Output(_) => ErrorKind::Output,
        }
    }

    /// Whether this error ends the whole run rather than one host's cycle.
    ///
    /// "Host unreachable" skips the host; "host rejected the request" stops
    /// every remaining host.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::Transport | ErrorKind::MalformedData
        )
    }
}
