//! Domain model (assets, hosts, cutoff, outcomes, errors).
//!
//! I/O を持たない純粋な型だけを置きます。
//! HTTP や時計は ports 経由で app 層から使います。

pub mod asset;
pub mod cutoff;
pub mod errors;
pub mod host;
pub mod outcome;

pub use asset::{Asset, AssetId, EndDate};
pub use cutoff::{Cutoff, Mode};
pub use errors::{CuratorError, ErrorKind};
pub use host::{Credentials, EndpointTemplate, HostAddress, HostTarget};
pub use outcome::{
    DeletionFailure, HostOutcome, HostReport, ListedAsset, RunSummary, SkippedHost,
};
