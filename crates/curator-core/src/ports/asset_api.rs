//! AssetApi port - デバイスのアセット API
//!
//! 1 ホスト 1 サイクル分の接続を表します。
//! AssetApiConnector が HostTarget から接続を作り、サイクル終了時に drop されます。

use async_trait::async_trait;

use crate::domain::{Asset, AssetId, CuratorError, HostTarget};

/// Read and delete operations against one host's asset endpoint.
#[async_trait]
pub trait AssetApi: Send + Sync {
    /// `GET <endpoint>`; assets in server order.
    ///
    /// Errors: `Transport` (unreachable, timeout), `Api` (non-2xx),
    /// `MalformedData` (2xx with a body that is not an asset list).
    async fn fetch_assets(&self) -> Result<Vec<Asset>, CuratorError>;

    /// `DELETE <endpoint>/<asset_id>`; any 2xx is success.
    async fn delete_asset(&self, asset_id: &AssetId) -> Result<(), CuratorError>;
}

/// Opens a scoped `AssetApi` for one host.
pub trait AssetApiConnector: Send + Sync {
    fn connect(&self, target: &HostTarget) -> Result<Box<dyn AssetApi>, CuratorError>;
}
