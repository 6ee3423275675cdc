//! HttpAssetApi - reqwest によるデバイス API 実装
//!
//! ホストごとに reqwest::Client を 1 つ作り、サイクル終了時に drop します。
//! 認証ヘッダーは Client の default header として全リクエストに付きます。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use crate::domain::{Asset, AssetId, CuratorError, HostTarget};
use crate::ports::{AssetApi, AssetApiConnector};

/// Builds one `HttpAssetApi` per host cycle.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    fetch_timeout: Duration,
}

impl HttpConnector {
    pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(fetch_timeout: Duration) -> Self {
        Self { fetch_timeout }
    }
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FETCH_TIMEOUT)
    }
}

impl AssetApiConnector for HttpConnector {
    fn connect(&self, target: &HostTarget) -> Result<Box<dyn AssetApi>, CuratorError> {
        let mut headers = HeaderMap::new();
        if let Some(credentials) = &target.credentials {
            let mut value = HeaderValue::from_str(&credentials.header_value()).map_err(|error| {
                CuratorError::Client(format!("invalid authorization header: {error}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
            debug!(host = %target.address, user = credentials.user(), "using basic auth");
        }

        // no client-wide timeout: only the fetch is bounded
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|error| CuratorError::Client(error.to_string()))?;

        Ok(Box::new(HttpAssetApi {
            client,
            target: target.clone(),
            fetch_timeout: self.fetch_timeout,
        }))
    }
}

pub struct HttpAssetApi {
    client: reqwest::Client,
    target: HostTarget,
    fetch_timeout: Duration,
}

#[async_trait]
impl AssetApi for HttpAssetApi {
    async fn fetch_assets(&self) -> Result<Vec<Asset>, CuratorError> {
        debug!(url = %self.target.endpoint, "fetching assets");
        let response = self
            .client
            .get(&self.target.endpoint)
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|error| CuratorError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CuratorError::Api { status });
        }

        // body を文字列で受けてから decode する（decode 失敗を Transport と区別するため）
        let body = response
            .text()
            .await
            .map_err(|error| CuratorError::Transport(error.to_string()))?;

        serde_json::from_str::<Vec<Asset>>(&body)
            .map_err(|error| CuratorError::MalformedData(error.to_string()))
    }

    async fn delete_asset(&self, asset_id: &AssetId) -> Result<(), CuratorError> {
        let url = self.target.asset_url(asset_id.as_str());
        debug!(url = %url, "deleting asset");
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|error| CuratorError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CuratorError::Api { status });
        }
        Ok(())
    }
}
