//! Host - 操作対象のデバイス
//!
//! アドレス・エンドポイント・認証情報をまとめて HostTarget を作ります。
//! HostTarget は 1 ホストのサイクル開始時に作られ、終了時に捨てられます。

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::errors::CuratorError;

const SCHEME_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Device address as configured (IP or hostname, optionally with a port).
///
/// A scheme prefix is rejected: the endpoint template supplies the scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostAddress(String);

impl HostAddress {
    pub fn parse(raw: &str) -> Result<Self, CuratorError> {
        let address = raw.trim();
        if SCHEME_PREFIXES
            .iter()
            .any(|prefix| address.to_ascii_lowercase().starts_with(prefix))
        {
            return Err(CuratorError::SchemePrefix {
                address: address.to_string(),
            });
        }
        Ok(Self(address.to_string()))
    }

    /// Split a comma-separated address list.
    ///
    /// Blank segments are dropped; an empty result is `NoAddress`. Every
    /// address is validated before anything is returned.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, CuratorError> {
        let hosts = raw
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(Self::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if hosts.is_empty() {
            return Err(CuratorError::NoAddress);
        }
        Ok(hosts)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URL pattern with a single `{0}` slot for the host address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplate(String);

impl EndpointTemplate {
    pub const SLOT: &'static str = "{0}";
    pub const DEFAULT: &'static str = "http://{0}/api/v1/assets";

    pub fn parse(raw: &str) -> Result<Self, CuratorError> {
        let template = raw.trim();
        if !template.contains(Self::SLOT) {
            return Err(CuratorError::InvalidTemplate(template.to_string()));
        }
        Ok(Self(template.trim_end_matches('/').to_string()))
    }

    pub fn resolve(&self, host: &HostAddress) -> String {
        self.0.replace(Self::SLOT, host.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EndpointTemplate {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

/// Basic-auth credential pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    /// Returns `None` unless both parts are non-empty.
    pub fn from_parts(user: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (user, password) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
                Some(Self {
                    user: user.to_string(),
                    password: password.to_string(),
                })
            }
            _ => None,
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// `Authorization` header value: `Basic base64(user:password)`.
    pub fn header_value(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.user, self.password));
        format!("Basic {token}")
    }
}

// password は出さない
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything needed to talk to one host for one cycle.
#[derive(Debug, Clone)]
pub struct HostTarget {
    pub address: HostAddress,
    pub endpoint: String,
    pub credentials: Option<Credentials>,
}

impl HostTarget {
    pub fn new(
        address: HostAddress,
        template: &EndpointTemplate,
        credentials: Option<Credentials>,
    ) -> Self {
        let endpoint = template.resolve(&address);
        Self {
            address,
            endpoint,
            credentials,
        }
    }

    pub fn asset_url(&self, asset_id: &str) -> String {
        format!("{}/{}", self.endpoint, asset_id)
    }
}
