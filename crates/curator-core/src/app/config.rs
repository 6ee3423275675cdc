//! CuratorConfig - run 全体の不変設定
//!
//! # Fail-fast 設計
//! - build() 時にすべてのアドレスとテンプレートを検証
//! - 1 件でも不正なら、どのホストにも接続する前に CuratorError を返す
//! - 構築後は不変（Orchestrator に渡すだけ）

use std::time::Duration;

use crate::domain::{Credentials, CuratorError, EndpointTemplate, HostAddress, Mode};
use crate::impls::HttpConnector;
use crate::ports::FixedDelay;

/// Immutable configuration for one run.
///
/// # 使用例
/// ```ignore
/// let config = CuratorConfig::builder()
///     .addresses("10.0.0.5,10.0.0.6")
///     .remove_days(Some(30))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct CuratorConfig {
    hosts: Vec<HostAddress>,
    template: EndpointTemplate,
    credentials: Option<Credentials>,
    mode: Mode,
    fetch_timeout: Duration,
    delete_interval: Duration,
}

impl CuratorConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn hosts(&self) -> &[HostAddress] {
        &self.hosts
    }

    pub fn template(&self) -> &EndpointTemplate {
        &self.template
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub fn delete_interval(&self) -> Duration {
        self.delete_interval
    }
}

/// Collects raw values from the configuration layer; `build` validates them.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    addresses: Option<String>,
    template: Option<String>,
    list_days: Option<u32>,
    remove_days: Option<u32>,
    user: Option<String>,
    password: Option<String>,
    fetch_timeout: Duration,
    delete_interval: Duration,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            addresses: None,
            template: None,
            list_days: None,
            remove_days: None,
            user: None,
            password: None,
            fetch_timeout: HttpConnector::DEFAULT_FETCH_TIMEOUT,
            delete_interval: FixedDelay::DEFAULT_INTERVAL,
        }
    }

    /// Comma-separated host list.
    pub fn addresses(mut self, addresses: impl Into<String>) -> Self {
        self.addresses = Some(addresses.into());
        self
    }

    /// Endpoint template override; `None` keeps the default.
    pub fn endpoint_template(mut self, template: Option<String>) -> Self {
        self.template = template;
        self
    }

    pub fn list_days(mut self, days: Option<u32>) -> Self {
        self.list_days = days;
        self
    }

    pub fn remove_days(mut self, days: Option<u32>) -> Self {
        self.remove_days = days;
        self
    }

    pub fn credentials(mut self, user: Option<String>, password: Option<String>) -> Self {
        self.user = user;
        self.password = password;
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn delete_interval(mut self, interval: Duration) -> Self {
        self.delete_interval = interval;
        self
    }

    /// # 検証
    /// - アドレスが無い / 空 → `NoAddress`
    /// - scheme 付きのアドレス → `SchemePrefix`
    /// - `{0}` を含まないテンプレート → `InvalidTemplate`
    pub fn build(self) -> Result<CuratorConfig, CuratorError> {
        let raw = self.addresses.ok_or(CuratorError::NoAddress)?;
        let hosts = HostAddress::parse_list(&raw)?;

        let template = match self.template.as_deref().map(str::trim) {
            Some(template) if !template.is_empty() => EndpointTemplate::parse(template)?,
            _ => EndpointTemplate::default(),
        };

        let credentials = Credentials::from_parts(self.user.as_deref(), self.password.as_deref());

        Ok(CuratorConfig {
            hosts,
            template,
            credentials,
            mode: Mode::resolve(self.list_days, self.remove_days),
            fetch_timeout: self.fetch_timeout,
            delete_interval: self.delete_interval,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
