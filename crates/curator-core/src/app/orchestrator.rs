//! Orchestrator - ホストを 1 台ずつ処理する
//!
//! # 状態遷移（1 run）
//! - NextHost: 次のホストを取る。無ければ Done
//! - Validating: CuratorConfig の構築時に全ホスト分を済ませている（I/O より前）
//! - Fetching: AssetApi::fetch_assets
//!   - Transport / MalformedData → そのホストをスキップして NextHost
//!   - Api（non-2xx）→ Fatal（残りのホストは処理しない）
//! - Filtering → Acting（Remove かつ worklist が空でなければ BatchDeleter）→ Reporting → NextHost
//!
//! ホストの接続（AssetApi）は run_host の中で作られ、どの経路でも抜けるときに drop されます。

use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use super::config::CuratorConfig;
use super::deleter::BatchDeleter;
use super::{filter, report};
use crate::domain::{
    CuratorError, Cutoff, HostOutcome, HostReport, HostTarget, Mode, RunSummary, SkippedHost,
};
use crate::ports::{AssetApiConnector, Clock, RateLimiter};

pub struct Orchestrator {
    config: CuratorConfig,
    connector: Arc<dyn AssetApiConnector>,
    clock: Arc<dyn Clock>,
    limiter: Arc<dyn RateLimiter>,
}

impl Orchestrator {
    pub fn new(
        config: CuratorConfig,
        connector: Arc<dyn AssetApiConnector>,
        clock: Arc<dyn Clock>,
        limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            config,
            connector,
            clock,
            limiter,
        }
    }

    pub fn config(&self) -> &CuratorConfig {
        &self.config
    }

    /// Process every configured host in order, writing each host's report to
    /// `out` as soon as its cycle completes.
    ///
    /// `Err` means the run stopped early (fatal error); hosts after the
    /// failing one were not contacted.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunSummary, CuratorError> {
        // cutoff は run 開始時に 1 回だけ決める
        let now = self.clock.now();
        let mut summary = RunSummary::default();

        for host in self.config.hosts() {
            let target = HostTarget::new(
                host.clone(),
                self.config.template(),
                self.config.credentials().cloned(),
            );

            match self.run_host(&target, now).await {
                Ok(outcome) => {
                    let host_report = HostReport {
                        host: host.clone(),
                        outcome,
                    };
                    out.write_all(report::render(&host_report).as_bytes())?;
                    summary.reports.push(host_report);
                }
                Err(err) if !err.is_fatal() => {
                    warn!(host = %host, error = %err, "skipping host");
                    let skipped = SkippedHost {
                        host: host.clone(),
                        reason: err.to_string(),
                    };
                    out.write_all(report::render_skipped(&skipped).as_bytes())?;
                    summary.skipped.push(skipped);
                }
                Err(err) => {
                    error!(host = %host, error = %err, "stopping run");
                    return Err(err);
                }
            }
        }

        out.flush()?;
        info!(
            hosts = summary.hosts_processed(),
            skipped = summary.skipped.len(),
            "run finished"
        );
        Ok(summary)
    }

    async fn run_host(
        &self,
        target: &HostTarget,
        now: DateTime<Utc>,
    ) -> Result<HostOutcome, CuratorError> {
        let mode = self.config.mode();
        info!(host = %target.address, endpoint = %target.endpoint, mode = ?mode, "host cycle started");

        let api = self.connector.connect(target)?;
        let assets = api.fetch_assets().await?;

        let outcome = match mode {
            Mode::List { days } => {
                let cutoff = Cutoff::days_before(now, days);
                HostOutcome::Listed {
                    cutoff,
                    matches: filter::listing(&assets, &cutoff),
                }
            }
            Mode::Remove { days } => {
                let cutoff = Cutoff::days_before(now, days);
                let worklist = filter::worklist(&assets, &cutoff);
                if worklist.is_empty() {
                    HostOutcome::Deleted {
                        processed: 0,
                        failures: Vec::new(),
                    }
                } else {
                    BatchDeleter::new(api.as_ref(), self.limiter.as_ref())
                        .run(&target.address, &worklist)
                        .await
                }
            }
            Mode::Report => HostOutcome::Reported { assets },
        };

        info!(host = %target.address, count = outcome.count(), "host cycle finished");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Asset, AssetId, EndDate, ErrorKind};
    use crate::impls::{CountingLimiter, FetchFailure, InMemoryConnector, InMemoryDevice};
    use crate::ports::FixedClock;
    use chrono::TimeZone;
    use reqwest::StatusCode;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn asset(id: &str, name: &str, end: &str) -> Asset {
        Asset::new(id, name, EndDate::parse(end).unwrap())
    }

    struct Harness {
        connector: Arc<InMemoryConnector>,
        limiter: Arc<CountingLimiter>,
        orchestrator: Orchestrator,
    }

    fn harness(config: CuratorConfig, connector: InMemoryConnector) -> Harness {
        let connector = Arc::new(connector);
        let limiter = Arc::new(CountingLimiter::new());
        let orchestrator = Orchestrator::new(
            config,
            connector.clone(),
            Arc::new(FixedClock::new(now())),
            limiter.clone(),
        );
        Harness {
            connector,
            limiter,
            orchestrator,
        }
    }

    async fn run(h: &Harness) -> (Result<RunSummary, CuratorError>, String) {
        let mut out = Vec::new();
        let result = h.orchestrator.run(&mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn list_mode_reports_expired_assets() {
        let config = CuratorConfig::builder()
            .addresses("10.0.0.1")
            .list_days(Some(30))
            .build()
            .unwrap();
        let device = InMemoryDevice::with_assets(vec![asset("1", "Ad", "2020-01-01")]);
        let h = harness(config, InMemoryConnector::new().with_device("10.0.0.1", device));

        let (result, out) = run(&h).await;

        assert!(result.is_ok());
        assert!(out.contains("1 matching assets."));
        assert!(out.contains("2020-01-01\tAd\n"));
    }

    #[tokio::test]
    async fn report_mode_lists_whole_catalog_in_fetch_order() {
        let config = CuratorConfig::builder()
            .addresses("10.0.0.1")
            .build()
            .unwrap();
        let assets = vec![
            asset("3", "Gamma", "2030-01-01"),
            asset("1", "Alpha", "2001-01-01"),
            asset("2", "Beta", "2026-10-19T12:00:00"),
        ];
        let device = InMemoryDevice::with_assets(assets.clone());
        let h = harness(config, InMemoryConnector::new().with_device("10.0.0.1", device));

        let (result, out) = run(&h).await;
        let summary = result.unwrap();

        assert_eq!(
            summary.reports[0].outcome,
            HostOutcome::Reported { assets }
        );
        assert!(out.starts_with("3 assets found on 10.0.0.1:\n"));
        let gamma = out.find("Gamma").unwrap();
        let alpha = out.find("Alpha").unwrap();
        let beta = out.find("Beta").unwrap();
        assert!(gamma < alpha && alpha < beta);
    }

    #[tokio::test]
    async fn remove_mode_deletes_only_expired_assets() {
        let config = CuratorConfig::builder()
            .addresses("10.0.0.1")
            .remove_days(Some(7))
            .build()
            .unwrap();
        let device = InMemoryDevice::with_assets(vec![
            asset("old-1", "Old", "2026-01-01"),
            asset("fresh", "Fresh", "2026-10-18"),
            asset("edge", "Edge", "2026-10-12T12:00:00Z"),
            asset("old-2", "Older", "2025-01-01"),
        ])
        .reject_delete("old-2", StatusCode::FORBIDDEN);
        let h = harness(config, InMemoryConnector::new().with_device("10.0.0.1", device));

        let (result, out) = run(&h).await;

        assert!(result.is_ok());
        let device = h.connector.device("10.0.0.1").unwrap();
        assert_eq!(
            device.delete_requests(),
            vec![AssetId::new("old-1"), AssetId::new("old-2")]
        );
        assert_eq!(h.limiter.waits(), 1);
        assert_eq!(
            out,
            "Error deleting asset old-2: 403 Forbidden\nDeleted 2 assets from 10.0.0.1.\n"
        );
    }

    #[tokio::test]
    async fn remove_mode_with_nothing_expired_reports_zero() {
        let config = CuratorConfig::builder()
            .addresses("10.0.0.1")
            .remove_days(Some(7))
            .build()
            .unwrap();
        let device = InMemoryDevice::with_assets(vec![asset("fresh", "Fresh", "2027-01-01")]);
        let h = harness(config, InMemoryConnector::new().with_device("10.0.0.1", device));

        let (_, out) = run(&h).await;

        assert_eq!(out, "Deleted 0 assets from 10.0.0.1.\n");
        assert!(h.connector.device("10.0.0.1").unwrap().delete_requests().is_empty());
        assert_eq!(h.limiter.waits(), 0);
    }

    #[tokio::test]
    async fn http_status_error_stops_the_run() {
        let config = CuratorConfig::builder()
            .addresses("10.0.0.1,10.0.0.2")
            .build()
            .unwrap();
        let connector = InMemoryConnector::new()
            .with_device(
                "10.0.0.1",
                InMemoryDevice::failing(FetchFailure::Status(StatusCode::INTERNAL_SERVER_ERROR)),
            )
            .with_device("10.0.0.2", InMemoryDevice::with_assets(Vec::new()));
        let h = harness(config, connector);

        let (result, out) = run(&h).await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert!(out.is_empty());
        assert_eq!(h.connector.connections(), vec!["10.0.0.1".to_string()]);
        assert_eq!(h.connector.device("10.0.0.2").unwrap().fetch_count(), 0);
    }

    #[tokio::test]
    async fn unreachable_host_is_skipped() {
        let config = CuratorConfig::builder()
            .addresses("10.0.0.1,10.0.0.2")
            .list_days(Some(30))
            .build()
            .unwrap();
        let connector = InMemoryConnector::new()
            .with_device(
                "10.0.0.1",
                InMemoryDevice::failing(FetchFailure::Unreachable("operation timed out".into())),
            )
            .with_device(
                "10.0.0.2",
                InMemoryDevice::with_assets(vec![asset("1", "Ad", "2020-01-01")]),
            );
        let h = harness(config, connector);

        let (result, out) = run(&h).await;

        let summary = result.unwrap();
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].host.as_str(), "10.0.0.1");
        assert_eq!(summary.hosts_processed(), 1);
        assert!(out.starts_with(
            "10.0.0.1: A problem happened querying the API: operation timed out\n"
        ));
        assert!(out.contains("1 matching assets."));
    }

    #[tokio::test]
    async fn malformed_catalog_skips_only_that_host() {
        let config = CuratorConfig::builder()
            .addresses("10.0.0.1,10.0.0.2")
            .build()
            .unwrap();
        let connector = InMemoryConnector::new()
            .with_device(
                "10.0.0.1",
                InMemoryDevice::failing(FetchFailure::Malformed("missing field `end_date`".into())),
            )
            .with_device("10.0.0.2", InMemoryDevice::with_assets(Vec::new()));
        let h = harness(config, connector);

        let (result, out) = run(&h).await;

        let summary = result.unwrap();
        assert_eq!(summary.skipped.len(), 1);
        assert!(out.contains("0 assets found on 10.0.0.2:"));
    }

    #[tokio::test]
    async fn hosts_are_processed_in_configured_order() {
        let config = CuratorConfig::builder()
            .addresses("10.0.0.3,10.0.0.1,10.0.0.2")
            .build()
            .unwrap();
        let connector = InMemoryConnector::new()
            .with_device("10.0.0.1", InMemoryDevice::with_assets(Vec::new()))
            .with_device("10.0.0.2", InMemoryDevice::with_assets(Vec::new()))
            .with_device("10.0.0.3", InMemoryDevice::with_assets(Vec::new()));
        let h = harness(config, connector);

        let (result, _) = run(&h).await;

        assert_eq!(result.unwrap().hosts_processed(), 3);
        assert_eq!(
            h.connector.connections(),
            vec!["10.0.0.3", "10.0.0.1", "10.0.0.2"]
        );
    }

    #[tokio::test]
    async fn huge_day_count_lists_nothing_and_finishes() {
        let config = CuratorConfig::builder()
            .addresses("10.0.0.1")
            .list_days(Some(u32::MAX))
            .build()
            .unwrap();
        let device = InMemoryDevice::with_assets(vec![asset("1", "Ad", "1999-01-01")]);
        let h = harness(config, InMemoryConnector::new().with_device("10.0.0.1", device));

        let (result, out) = run(&h).await;

        assert_eq!(result.unwrap().hosts_processed(), 1);
        assert_eq!(out, "0 matching assets.\n");
    }

    #[tokio::test]
    async fn huge_day_count_removes_nothing() {
        let config = CuratorConfig::builder()
            .addresses("10.0.0.1")
            .remove_days(Some(100_000_000))
            .build()
            .unwrap();
        let device = InMemoryDevice::with_assets(vec![asset("1", "Ad", "1999-01-01")]);
        let h = harness(config, InMemoryConnector::new().with_device("10.0.0.1", device));

        let (result, out) = run(&h).await;

        assert!(result.is_ok());
        assert_eq!(out, "Deleted 0 assets from 10.0.0.1.\n");
        assert!(h.connector.device("10.0.0.1").unwrap().delete_requests().is_empty());
    }

    #[test]
    fn scheme_prefixed_host_never_reaches_a_connection() {
        let connector = InMemoryConnector::new()
            .with_device("10.0.0.1", InMemoryDevice::with_assets(Vec::new()))
            .with_device("10.0.0.2", InMemoryDevice::with_assets(Vec::new()));

        let err = CuratorConfig::builder()
            .addresses("10.0.0.1,https://10.0.0.2")
            .build()
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(connector.connections().is_empty());
        assert_eq!(connector.device("10.0.0.1").unwrap().fetch_count(), 0);
    }

    mod over_http {
        use super::*;
        use crate::impls::HttpConnector;
        use std::time::Duration;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        fn http_orchestrator(addresses: &str, list_days: Option<u32>) -> Orchestrator {
            let config = CuratorConfig::builder()
                .addresses(addresses)
                .list_days(list_days)
                .build()
                .unwrap();
            Orchestrator::new(
                config,
                Arc::new(HttpConnector::new(Duration::from_secs(2))),
                Arc::new(FixedClock::new(now())),
                Arc::new(CountingLimiter::new()),
            )
        }

        #[tokio::test]
        async fn unreachable_first_host_then_healthy_second() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/v1/assets"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                    {"asset_id": "1", "name": "Ad", "end_date": "2020-01-01"}
                ])))
                .expect(1)
                .mount(&server)
                .await;

            let addresses = format!("127.0.0.1:1,{}", server.address());
            let orchestrator = http_orchestrator(&addresses, Some(30));
            let mut out = Vec::new();

            let summary = orchestrator.run(&mut out).await.unwrap();
            let out = String::from_utf8(out).unwrap();

            assert_eq!(summary.skipped.len(), 1);
            assert_eq!(summary.hosts_processed(), 1);
            assert!(out.contains("1 matching assets."));
            assert!(out.contains("2020-01-01\tAd"));
        }

        #[tokio::test]
        async fn server_error_on_first_host_never_contacts_second() {
            let failing = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(500))
                .expect(1)
                .mount(&failing)
                .await;
            let untouched = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
                .expect(0)
                .mount(&untouched)
                .await;

            let addresses = format!("{},{}", failing.address(), untouched.address());
            let orchestrator = http_orchestrator(&addresses, None);
            let mut out = Vec::new();

            let err = orchestrator.run(&mut out).await.unwrap_err();

            assert!(matches!(
                err,
                CuratorError::Api { status } if status == StatusCode::INTERNAL_SERVER_ERROR
            ));
        }
    }
}
