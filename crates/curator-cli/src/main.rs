use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use curator_core::Orchestrator;
use curator_core::impls::HttpConnector;
use curator_core::ports::{FixedDelay, SystemClock};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod settings;

use settings::Args;

const ADDRESS_PROMPT: &str = "Addresses of the players (comma separated)?";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let resolved = settings::resolve(&args, &|name| std::env::var(name).ok(), &mut prompt_address);
    for warning in &resolved.warnings {
        println!("{warning}");
    }

    // (A) 設定の検証：ここで失敗したらどのホストにも接続しない
    let config = match resolved.builder.build() {
        Ok(config) => config,
        Err(err) => {
            println!("{err}");
            return ExitCode::FAILURE;
        }
    };
    debug!(
        hosts = config.hosts().len(),
        mode = ?config.mode(),
        template = config.template().as_str(),
        "configuration resolved"
    );

    // (B) 実 adapter を組み立てる
    let connector = Arc::new(HttpConnector::new(config.fetch_timeout()));
    let limiter = Arc::new(FixedDelay::new(config.delete_interval()));
    let orchestrator = Orchestrator::new(config, connector, Arc::new(SystemClock), limiter);

    // (C) ホストごとに結果を stdout へ流す
    let result = {
        let mut out = io::stdout().lock();
        orchestrator.run(&mut out).await
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout は report 用なので、ログは stderr へ
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Interactive fallback when no address came from flags or the environment.
fn prompt_address() -> Option<String> {
    if !io::stdin().is_terminal() {
        return None;
    }
    dialoguer::Input::<String>::new()
        .with_prompt(ADDRESS_PROMPT)
        .allow_empty(true)
        .interact_text()
        .ok()
}
