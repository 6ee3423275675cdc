//! Settings - フラグ・環境変数・プロンプトから設定値を集める
//!
//! # 優先順位
//! - address: flag > SCREENLY_ADDRESS > 対話プロンプト（空の flag はそのままプロンプトへ）
//! - list / remove: flag > 環境変数（プロンプトなし）
//!   - どちらの flag も無いときだけ SCREENLY_LIST を読む
//!   - それでも list が無いときだけ SCREENLY_REMOVE を読む
//! - user / password / api: flag > 環境変数
//!
//! 検証はここではしません（CuratorConfig::builder().build() が担当）。

use clap::Parser;
use curator_core::app::ConfigBuilder;

pub const ENV_ADDRESS: &str = "SCREENLY_ADDRESS";
pub const ENV_API: &str = "SCREENLY_API";
pub const ENV_USER: &str = "SCREENLY_USER";
pub const ENV_PASSWORD: &str = "SCREENLY_PASSWORD";
pub const ENV_LIST: &str = "SCREENLY_LIST";
pub const ENV_REMOVE: &str = "SCREENLY_REMOVE";

/// List or remove expired assets on signage players.
#[derive(Parser, Debug, Default)]
#[command(name = "curator", version, about, long_about = None)]
pub struct Args {
    /// Comma separated addresses of the players, or use environment variable SCREENLY_ADDRESS
    #[arg(short, long)]
    pub address: Option<String>,

    /// User name to log in (if configured), or use environment variable SCREENLY_USER
    #[arg(short, long)]
    pub user: Option<String>,

    /// Password to log in (if configured), or use environment variable SCREENLY_PASSWORD
    #[arg(short, long)]
    pub password: Option<String>,

    /// List items older than <DAYS>, or use environment variable SCREENLY_LIST
    #[arg(short, long, value_name = "DAYS")]
    pub list: Option<u32>,

    /// Remove items older than <DAYS>, or use environment variable SCREENLY_REMOVE
    #[arg(short, long, value_name = "DAYS")]
    pub remove: Option<u32>,

    /// Asset endpoint template with a {0} host slot, or use environment variable SCREENLY_API
    #[arg(long, value_name = "TEMPLATE")]
    pub api: Option<String>,
}

/// Raw values ready for validation, plus messages for the user.
#[derive(Debug)]
pub struct Resolved {
    pub builder: ConfigBuilder,
    pub warnings: Vec<String>,
}

pub fn resolve(
    args: &Args,
    env: &dyn Fn(&str) -> Option<String>,
    prompt: &mut dyn FnMut() -> Option<String>,
) -> Resolved {
    let env = |name: &str| env(name).filter(|value| !value.trim().is_empty());
    let mut warnings = Vec::new();

    // -a が明示されていれば空でも環境変数は見ない
    let address = match &args.address {
        Some(value) => Some(value.clone()),
        None => env(ENV_ADDRESS),
    }
    .filter(|value| !value.trim().is_empty())
    .or_else(|| prompt().filter(|value| !value.trim().is_empty()));

    let (mut list, mut remove) = (args.list, args.remove);
    if list.is_none() && remove.is_none() {
        list = parse_days(ENV_LIST, env(ENV_LIST), &mut warnings);
        if list.is_none() {
            remove = parse_days(ENV_REMOVE, env(ENV_REMOVE), &mut warnings);
        }
    }

    let user = args.user.clone().or_else(|| env(ENV_USER));
    let password = args.password.clone().or_else(|| env(ENV_PASSWORD));
    let api = args.api.clone().or_else(|| env(ENV_API));

    let mut builder = ConfigBuilder::new()
        .endpoint_template(api)
        .list_days(list)
        .remove_days(remove)
        .credentials(user, password);
    if let Some(address) = address {
        builder = builder.addresses(address);
    }

    Resolved { builder, warnings }
}

fn parse_days(name: &str, value: Option<String>, warnings: &mut Vec<String>) -> Option<u32> {
    let value = value?;
    match value.trim().parse::<u32>() {
        Ok(days) => Some(days),
        Err(_) => {
            warnings.push(format!("Invalid {name} environment variable: {value}"));
            None
        }
    }
}
