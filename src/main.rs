mod config;
mod fetch;
mod logging;
mod models;
mod quiz;
mod runtime;
mod storage;
mod ui;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, Overrides};
use crate::fetch::TriviaClient;
use crate::runtime::Runtime;
use crate::storage::LedgerStore;
use crate::ui::App;

/// 终端答题
#[derive(Parser, Debug)]
#[command(name = "trivia")]
#[command(about = "Multiple-choice trivia quiz in the terminal")]
#[command(version)]
struct Args {
    /// 配置文件路径（默认 ~/.config/trivia/config.toml）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 题目数量 (1-50)
    #[arg(short, long)]
    amount: Option<u8>,

    /// 题库 API 地址
    #[arg(long)]
    endpoint: Option<String>,

    /// 恢复上次未完成的答题
    #[arg(long)]
    resume: bool,

    /// 日志级别 (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match args.config.or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    config.apply(Overrides {
        amount: args.amount,
        endpoint: args.endpoint,
        resume: args.resume,
        log_level: args.log_level,
    });
    config.validate()?;

    // 数据目录 (~/.local/share/trivia/)
    let data_dir = config.data_dir()?;
    logging::init_logging(&config.logging.level, &config.log_file(&data_dir))?;
    tracing::info!(data_dir = %data_dir.display(), "trivia starting");

    let store = LedgerStore::new(&data_dir);
    let mut app = App::new(config.api.amount, Some(store));
    if config.storage.resume && !app.restore() {
        tracing::warn!("resume requested but no usable saved session");
    }

    let client = TriviaClient::new(config.endpoint()?, config.api.amount, config.timeout())?;
    Runtime::new(app, client)?.run().await?;
    Ok(())
}
