use std::path::PathBuf;

use color_eyre::eyre;
use interface::{FixedCostRecord, TradeRecord};
use structopt::StructOpt;
use tracing::info;

use journal::config::LedgerConfig;
use journal::ledger::summarize;
use journal::record::{CsvRecordRepository, load_or_empty};
use journal::render::render_summary_text;

#[derive(Debug, StructOpt)]
#[structopt(name = "journal", about = "주식 매매 일지 대시보드")]
struct Opt {
    /// 데이터 파일 디렉토리 (JOURNAL_DATA_DIR보다 우선)
    #[structopt(long, parse(from_os_str))]
    data_dir: Option<PathBuf>,

    /// 서버 포트 (JOURNAL_PORT보다 우선)
    #[structopt(long)]
    port: Option<u16>,

    #[structopt(subcommand)]
    cmd: Option<Command>,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// 웹 대시보드 실행 (기본값)
    Serve,
    /// 총 정산을 콘솔에 출력
    Summary,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // init error reporting
    color_eyre::install()?;

    let opt = Opt::from_args();

    let mut config = LedgerConfig::from_env()?;
    if let Some(dir) = opt.data_dir {
        config.store.data_dir = dir;
    }
    if let Some(port) = opt.port {
        config.port = port;
    }

    // init logging
    let _guards = journal::logger::init_tracing(&config.log_dir);

    match opt.cmd.unwrap_or(Command::Serve) {
        Command::Serve => journal::server::start_server(&config).await,
        Command::Summary => print_summary(&config).await,
    }
}

/// 총 정산 출력
async fn print_summary(config: &LedgerConfig) -> eyre::Result<()> {
    info!("데이터 디렉토리: {}", config.store.data_dir.display());

    let trades_repo = CsvRecordRepository::<TradeRecord>::from_config(&config.store)?;
    let costs_repo = CsvRecordRepository::<FixedCostRecord>::from_config(&config.store)?;

    let (trades, trade_warning) = load_or_empty::<TradeRecord>(&trades_repo).await;
    let (costs, cost_warning) = load_or_empty::<FixedCostRecord>(&costs_repo).await;
    let warnings: Vec<_> = trade_warning.into_iter().chain(cost_warning).collect();

    let summary = summarize(&trades, &costs);
    print!(
        "{}",
        render_summary_text(&summary, trades.len(), costs.len(), &warnings)
    );

    Ok(())
}
