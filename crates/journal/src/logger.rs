use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// 로그 초기화 (stdout + 일별 로그 파일)
/// 반환된 guard는 프로그램이 끝날 때까지 유지해야 버퍼가 비워진다
pub fn init_tracing(log_dir: &Path) -> Vec<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(log_dir, "journal.log");
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(stdout_writer))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    vec![file_guard, stdout_guard]
}
