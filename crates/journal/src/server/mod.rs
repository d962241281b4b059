pub mod error;
pub mod grid;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use interface::{FixedCostRecord, TradeRecord};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{LedgerConfig, TableLayout};
use crate::record::{CsvRecordRepository, RecordError, RecordRepository};

pub use error::AppError;

/// 핸들러 공용 상태
#[derive(Clone)]
pub struct AppState {
    pub trades: Arc<dyn RecordRepository<TradeRecord>>,
    pub costs: Arc<dyn RecordRepository<FixedCostRecord>>,
    pub layout: TableLayout,
    /// 로드 → 수정 → 저장 구간을 프로세스 안에서 직렬화
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        trades: Arc<dyn RecordRepository<TradeRecord>>,
        costs: Arc<dyn RecordRepository<FixedCostRecord>>,
        layout: TableLayout,
    ) -> Self {
        Self {
            trades,
            costs,
            layout,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// 설정된 경로의 CSV 저장소로 상태 구성
    pub fn from_config(config: &LedgerConfig) -> Result<Self, RecordError> {
        let trades = CsvRecordRepository::<TradeRecord>::from_config(&config.store)?;
        let costs = CsvRecordRepository::<FixedCostRecord>::from_config(&config.store)?;

        Ok(Self::new(
            Arc::new(trades),
            Arc::new(costs),
            config.table_layout,
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/trades", post(handlers::add_trade))
        .route("/trades/edit", post(handlers::save_trade_grid))
        .route("/costs", post(handlers::add_cost))
        .route("/costs/edit", post(handlers::save_cost_grid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 웹 서버 시작 (종료될 때까지 대기)
pub async fn start_server(config: &LedgerConfig) -> eyre::Result<()> {
    let state = AppState::from_config(config)?;
    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Journal server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
