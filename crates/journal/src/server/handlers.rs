use axum::extract::{Form, Query, State};
use axum::response::{Html, Redirect};
use chrono::{Local, NaiveDate};
use interface::{DatasetKind, FixedCostRecord, TradeLeg, TradeRecord};
use serde::Deserialize;
use tracing::info;

use crate::ledger::summarize;
use crate::record::{append_record, load_or_empty, replace_records};
use crate::render::{Notice, PageContext, render_page};

use super::AppState;
use super::error::AppError;
use super::grid::{apply_grid, parse_grid};

/// 메인 페이지 쿼리 (`?saved=trades` 등)
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub saved: Option<String>,
}

/// 새 매매 기록 입력 폼
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeForm {
    #[serde(default)]
    pub stock_name: String,
    pub buy_date: NaiveDate,
    pub buy_qty: u64,
    pub buy_price: u64,
    pub sell_date: NaiveDate,
    pub sell_qty: u64,
    pub sell_price: u64,
}

impl TradeForm {
    pub fn into_record(self) -> TradeRecord {
        TradeRecord::new(
            self.stock_name,
            TradeLeg {
                date: self.buy_date,
                quantity: self.buy_qty,
                price: self.buy_price,
            },
            TradeLeg {
                date: self.sell_date,
                quantity: self.sell_qty,
                price: self.sell_price,
            },
        )
    }
}

/// 고정비 입력 폼
#[derive(Debug, Deserialize)]
pub struct CostForm {
    pub date: NaiveDate,
    pub amount: i64,
    #[serde(default)]
    pub label: String,
}

fn saved_redirect(kind: DatasetKind) -> Redirect {
    Redirect::to(&format!("/?saved={}", kind))
}

/// 전체 페이지: 매 요청마다 두 데이터셋을 새로 읽어 다시 계산
pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let (trades, trade_warning) = load_or_empty(&*state.trades).await;
    let (costs, cost_warning) = load_or_empty(&*state.costs).await;
    let summary = summarize(&trades, &costs);

    let mut notices = Vec::new();
    if let Some(kind) = query
        .saved
        .as_deref()
        .and_then(|saved| saved.parse::<DatasetKind>().ok())
    {
        notices.push(Notice::Saved(kind));
    }
    notices.extend(
        trade_warning
            .into_iter()
            .chain(cost_warning)
            .map(Notice::LoadFailed),
    );
    if summary.skipped_count() > 0 {
        notices.push(Notice::RowsSkipped {
            trades: summary.skipped_trades.len(),
            costs: summary.skipped_costs.len(),
        });
    }

    Html(render_page(&PageContext {
        trades: &trades,
        costs: &costs,
        summary: &summary,
        notices: &notices,
        layout: state.layout,
        today: Local::now().date_naive(),
    }))
}

pub async fn add_trade(
    State(state): State<AppState>,
    Form(form): Form<TradeForm>,
) -> Result<Redirect, AppError> {
    let record = form.into_record();
    info!("Adding trade record: {:?}", record.stock_name);

    let _guard = state.write_lock.lock().await;
    append_record(&*state.trades, record).await?;

    Ok(saved_redirect(DatasetKind::Trades))
}

pub async fn add_cost(
    State(state): State<AppState>,
    Form(form): Form<CostForm>,
) -> Result<Redirect, AppError> {
    let record = FixedCostRecord::new(form.date, form.amount, form.label);
    info!("Adding fixed cost: {} {}", record.label, record.amount);

    let _guard = state.write_lock.lock().await;
    append_record(&*state.costs, record).await?;

    Ok(saved_redirect(DatasetKind::FixedCosts))
}

/// 매매 기록 편집 그리드 저장 (데이터셋 전체 교체)
pub async fn save_trade_grid(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let rows: Vec<TradeRecord> = apply_grid(parse_grid(fields));

    let _guard = state.write_lock.lock().await;
    replace_records(&*state.trades, &rows).await?;

    Ok(saved_redirect(DatasetKind::Trades))
}

/// 고정비 편집 그리드 저장 (데이터셋 전체 교체)
pub async fn save_cost_grid(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let rows: Vec<FixedCostRecord> = apply_grid(parse_grid(fields));

    let _guard = state.write_lock.lock().await;
    replace_records(&*state.costs, &rows).await?;

    Ok(saved_redirect(DatasetKind::FixedCosts))
}
