pub mod format;
pub mod forms;
pub mod table;
pub mod text;

use chrono::NaiveDate;
use interface::{DatasetKind, FixedCostRecord, TradeRecord};

use crate::config::TableLayout;
use crate::ledger::LedgerSummary;
use crate::record::LoadWarning;

pub use format::{escape_html, format_rate, format_thousands, format_won};
pub use forms::{render_cost_form, render_editor, render_trade_form};
pub use table::{render_metrics, render_summary_table};
pub use text::render_summary_text;

/// 페이지 상단 알림
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// 저장 성공
    Saved(DatasetKind),
    /// 파일을 읽지 못해 빈 데이터로 표시 중
    LoadFailed(LoadWarning),
    /// 숫자를 읽을 수 없어 계산에서 제외한 행
    RowsSkipped { trades: usize, costs: usize },
}

impl Notice {
    fn render(&self) -> String {
        match self {
            Notice::Saved(_) => "<div class=\"notice success\">저장되었습니다!</div>\n".to_string(),
            Notice::LoadFailed(warning) => format!(
                "<div class=\"notice warning\">{} 파일을 읽을 수 없어 빈 데이터로 표시합니다. ({})</div>\n",
                dataset_title(warning.kind),
                escape_html(&warning.message)
            ),
            Notice::RowsSkipped { trades, costs } => {
                let mut parts = Vec::new();
                if *trades > 0 {
                    parts.push(format!("매매 기록 {}건", trades));
                }
                if *costs > 0 {
                    parts.push(format!("고정비 {}건", costs));
                }
                format!(
                    "<div class=\"notice warning\">숫자로 읽을 수 없는 {}은(는) 현황판 계산에서 제외되었습니다.</div>\n",
                    parts.join(", ")
                )
            }
        }
    }
}

fn dataset_title(kind: DatasetKind) -> &'static str {
    match kind {
        DatasetKind::Trades => "매매 기록",
        DatasetKind::FixedCosts => "고정비",
    }
}

/// 한 번의 페이지 렌더링에 필요한 데이터
pub struct PageContext<'a> {
    pub trades: &'a [TradeRecord],
    pub costs: &'a [FixedCostRecord],
    pub summary: &'a LedgerSummary,
    pub notices: &'a [Notice],
    pub layout: TableLayout,
    pub today: NaiveDate,
}

const STYLE: &str = r#"
body { margin: 0; font-family: sans-serif; color: #222; }
.layout { display: grid; grid-template-columns: 320px 1fr; min-height: 100vh; }
aside { background: #f0f2f6; padding: 1rem; }
main { padding: 1rem 2rem; overflow-x: auto; }
details.panel { border: 1px solid #ddd; border-radius: 6px; padding: .5rem 1rem; margin: .75rem 0; background: #fff; }
form.entry label { display: block; margin: .4rem 0; }
form.entry input { display: block; width: 100%; box-sizing: border-box; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.table-wrap { overflow-x: auto; }
table { width: 100%; border-collapse: collapse; text-align: center; }
table.summary th, table.summary td { border: 1px solid #444; padding: 8px; }
table.summary thead { background-color: #f8f9fa; }
table.summary td.name { font-weight: bold; }
table.summary tr.labels td { background-color: #fafafa; font-size: .9em; font-weight: bold; }
table.grid td, table.grid th { border: 1px solid #ddd; padding: 2px; }
table.grid input[type=text] { width: 100%; box-sizing: border-box; border: none; }
.profit { font-weight: bold; }
.gain { color: red; }
.loss { color: blue; }
.flat { color: black; }
.metrics { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }
.metric-label { font-size: .9em; color: #555; }
.metric-value { font-size: 1.8em; }
.metric.inverse .metric-value.loss { color: #d33; }
.metric.inverse .metric-value.gain { color: #2a7; }
.notice { padding: .6rem 1rem; border-radius: 6px; margin: .5rem 0; }
.notice.success { background: #e6f4ea; color: #1e6b34; }
.notice.warning { background: #fff4e5; color: #8a4b00; }
"#;

/// 전체 페이지
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"ko\"><head><meta charset=\"utf-8\">\
         <title>주식 투자 일지</title><style>",
    );
    html.push_str(STYLE);
    html.push_str("</style></head><body><div class=\"layout\">\n");

    // 사이드바: 고정비 관리
    html.push_str("<aside><h2>💰 고정비 관리</h2>\n");
    html.push_str(&render_cost_form(ctx.today));
    if !ctx.costs.is_empty() {
        html.push_str("<hr><h3>고정비 내역</h3>\n");
        html.push_str(&render_editor(ctx.costs, "/costs/edit", "비용 수정사항 저장"));
    }
    html.push_str("</aside>\n");

    html.push_str("<main><h1>📊 주식 매매 관리 시스템</h1>\n");
    for notice in ctx.notices {
        html.push_str(&notice.render());
    }

    html.push_str(&render_trade_form(ctx.today));
    html.push_str(
        "<details class=\"panel\"><summary>🛠️ 데이터 수정/삭제 (여기서 지우거나 수정 가능)</summary>\n",
    );
    html.push_str(&render_editor(ctx.trades, "/trades/edit", "매매 내역 변경사항 저장"));
    html.push_str("</details>\n");

    html.push_str("<h2>📋 투자 현황판</h2>\n");
    if !ctx.trades.is_empty() {
        html.push_str(&render_summary_table(ctx.summary, ctx.layout));
    }
    html.push_str(&render_metrics(ctx.summary));

    html.push_str("</main></div></body></html>\n");
    html
}
