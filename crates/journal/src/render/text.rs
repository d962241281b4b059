use crate::ledger::LedgerSummary;
use crate::record::LoadWarning;

use super::dataset_title;
use super::format::format_won;

/// 콘솔용 총 정산 (`journal summary`)
pub fn render_summary_text(
    summary: &LedgerSummary,
    trade_count: usize,
    cost_count: usize,
    warnings: &[LoadWarning],
) -> String {
    let mut text = String::new();
    for warning in warnings {
        text.push_str(&format!(
            "[경고] {} 파일을 읽을 수 없음: {}\n",
            dataset_title(warning.kind),
            warning.message
        ));
    }

    text.push_str(&format!(
        "매매 기록: {}건 (계산 제외 {}건)\n",
        trade_count,
        summary.skipped_trades.len()
    ));
    text.push_str(&format!(
        "고정비: {}건 (계산 제외 {}건)\n",
        cost_count,
        summary.skipped_costs.len()
    ));
    for row in summary.skipped_trades.iter().chain(&summary.skipped_costs) {
        text.push_str(&format!(
            "  - {}번째 행 '{}': {}\n",
            row.position + 1,
            row.name,
            row.reason
        ));
    }

    text.push_str(&format!("매매 총수익: {}\n", format_won(summary.total_trade_profit)));
    text.push_str(&format!("고정비 합계: {}\n", format_won(summary.total_fixed_cost)));
    text.push_str(&format!("최종 순수익: {}\n", format_won(summary.net_profit)));
    text
}
