use crate::config::TableLayout;
use crate::ledger::{LedgerSummary, TradeLine};

use super::format::{escape_html, format_rate, format_thousands, format_won, sign_class, sign_of};

/// 투자 현황판 표
pub fn render_summary_table(summary: &LedgerSummary, layout: TableLayout) -> String {
    let mut html = String::from("<div class=\"table-wrap\"><table class=\"summary\">\n<thead><tr>");

    let headers: &[&str] = match layout {
        TableLayout::ThreeRow => &[
            "종목명",
            "매수날짜",
            "매수량",
            "매수단가",
            "총매수금액",
            "수익금액",
            "수익률",
        ],
        TableLayout::TwoRow => &[
            "종목명", "구분", "날짜", "수량", "단가", "금액", "수익금액", "수익률",
        ],
    };
    for header in headers {
        html.push_str(&format!("<th>{}</th>", header));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for line in &summary.lines {
        match layout {
            TableLayout::ThreeRow => push_three_row_block(&mut html, line),
            TableLayout::TwoRow => push_two_row_block(&mut html, line),
        }
    }

    html.push_str("</tbody></table></div>\n");
    html
}

fn profit_cells(line: &TradeLine, rowspan: usize) -> String {
    let class = sign_class(line.metrics.sign());
    format!(
        "<td rowspan=\"{rowspan}\" class=\"profit {class}\">{}</td>\
         <td rowspan=\"{rowspan}\" class=\"profit {class}\">{}</td>",
        format_thousands(line.metrics.profit),
        format_rate(line.metrics.profit_rate),
    )
}

fn leg_cells(date: &str, qty: f64, price: f64, total: f64) -> String {
    format!(
        "<td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
        escape_html(date),
        format_thousands(qty),
        format_thousands(price),
        format_thousands(total),
    )
}

fn push_three_row_block(html: &mut String, line: &TradeLine) {
    let record = &line.record;
    let metrics = &line.metrics;

    html.push_str(&format!(
        "<tr class=\"block-start\"><td rowspan=\"3\" class=\"name\">{}</td>{}{}</tr>\n",
        escape_html(&record.stock_name),
        leg_cells(
            &record.buy_date,
            metrics.buy_qty,
            metrics.buy_price,
            metrics.buy_total
        ),
        profit_cells(line, 3),
    ));
    html.push_str(
        "<tr class=\"labels\"><td>매도날짜</td><td>매도량</td><td>매도단가</td><td>총매도금액</td></tr>\n",
    );
    html.push_str(&format!(
        "<tr>{}</tr>\n",
        leg_cells(
            &record.sell_date,
            metrics.sell_qty,
            metrics.sell_price,
            metrics.sell_total
        ),
    ));
}

fn push_two_row_block(html: &mut String, line: &TradeLine) {
    let record = &line.record;
    let metrics = &line.metrics;

    html.push_str(&format!(
        "<tr class=\"block-start\"><td rowspan=\"2\" class=\"name\">{}</td><td class=\"side buy\">매수</td>{}{}</tr>\n",
        escape_html(&record.stock_name),
        leg_cells(
            &record.buy_date,
            metrics.buy_qty,
            metrics.buy_price,
            metrics.buy_total
        ),
        profit_cells(line, 2),
    ));
    html.push_str(&format!(
        "<tr><td class=\"side sell\">매도</td>{}</tr>\n",
        leg_cells(
            &record.sell_date,
            metrics.sell_qty,
            metrics.sell_price,
            metrics.sell_total
        ),
    ));
}

/// 하단 총 정산 (매매 총수익 / 고정비 합계 / 최종 순수익)
pub fn render_metrics(summary: &LedgerSummary) -> String {
    let metric = |label: &str, value: f64, inverse: bool| {
        let class = if inverse { "metric inverse" } else { "metric" };
        format!(
            "<div class=\"{class}\"><div class=\"metric-label\">{label}</div>\
             <div class=\"metric-value {}\">{}</div></div>",
            sign_class(sign_of(value)),
            format_won(value),
        )
    };

    format!(
        "<hr><div class=\"metrics\">{}{}{}</div>\n",
        metric("매매 총수익", summary.total_trade_profit, false),
        metric("고정비 합계", summary.total_fixed_cost, true),
        metric("최종 순수익", summary.net_profit, false),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::summarize;
    use chrono::NaiveDate;
    use interface::{FixedCostRecord, TradeLeg, TradeRecord};

    fn sample() -> LedgerSummary {
        let date = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        let leg = |quantity, price| TradeLeg {
            date,
            quantity,
            price,
        };
        let trades = vec![
            TradeRecord::new("<script>", leg(10, 1000), leg(10, 1200)),
            TradeRecord::new("하락주", leg(1, 5000), leg(1, 4000)),
        ];
        let costs = vec![FixedCostRecord::new(date, -100_000, "월 리딩비")];
        summarize(&trades, &costs)
    }

    #[test]
    fn three_row_blocks_span_profit_cells() {
        let html = render_summary_table(&sample(), TableLayout::ThreeRow);

        assert_eq!(html.matches("rowspan=\"3\"").count(), 6);
        assert!(html.contains("총매도금액"));
        assert!(html.contains("class=\"profit gain\">2,000<"));
        assert!(html.contains("20.0%"));
        assert!(html.contains("class=\"profit loss\">-1,000<"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn two_row_blocks_label_each_side() {
        let html = render_summary_table(&sample(), TableLayout::TwoRow);

        assert_eq!(html.matches("rowspan=\"2\"").count(), 6);
        assert_eq!(html.matches(">매수</td>").count(), 2);
        assert_eq!(html.matches(">매도</td>").count(), 2);
        assert!(!html.contains("rowspan=\"3\""));
    }

    #[test]
    fn metrics_show_currency_and_flag_cost_as_inverse() {
        let html = render_metrics(&sample());

        assert!(html.contains("매매 총수익"));
        assert!(html.contains("1,000원"));
        assert!(html.contains("metric inverse"));
        assert!(html.contains("-100,000원"));
        assert!(html.contains("-99,000원"));
    }
}
