use chrono::NaiveDate;
use interface::{DATE_FORMAT, LedgerRecord};

use super::format::escape_html;

/// 고정비 입력 폼의 기본값
pub const DEFAULT_COST_AMOUNT: i64 = -100_000;
pub const COST_AMOUNT_STEP: i64 = 10_000;
pub const DEFAULT_COST_LABEL: &str = "월 리딩비";

/// 편집 그리드와 폼에 표시할 한글 컬럼명
fn column_label<R: LedgerRecord>(column: &str) -> &'static str {
    R::KIND
        .columns()
        .iter()
        .zip(R::KIND.legacy_columns())
        .find(|&(&name, _)| name == column)
        .map(|(_, &label)| label)
        .unwrap_or("")
}

/// 새 매매 기록 추가 폼
pub fn render_trade_form(today: NaiveDate) -> String {
    let today = today.format(DATE_FORMAT);
    let leg = |title: &str, prefix: &str, date_label: &str, qty_label: &str, price_label: &str| {
        format!(
            "<fieldset><legend>{title}</legend>\
             <label>{date_label}<input type=\"date\" name=\"{prefix}Date\" value=\"{today}\" required></label>\
             <label>{qty_label}<input type=\"number\" name=\"{prefix}Qty\" min=\"0\" step=\"1\" value=\"0\" required></label>\
             <label>{price_label}<input type=\"number\" name=\"{prefix}Price\" min=\"0\" step=\"1\" value=\"0\" required></label>\
             </fieldset>"
        )
    };

    format!(
        "<details class=\"panel\"><summary>➕ 새 매매 기록 추가</summary>\n\
         <form method=\"post\" action=\"/trades\" class=\"entry\">\
         <label>종목명<input type=\"text\" name=\"stockName\"></label>\
         <div class=\"columns\">{}{}</div>\
         <button type=\"submit\">매매 내역 저장</button></form></details>\n",
        leg("[매수 기록]", "buy", "매수일", "매수량", "매수단가"),
        leg("[매도 기록]", "sell", "매도일", "매도량", "매도단가"),
    )
}

/// 고정비 입력 폼 (사이드바)
///
/// 금액의 `step`은 증감 단위로만 쓰인다. 값 검사는 서버에서 한다.
pub fn render_cost_form(today: NaiveDate) -> String {
    format!(
        "<details class=\"panel\"><summary>비용 입력</summary>\n\
         <form method=\"post\" action=\"/costs\" class=\"entry\" novalidate>\
         <label>날짜<input type=\"date\" name=\"date\" value=\"{}\" required></label>\
         <label>금액 (마이너스)<input type=\"number\" name=\"amount\" step=\"{}\" value=\"{}\" required></label>\
         <label>항목명<input type=\"text\" name=\"label\" value=\"{}\"></label>\
         <button type=\"submit\">저장</button></form></details>\n",
        today.format(DATE_FORMAT),
        COST_AMOUNT_STEP,
        DEFAULT_COST_AMOUNT,
        escape_html(DEFAULT_COST_LABEL),
    )
}

/// 데이터셋 전체를 편집 가능한 그리드로 표시
///
/// 각 행은 hidden `id` 필드로 시작하고, 컬럼별 입력칸과 `delete` 체크박스가 뒤따른다.
/// 마지막의 빈 행은 그리드에서 새 행을 추가할 때 쓴다.
pub fn render_editor<R: LedgerRecord>(rows: &[R], action: &str, button: &str) -> String {
    let columns = R::KIND.columns();
    let mut html = format!(
        "<form method=\"post\" action=\"{}\" class=\"editor\"><div class=\"table-wrap\"><table class=\"grid\">\n<thead><tr><th>#</th>",
        escape_html(action)
    );
    for column in columns {
        html.push_str(&format!("<th>{}</th>", column_label::<R>(column)));
    }
    html.push_str("<th>삭제</th></tr></thead>\n<tbody>\n");

    for (index, row) in rows.iter().enumerate() {
        html.push_str(&format!(
            "<tr><td><input type=\"hidden\" name=\"id\" value=\"{}\">{}</td>",
            row.id(),
            index + 1
        ));
        for (column, value) in columns.iter().zip(row.cells()) {
            html.push_str(&format!(
                "<td><input type=\"text\" name=\"{}\" value=\"{}\"></td>",
                column,
                escape_html(value)
            ));
        }
        html.push_str("<td><input type=\"checkbox\" name=\"delete\" value=\"1\"></td></tr>\n");
    }

    html.push_str("<tr class=\"new-row\"><td><input type=\"hidden\" name=\"id\" value=\"\">+</td>");
    for column in columns {
        html.push_str(&format!(
            "<td><input type=\"text\" name=\"{}\" value=\"\"></td>",
            column
        ));
    }
    html.push_str("<td></td></tr>\n");

    html.push_str(&format!(
        "</tbody></table></div><button type=\"submit\">{}</button></form>\n",
        escape_html(button)
    ));
    html
}
