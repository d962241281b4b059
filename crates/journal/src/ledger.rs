use interface::{FixedCostRecord, InvalidNumber, RecordId, TradeMetrics, TradeRecord};

/// 현황판 한 줄 (계산 가능한 매매 기록)
#[derive(Debug, Clone, PartialEq)]
pub struct TradeLine {
    pub record: TradeRecord,
    pub metrics: TradeMetrics,
}

/// 숫자를 읽을 수 없어 제외된 행
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub id: RecordId,
    /// 데이터셋 안에서의 위치 (0부터)
    pub position: usize,
    /// 매매 기록이면 종목명, 고정비면 항목명
    pub name: String,
    pub reason: InvalidNumber,
}

/// 현황판 전체 계산 결과
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerSummary {
    pub lines: Vec<TradeLine>,
    pub skipped_trades: Vec<SkippedRow>,
    pub skipped_costs: Vec<SkippedRow>,
    /// 매매 총수익 = Σ총매도금액 − Σ총매수금액
    pub total_trade_profit: f64,
    /// 고정비 합계
    pub total_fixed_cost: f64,
    /// 최종 순수익 = 매매 총수익 + 고정비 합계
    pub net_profit: f64,
}

impl LedgerSummary {
    pub fn skipped_count(&self) -> usize {
        self.skipped_trades.len() + self.skipped_costs.len()
    }
}

/// 매매 기록과 고정비로 현황판 계산
///
/// 숫자로 읽을 수 없는 행은 표와 합계에서 모두 빠지고 skipped 목록에 남는다.
pub fn summarize(trades: &[TradeRecord], costs: &[FixedCostRecord]) -> LedgerSummary {
    let mut summary = LedgerSummary::default();
    let mut buy_sum = 0.0;
    let mut sell_sum = 0.0;

    for (position, trade) in trades.iter().enumerate() {
        match trade.metrics() {
            Ok(metrics) => {
                buy_sum += metrics.buy_total;
                sell_sum += metrics.sell_total;
                summary.lines.push(TradeLine {
                    record: trade.clone(),
                    metrics,
                });
            }
            Err(reason) => summary.skipped_trades.push(SkippedRow {
                id: trade.id,
                position,
                name: trade.stock_name.clone(),
                reason,
            }),
        }
    }

    for (position, cost) in costs.iter().enumerate() {
        match cost.amount_value() {
            Ok(amount) => summary.total_fixed_cost += amount,
            Err(reason) => summary.skipped_costs.push(SkippedRow {
                id: cost.id,
                position,
                name: cost.label.clone(),
                reason,
            }),
        }
    }

    summary.total_trade_profit = sell_sum - buy_sum;
    summary.net_profit = summary.total_trade_profit + summary.total_fixed_cost;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use interface::TradeLeg;

    fn trade(name: &str, qty: u64, buy: u64, sell: u64) -> TradeRecord {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        TradeRecord::new(
            name,
            TradeLeg {
                date,
                quantity: qty,
                price: buy,
            },
            TradeLeg {
                date,
                quantity: qty,
                price: sell,
            },
        )
    }

    fn cost(amount: i64) -> FixedCostRecord {
        FixedCostRecord::new(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(), amount, "월 리딩비")
    }

    #[test]
    fn empty_datasets_sum_to_zero() {
        let summary = summarize(&[], &[]);
        assert!(summary.lines.is_empty());
        assert_eq!(summary.total_trade_profit, 0.0);
        assert_eq!(summary.total_fixed_cost, 0.0);
        assert_eq!(summary.net_profit, 0.0);
    }

    #[test]
    fn net_profit_adds_costs_to_trade_profit() {
        let trades = vec![trade("A", 10, 1000, 1200), trade("B", 5, 2000, 1500)];
        let costs = vec![cost(-100_000), cost(-50_000)];

        let summary = summarize(&trades, &costs);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.total_trade_profit, 2_000.0 - 2_500.0);
        assert_eq!(summary.total_fixed_cost, -150_000.0);
        assert_eq!(
            summary.net_profit,
            summary.total_trade_profit + summary.total_fixed_cost
        );
    }

    #[test]
    fn bad_rows_are_left_out_of_table_and_totals() {
        let mut broken = trade("깨진행", 1, 1, 1);
        broken.buy_qty = "abc".to_string();
        let trades = vec![trade("A", 10, 1000, 1200), broken, trade("C", 1, 100, 300)];
        let mut bad_cost = cost(0);
        bad_cost.amount = "십만원".to_string();
        let costs = vec![cost(-1_000), bad_cost];

        let summary = summarize(&trades, &costs);

        let names: Vec<&str> = summary
            .lines
            .iter()
            .map(|line| line.record.stock_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(summary.total_trade_profit, 2_200.0);
        assert_eq!(summary.skipped_trades.len(), 1);
        assert_eq!(summary.skipped_trades[0].position, 1);
        assert_eq!(summary.skipped_trades[0].name, "깨진행");
        assert_eq!(summary.total_fixed_cost, -1_000.0);
        assert_eq!(summary.skipped_costs.len(), 1);
        assert_eq!(summary.skipped_count(), 2);
    }
}
