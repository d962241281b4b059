use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

/// 모든 데이터셋 파일의 첫 번째 컬럼 (행 식별자)
pub const ID_COLUMN: &str = "id";

/// 매매 기록 데이터셋의 컬럼 순서
pub const TRADE_COLUMNS: [&str; 7] = [
    "stockName",
    "buyDate",
    "buyQty",
    "buyPrice",
    "sellDate",
    "sellQty",
    "sellPrice",
];

/// 고정비 데이터셋의 컬럼 순서
pub const COST_COLUMNS: [&str; 3] = ["date", "amount", "label"];

/// 날짜 셀 저장 형식
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 데이터셋 종류 (매매 기록 / 고정비)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetKind {
    /// 매매 기록
    Trades,
    /// 고정비 (리딩비 등)
    FixedCosts,
}

impl DatasetKind {
    /// 저장 파일의 기본 이름
    pub fn default_file_name(&self) -> &'static str {
        match self {
            DatasetKind::Trades => "investments.csv",
            DatasetKind::FixedCosts => "fixed_costs.csv",
        }
    }

    /// 선언된 컬럼 스키마 (id 컬럼 제외)
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Trades => &TRADE_COLUMNS,
            DatasetKind::FixedCosts => &COST_COLUMNS,
        }
    }

    /// 이전 버전 파일에서 쓰던 한글 헤더 (columns()와 같은 순서)
    pub fn legacy_columns(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Trades => &[
                "종목명",
                "매수날짜",
                "매수량",
                "매수단가",
                "매도날짜",
                "매도량",
                "매도단가",
            ],
            DatasetKind::FixedCosts => &["날짜", "금액", "항목"],
        }
    }
}

impl Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetKind::Trades => write!(f, "investments"),
            DatasetKind::FixedCosts => write!(f, "fixedCosts"),
        }
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "investments" | "trades" | "trade" => Ok(DatasetKind::Trades),
            "fixedCosts" | "costs" | "cost" => Ok(DatasetKind::FixedCosts),
            _ => Err(format!("Invalid DatasetKind: {}", s)),
        }
    }
}

/// 행 식별자
///
/// 생성 시점에 한 번 부여되고 파일에 함께 저장된다. 편집기는 행 위치가 아니라
/// 이 값으로 행을 찾는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(RecordId)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    /// 빈 셀은 새 식별자로 채운다 (외부에서 행을 추가한 파일 대응)
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(RecordId::generate());
        }
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 숫자로 읽을 수 없는 셀
#[derive(Error, Debug, Clone, PartialEq)]
#[error("column {column} holds a non-numeric value: {value:?}")]
pub struct InvalidNumber {
    pub column: &'static str,
    pub value: String,
}

/// 셀 텍스트를 숫자로 해석
///
/// 빈 셀은 0 (한쪽만 입력된 매매), 그 외에는 유한한 10진수여야 한다.
pub fn parse_cell_number(column: &'static str, raw: &str) -> Result<f64, InvalidNumber> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InvalidNumber {
            column,
            value: raw.to_string(),
        }),
    }
}

/// 데이터셋 한 행이 구현하는 공통 인터페이스
///
/// 저장소와 편집기는 이 트레이트만 보고 동작한다.
pub trait LedgerRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: DatasetKind;

    fn id(&self) -> RecordId;

    /// 컬럼 이름으로 셀 값 조회
    fn cell(&self, column: &str) -> Option<&str>;

    /// 편집 그리드에서 넘어온 셀로 행 재구성 (없는 컬럼은 빈 값)
    fn from_cells(id: RecordId, cells: &HashMap<String, String>) -> Self;

    /// 스키마 순서대로 나열한 셀 값
    fn cells(&self) -> Vec<&str> {
        Self::KIND
            .columns()
            .iter()
            .map(|column| self.cell(column).unwrap_or_default())
            .collect()
    }
}

fn take_cell(cells: &HashMap<String, String>, column: &str) -> String {
    cells.get(column).cloned().unwrap_or_default()
}

/// 매수 또는 매도 한쪽 입력값 (입력 폼 기준)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeLeg {
    pub date: NaiveDate,
    pub quantity: u64,
    pub price: u64,
}

/// 매매 기록 (매수/매도 한 쌍)
///
/// 숫자와 날짜 셀은 입력된 텍스트 그대로 보관하고, 현황판을 그릴 때만 해석한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    /// 종목명
    #[serde(rename = "stockName", alias = "종목명")]
    pub stock_name: String,
    /// 매수날짜
    #[serde(rename = "buyDate", alias = "매수날짜")]
    pub buy_date: String,
    /// 매수량
    #[serde(rename = "buyQty", alias = "매수량")]
    pub buy_qty: String,
    /// 매수단가
    #[serde(rename = "buyPrice", alias = "매수단가")]
    pub buy_price: String,
    /// 매도날짜
    #[serde(rename = "sellDate", alias = "매도날짜")]
    pub sell_date: String,
    /// 매도량
    #[serde(rename = "sellQty", alias = "매도량")]
    pub sell_qty: String,
    /// 매도단가
    #[serde(rename = "sellPrice", alias = "매도단가")]
    pub sell_price: String,
}

impl TradeRecord {
    /// 입력 폼 값으로 새 매매 기록 생성
    pub fn new(stock_name: impl Into<String>, buy: TradeLeg, sell: TradeLeg) -> Self {
        Self {
            id: RecordId::generate(),
            stock_name: stock_name.into(),
            buy_date: buy.date.format(DATE_FORMAT).to_string(),
            buy_qty: buy.quantity.to_string(),
            buy_price: buy.price.to_string(),
            sell_date: sell.date.format(DATE_FORMAT).to_string(),
            sell_qty: sell.quantity.to_string(),
            sell_price: sell.price.to_string(),
        }
    }

    /// 파생 지표 계산. 숫자 셀 하나라도 읽을 수 없으면 에러
    pub fn metrics(&self) -> Result<TradeMetrics, InvalidNumber> {
        let buy_qty = parse_cell_number("buyQty", &self.buy_qty)?;
        let buy_price = parse_cell_number("buyPrice", &self.buy_price)?;
        let sell_qty = parse_cell_number("sellQty", &self.sell_qty)?;
        let sell_price = parse_cell_number("sellPrice", &self.sell_price)?;

        Ok(TradeMetrics::from_legs(buy_qty, buy_price, sell_qty, sell_price))
    }
}

impl LedgerRecord for TradeRecord {
    const KIND: DatasetKind = DatasetKind::Trades;

    fn id(&self) -> RecordId {
        self.id
    }

    fn cell(&self, column: &str) -> Option<&str> {
        let value = match column {
            "stockName" => &self.stock_name,
            "buyDate" => &self.buy_date,
            "buyQty" => &self.buy_qty,
            "buyPrice" => &self.buy_price,
            "sellDate" => &self.sell_date,
            "sellQty" => &self.sell_qty,
            "sellPrice" => &self.sell_price,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn from_cells(id: RecordId, cells: &HashMap<String, String>) -> Self {
        Self {
            id,
            stock_name: take_cell(cells, "stockName"),
            buy_date: take_cell(cells, "buyDate"),
            buy_qty: take_cell(cells, "buyQty"),
            buy_price: take_cell(cells, "buyPrice"),
            sell_date: take_cell(cells, "sellDate"),
            sell_qty: take_cell(cells, "sellQty"),
            sell_price: take_cell(cells, "sellPrice"),
        }
    }
}

/// 수익 부호 (현황판 색상 결정)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitSign {
    Gain,
    Loss,
    Flat,
}

/// 매매 한 건의 파생 지표 (저장하지 않음)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeMetrics {
    pub buy_qty: f64,
    pub buy_price: f64,
    pub sell_qty: f64,
    pub sell_price: f64,
    /// 총매수금액
    pub buy_total: f64,
    /// 총매도금액
    pub sell_total: f64,
    /// 수익금액
    pub profit: f64,
    /// 수익률 (%). 총매수금액이 0이면 0
    pub profit_rate: f64,
}

impl TradeMetrics {
    pub fn from_legs(buy_qty: f64, buy_price: f64, sell_qty: f64, sell_price: f64) -> Self {
        let buy_total = buy_qty * buy_price;
        let sell_total = sell_qty * sell_price;
        let profit = sell_total - buy_total;
        let profit_rate = if buy_total > 0.0 {
            profit / buy_total * 100.0
        } else {
            0.0
        };

        Self {
            buy_qty,
            buy_price,
            sell_qty,
            sell_price,
            buy_total,
            sell_total,
            profit,
            profit_rate,
        }
    }

    pub fn sign(&self) -> ProfitSign {
        if self.profit > 0.0 {
            ProfitSign::Gain
        } else if self.profit < 0.0 {
            ProfitSign::Loss
        } else {
            ProfitSign::Flat
        }
    }
}

/// 고정비 기록 (리딩비 등). 지출은 음수로 적는 것이 관례
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCostRecord {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    /// 날짜
    #[serde(alias = "날짜")]
    pub date: String,
    /// 금액
    #[serde(alias = "금액")]
    pub amount: String,
    /// 항목
    #[serde(alias = "항목")]
    pub label: String,
}

impl FixedCostRecord {
    pub fn new(date: NaiveDate, amount: i64, label: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            date: date.format(DATE_FORMAT).to_string(),
            amount: amount.to_string(),
            label: label.into(),
        }
    }

    pub fn amount_value(&self) -> Result<f64, InvalidNumber> {
        parse_cell_number("amount", &self.amount)
    }
}

impl LedgerRecord for FixedCostRecord {
    const KIND: DatasetKind = DatasetKind::FixedCosts;

    fn id(&self) -> RecordId {
        self.id
    }

    fn cell(&self, column: &str) -> Option<&str> {
        let value = match column {
            "date" => &self.date,
            "amount" => &self.amount,
            "label" => &self.label,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn from_cells(id: RecordId, cells: &HashMap<String, String>) -> Self {
        Self {
            id,
            date: take_cell(cells, "date"),
            amount: take_cell(cells, "amount"),
            label: take_cell(cells, "label"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::value::{Error as ValueError, StrDeserializer};
    use serde::de::IntoDeserializer;

    fn leg(quantity: u64, price: u64) -> TradeLeg {
        TradeLeg {
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            quantity,
            price,
        }
    }

    #[test]
    fn profit_and_rate_for_a_closed_trade() {
        let trade = TradeRecord::new("삼성전자", leg(10, 1000), leg(10, 1200));
        let metrics = trade.metrics().unwrap();

        assert_eq!(metrics.buy_total, 10_000.0);
        assert_eq!(metrics.sell_total, 12_000.0);
        assert_eq!(metrics.profit, 2_000.0);
        assert!((metrics.profit_rate - 20.0).abs() < 1e-9);
        assert_eq!(metrics.sign(), ProfitSign::Gain);
    }

    #[test]
    fn zero_buy_total_yields_zero_rate() {
        let trade = TradeRecord::new("A", leg(0, 5000), leg(3, 7000));
        let metrics = trade.metrics().unwrap();

        assert_eq!(metrics.buy_total, 0.0);
        assert_eq!(metrics.profit_rate, 0.0);
        assert_eq!(metrics.profit, 21_000.0);
    }

    #[test]
    fn blank_cells_count_as_zero_on_the_empty_side() {
        let mut trade = TradeRecord::new("B", leg(5, 100), leg(0, 0));
        trade.sell_qty = String::new();
        trade.sell_price = "  ".to_string();

        let metrics = trade.metrics().unwrap();
        assert_eq!(metrics.sell_total, 0.0);
        assert_eq!(metrics.profit, -500.0);
        assert_eq!(metrics.sign(), ProfitSign::Loss);
    }

    #[test]
    fn non_numeric_quantity_is_rejected() {
        let mut trade = TradeRecord::new("C", leg(1, 1), leg(1, 1));
        trade.buy_qty = "열개".to_string();

        let err = trade.metrics().unwrap_err();
        assert_eq!(err.column, "buyQty");
        assert_eq!(err.value, "열개");
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(parse_cell_number("amount", "NaN").is_err());
        assert!(parse_cell_number("amount", "inf").is_err());
        assert_eq!(parse_cell_number("amount", " -100000 ").unwrap(), -100_000.0);
        assert_eq!(parse_cell_number("amount", "10.0").unwrap(), 10.0);
    }

    #[test]
    fn dataset_kind_round_trips_through_display() {
        for kind in [DatasetKind::Trades, DatasetKind::FixedCosts] {
            assert_eq!(kind.to_string().parse::<DatasetKind>().unwrap(), kind);
        }
        assert!("positions".parse::<DatasetKind>().is_err());
        assert_eq!(DatasetKind::Trades.columns().len(), 7);
        assert_eq!(DatasetKind::FixedCosts.default_file_name(), "fixed_costs.csv");
    }

    #[test]
    fn blank_id_cell_gets_a_fresh_identifier() {
        let blank: StrDeserializer<'_, ValueError> = "".into_deserializer();
        let first = RecordId::deserialize(blank).unwrap();
        let blank: StrDeserializer<'_, ValueError> = " ".into_deserializer();
        let second = RecordId::deserialize(blank).unwrap();
        assert_ne!(first, second);

        let id = RecordId::generate();
        let text = id.to_string();
        let parsed: StrDeserializer<'_, ValueError> = text.as_str().into_deserializer();
        assert_eq!(RecordId::deserialize(parsed).unwrap(), id);
    }

    #[test]
    fn cells_follow_schema_order() {
        let cost = FixedCostRecord::new(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            -100_000,
            "월 리딩비",
        );
        assert_eq!(cost.cells(), vec!["2025-03-01", "-100000", "월 리딩비"]);

        let mut cells = HashMap::new();
        cells.insert("label".to_string(), "수수료".to_string());
        let rebuilt = FixedCostRecord::from_cells(cost.id, &cells);
        assert_eq!(rebuilt.id, cost.id);
        assert_eq!(rebuilt.amount, "");
        assert_eq!(rebuilt.label, "수수료");
    }
}
