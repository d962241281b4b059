use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use interface::DatasetKind;

pub const DEFAULT_PORT: u16 = 8501;

/// 설정 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// 데이터셋 파일 위치
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub trades_file: String,
    pub costs_file: String,
}

impl StoreConfig {
    /// 기본 파일 이름으로 생성
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            trades_file: DatasetKind::Trades.default_file_name().to_string(),
            costs_file: DatasetKind::FixedCosts.default_file_name().to_string(),
        }
    }

    pub fn path_for(&self, kind: DatasetKind) -> PathBuf {
        match kind {
            DatasetKind::Trades => self.data_dir.join(&self.trades_file),
            DatasetKind::FixedCosts => self.data_dir.join(&self.costs_file),
        }
    }
}

/// 현황판 표 레이아웃
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableLayout {
    /// 매수 행 / 매도 라벨 행 / 매도 행
    #[default]
    ThreeRow,
    /// 매수 행 / 매도 행
    TwoRow,
}

impl Display for TableLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableLayout::ThreeRow => write!(f, "three-row"),
            TableLayout::TwoRow => write!(f, "two-row"),
        }
    }
}

impl FromStr for TableLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "three-row" | "3" => Ok(TableLayout::ThreeRow),
            "two-row" | "2" => Ok(TableLayout::TwoRow),
            _ => Err(format!("Invalid TableLayout: {}", s)),
        }
    }
}

/// 애플리케이션 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub store: StoreConfig,
    pub port: u16,
    pub log_dir: PathBuf,
    pub table_layout: TableLayout,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::new("."),
            port: DEFAULT_PORT,
            log_dir: PathBuf::from("logs"),
            table_layout: TableLayout::default(),
        }
    }
}

impl LedgerConfig {
    /// .env 파일과 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 키 조회 함수로 설정 구성 (값이 없으면 기본값)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup("JOURNAL_DATA_DIR") {
            config.store.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("JOURNAL_TRADES_FILE") {
            config.store.trades_file = file;
        }
        if let Some(file) = lookup("JOURNAL_COSTS_FILE") {
            config.store.costs_file = file;
        }
        if let Some(port) = lookup("JOURNAL_PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "JOURNAL_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(dir) = lookup("JOURNAL_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(layout) = lookup("JOURNAL_TABLE_LAYOUT") {
            config.table_layout = layout.parse().map_err(|_| ConfigError::InvalidValue {
                key: "JOURNAL_TABLE_LAYOUT",
                value: layout.clone(),
            })?;
        }

        Ok(config)
    }
}
