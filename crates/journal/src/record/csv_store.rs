use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use interface::{ID_COLUMN, LedgerRecord};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{RecordError, RecordRepository};
use crate::config::StoreConfig;

/// 엑셀에서 한글이 깨지지 않도록 파일 앞에 붙이는 UTF-8 BOM
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV 파일 기반 데이터셋 저장소
///
/// 저장할 때마다 파일 전체를 다시 쓴다. 같은 디렉토리의 임시 파일에 먼저 쓰고
/// rename으로 교체하므로 중간에 실패해도 기존 파일은 그대로 남는다.
pub struct CsvRecordRepository<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: LedgerRecord> CsvRecordRepository<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// 설정의 데이터 디렉토리와 파일 이름으로 저장소 생성
    /// 디렉토리가 없으면 생성
    pub fn from_config(config: &StoreConfig) -> Result<Self, RecordError> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| RecordError::io(&config.data_dir, e))?;

        let path = config.path_for(R::KIND);
        info!("Using {} dataset file: {}", R::KIND, path.display());

        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<R: LedgerRecord> RecordRepository<R> for CsvRecordRepository<R> {
    async fn load(&self) -> Result<Vec<R>, RecordError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_dataset::<R>(&path))
            .await
            .map_err(|e| RecordError::Other(format!("load task failed: {}", e)))?
    }

    async fn save(&self, rows: &[R]) -> Result<(), RecordError> {
        let path = self.path.clone();
        let rows = rows.to_vec();
        tokio::task::spawn_blocking(move || write_dataset(&path, &rows))
            .await
            .map_err(|e| RecordError::Other(format!("save task failed: {}", e)))?
    }
}

/// 파일 전체를 읽어 행 목록으로 변환
pub(crate) fn read_dataset<R: LedgerRecord>(path: &Path) -> Result<Vec<R>, RecordError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} not found, starting with an empty {}", path.display(), R::KIND);
            return Ok(Vec::new());
        }
        Err(e) => return Err(RecordError::io(path, e)),
    };

    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let corrupt = |reason: String| RecordError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(content);
    let headers = reader.headers().map_err(|e| corrupt(e.to_string()))?.clone();
    check_headers::<R>(&headers).map_err(corrupt)?;

    reader
        .deserialize::<R>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| corrupt(e.to_string()))
}

/// 선언된 컬럼(또는 이전 버전의 한글 헤더)이 모두 있는지 확인
fn check_headers<R: LedgerRecord>(headers: &StringRecord) -> Result<(), String> {
    let present = |name: &str| headers.iter().any(|h| h.trim() == name);

    let missing: Vec<&str> = R::KIND
        .columns()
        .iter()
        .zip(R::KIND.legacy_columns())
        .filter(|&(&column, &legacy)| !present(column) && !present(legacy))
        .map(|(&column, _)| column)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("missing columns: {}", missing.join(", ")))
    }
}

/// 행 목록 전체를 파일에 기록 (임시 파일 → rename)
pub(crate) fn write_dataset<R: LedgerRecord>(path: &Path, rows: &[R]) -> Result<(), RecordError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // persist 전에 drop되면 임시 파일은 자동으로 삭제됨
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| RecordError::io(dir, e))?;
    temp.write_all(UTF8_BOM)
        .map_err(|e| RecordError::io(temp.path(), e))?;

    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp.as_file_mut());

        let header = std::iter::once(ID_COLUMN).chain(R::KIND.columns().iter().copied());
        writer.write_record(header)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush().map_err(|e| RecordError::io(path, e))?;
    }

    temp.as_file()
        .sync_all()
        .map_err(|e| RecordError::io(temp.path(), e))?;
    temp.persist(path)?;

    debug!("Wrote {} {} rows to {}", rows.len(), R::KIND, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use interface::{FixedCostRecord, TradeLeg, TradeRecord};
    use tempfile::tempdir;

    fn trade(name: &str, buy_qty: u64, sell_price: u64) -> TradeRecord {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        TradeRecord::new(
            name,
            TradeLeg {
                date,
                quantity: buy_qty,
                price: 1000,
            },
            TradeLeg {
                date,
                quantity: buy_qty,
                price: sell_price,
            },
        )
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let repo = CsvRecordRepository::<TradeRecord>::new(dir.path().join("investments.csv"));

        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_reproduces_rows() {
        let dir = tempdir().unwrap();
        let repo = CsvRecordRepository::<TradeRecord>::new(dir.path().join("investments.csv"));
        let rows = vec![trade("삼성전자", 10, 1200), trade("카카오, 우선주", 3, 900)];

        repo.save(&rows).await.unwrap();
        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, rows);

        let first = std::fs::read(repo.path()).unwrap();
        repo.save(&loaded).await.unwrap();
        let second = std::fs::read(repo.path()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn written_file_has_bom_and_header_even_when_empty() {
        let dir = tempdir().unwrap();
        let repo = CsvRecordRepository::<FixedCostRecord>::new(dir.path().join("fixed_costs.csv"));

        repo.save(&[]).await.unwrap();
        let bytes = std::fs::read(repo.path()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        assert_eq!(&bytes[UTF8_BOM.len()..], b"id,date,amount,label\n");
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_ascii_labels_survive() {
        let dir = tempdir().unwrap();
        let repo = CsvRecordRepository::<FixedCostRecord>::new(dir.path().join("fixed_costs.csv"));
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let cost = FixedCostRecord::new(date, -100_000, "월 리딩비");

        repo.save(std::slice::from_ref(&cost)).await.unwrap();
        let text = String::from_utf8(std::fs::read(repo.path()).unwrap()).unwrap();
        assert!(text.contains("월 리딩비"));
        assert_eq!(repo.load().await.unwrap(), vec![cost]);
    }

    #[tokio::test]
    async fn unparsable_content_is_reported_as_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("investments.csv");
        let repo = CsvRecordRepository::<TradeRecord>::new(&path);

        std::fs::write(&path, "this is not a ledger\n\u{0}\u{1}garbage").unwrap();
        assert!(repo.load().await.unwrap_err().is_corrupt());

        std::fs::write(&path, b"\xff\xfe\x00binary").unwrap();
        assert!(repo.load().await.unwrap_err().is_corrupt());

        let header = "id,stockName,buyDate,buyQty,buyPrice,sellDate,sellQty,sellPrice\n";
        std::fs::write(&path, format!("{header}only,three,cells\n")).unwrap();
        assert!(repo.load().await.unwrap_err().is_corrupt());
    }

    #[tokio::test]
    async fn legacy_korean_headers_without_ids_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("investments.csv");
        std::fs::write(
            &path,
            "\u{feff}종목명,매수날짜,매수량,매수단가,매도날짜,매도량,매도단가\n\
             삼성전자,2024-01-05,10,70000,2024-02-01,10,75000.0\n\
             ,2024-03-01,,,2024-03-02,5,100\n",
        )
        .unwrap();
        let repo = CsvRecordRepository::<TradeRecord>::new(&path);

        let rows = repo.load().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].stock_name, "삼성전자");
        assert_eq!(rows[0].sell_price, "75000.0");
        assert_eq!(rows[1].stock_name, "");
        assert_ne!(rows[0].id, rows[1].id);
    }

    #[tokio::test]
    async fn failed_write_leaves_no_temporary_files() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("investments.csv");
        std::fs::create_dir(&target).unwrap();
        let repo = CsvRecordRepository::<TradeRecord>::new(&target);

        assert!(repo.save(&[trade("A", 1, 1)]).await.is_err());
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
