use std::path::PathBuf;

use async_trait::async_trait;
use interface::{DatasetKind, LedgerRecord};

/// 데이터셋 저장소 인터페이스
/// 파일 외 다른 저장소나 테스트 더블로 교체할 수 있도록 트레이트로 정의
#[async_trait]
pub trait RecordRepository<R: LedgerRecord>: Send + Sync {
    /// 저장된 전체 행 조회 (파일이 없으면 빈 목록)
    async fn load(&self) -> Result<Vec<R>, RecordError>;

    /// 전체 행을 저장하여 기존 내용을 대체
    async fn save(&self, rows: &[R]) -> Result<(), RecordError>;
}

/// 로드 실패를 빈 데이터셋으로 대체했을 때 남기는 경고
#[derive(Debug, Clone, PartialEq)]
pub struct LoadWarning {
    pub kind: DatasetKind,
    pub message: String,
}

/// 기록 저장소 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt dataset {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Atomic replace failed: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Other error: {0}")]
    Other(String),
}

impl RecordError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RecordError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, RecordError::Corrupt { .. })
    }
}
