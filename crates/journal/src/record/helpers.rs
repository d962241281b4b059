use interface::LedgerRecord;
use tracing::{info, warn};

use super::{LoadWarning, RecordError, RecordRepository};

/// 데이터셋 로드 (실패 시 빈 목록)
///
/// 파일이 깨져 있으면 에러 없이 빈 데이터셋으로 취급하고, 화면에 알릴 수 있도록
/// 경고를 함께 돌려준다.
pub async fn load_or_empty<R: LedgerRecord>(
    repo: &dyn RecordRepository<R>,
) -> (Vec<R>, Option<LoadWarning>) {
    match repo.load().await {
        Ok(rows) => (rows, None),
        Err(e) => {
            warn!("Failed to load {} dataset, using empty: {}", R::KIND, e);
            let warning = LoadWarning {
                kind: R::KIND,
                message: e.to_string(),
            };
            (Vec::new(), Some(warning))
        }
    }
}

/// 한 행을 덧붙이고 데이터셋 전체를 다시 저장
/// 저장 후 행 수를 돌려준다
pub async fn append_record<R: LedgerRecord>(
    repo: &dyn RecordRepository<R>,
    record: R,
) -> Result<usize, RecordError> {
    let (mut rows, _) = load_or_empty(repo).await;
    rows.push(record);
    repo.save(&rows).await?;

    info!("Appended {} record, {} rows total", R::KIND, rows.len());
    Ok(rows.len())
}

/// 편집기에서 확정한 행 목록으로 데이터셋 전체를 교체
pub async fn replace_records<R: LedgerRecord>(
    repo: &dyn RecordRepository<R>,
    rows: &[R],
) -> Result<(), RecordError> {
    repo.save(rows).await?;

    info!("Replaced {} dataset with {} rows", R::KIND, rows.len());
    Ok(())
}
