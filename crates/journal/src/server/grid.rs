use std::collections::{HashMap, HashSet};

use interface::{ID_COLUMN, LedgerRecord, RecordId};

/// 삭제 체크박스 필드 이름
pub const DELETE_FIELD: &str = "delete";

/// 편집 그리드에서 제출된 한 행
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridRow {
    /// 기존 행이면 식별자, 새 행이면 None
    pub id: Option<RecordId>,
    pub cells: HashMap<String, String>,
    pub delete: bool,
}

impl GridRow {
    fn is_blank(&self) -> bool {
        self.cells.values().all(|value| value.trim().is_empty())
    }
}

/// 폼 필드 목록을 행 단위로 묶는다
///
/// 필드는 화면 순서대로 들어오며, `id` 필드가 나올 때마다 새 행이 시작된다.
/// 첫 `id` 이전의 필드는 무시한다.
pub fn parse_grid(fields: Vec<(String, String)>) -> Vec<GridRow> {
    let mut rows: Vec<GridRow> = Vec::new();

    for (name, value) in fields {
        if name == ID_COLUMN {
            rows.push(GridRow {
                id: value.parse().ok(),
                ..Default::default()
            });
            continue;
        }

        let Some(row) = rows.last_mut() else {
            continue;
        };
        if name == DELETE_FIELD {
            row.delete = true;
        } else {
            row.cells.insert(name, value);
        }
    }

    rows
}

/// 제출된 그리드를 새 데이터셋으로 변환 (제출 순서 유지)
///
/// 삭제 표시된 행은 빠지고, 식별자가 없거나 중복된 행은 새 식별자를 받는다.
/// 모든 칸이 빈 새 행은 무시한다.
pub fn apply_grid<R: LedgerRecord>(rows: Vec<GridRow>) -> Vec<R> {
    let mut seen = HashSet::new();

    rows.into_iter()
        .filter(|row| !row.delete)
        .filter_map(|row| match row.id {
            Some(id) if seen.insert(id) => Some(R::from_cells(id, &row.cells)),
            _ if row.is_blank() => None,
            _ => Some(R::from_cells(RecordId::generate(), &row.cells)),
        })
        .collect()
}
