use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::record::RecordError;
use crate::render::escape_html;

/// 요청 처리 에러
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("record store error: {0}")]
    Record(#[from] RecordError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);

        let body = format!(
            "<!DOCTYPE html><html lang=\"ko\"><head><meta charset=\"utf-8\"></head><body>\
             <h1>저장하지 못했습니다</h1><p>{}</p><p><a href=\"/\">돌아가기</a></p></body></html>",
            escape_html(&self.to_string())
        );
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}
