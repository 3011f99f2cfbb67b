//! Error types shared by the store, the HTTP layer and the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Store-level failures. The message is surfaced verbatim to API callers.
#[derive(Error, Debug)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Failures a list, search, lookup or insert handler can report
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Projeto não encontrado")]
    NotFound,

    #[error("Rota não encontrada")]
    UnknownRoute,

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound | ApiError::UnknownRoute => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed on the store");
        }
        let body = Json(json!({"success": false, "error": self.to_string()}));
        (status, body).into_response()
    }
}

/// The status endpoint reports failures with its own envelope.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct StatusError(#[from] pub DbError);

impl IntoResponse for StatusError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "status check failed on the store");
        let body = Json(json!({"status": "error", "error": self.to_string()}));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Failures seen by the catalog client before it falls back to an empty result
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error: {0}")]
    Api(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_to_http_status() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::BadRequest("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        let db = ApiError::Database(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(db.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn database_message_is_passed_through() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(err.to_string(), sqlx::Error::PoolTimedOut.to_string());
    }
}
