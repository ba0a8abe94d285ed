use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const COMPANY_NOT_FOUND_MESSAGE: &str = "Company info not available";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Company {0} not found")]
    CompanyNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::CompanyNotFound(company_id) => {
                tracing::debug!(%company_id, "company lookup missed");
                (StatusCode::NOT_FOUND, COMPANY_NOT_FOUND_MESSAGE)
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "database query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
