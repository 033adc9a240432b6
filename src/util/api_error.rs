use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::{export::ExportError, gulf::gulf_country_list};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid country: {0}. Choose from {list}", list = gulf_country_list())]
    InvalidCountry(String),

    #[error("Invalid location filter: choose 'sky' or 'ground'")]
    InvalidLocation,

    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Export(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "File not found" })),
            )
                .into_response(),
            err => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": err.to_string(), "data": [] })),
            )
                .into_response(),
        }
    }
}
