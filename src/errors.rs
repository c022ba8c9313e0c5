use axum::http::StatusCode;
use axum::Json;
use thiserror::Error;

use crate::money::MalformedPrice;

/// Failures of the aggregation operations. All synchronous, none transient.
#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("no sales records loaded")]
    EmptyDataset,
    #[error("region '{0}' matches no record")]
    InvalidRegion(String),
    #[error("no records dated {side} the price increase")]
    NoDataInRange { side: &'static str },
    #[error("first record has zero sales, percent change is undefined")]
    DivisionByZero,
}

/// Failures of the CSV combining pipeline. Any of these aborts the run
/// before the output file is written.
#[derive(Debug, Error)]
pub enum CombineError {
    #[error("no input files given")]
    NoInput,
    #[error("{0}: columns do not match the first input file")]
    SchemaMismatch(String),
    #[error(transparent)]
    MalformedPrice(#[from] MalformedPrice),
    #[error("row {row}: quantity '{value}' is not an integer")]
    MalformedQuantity { row: usize, value: String },
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("date parse error: {0}")]
    DateParse(#[from] chrono::ParseError),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<AggregateError> for AppError {
    fn from(err: AggregateError) -> Self {
        match err {
            AggregateError::InvalidRegion(_) => Self::bad_request(err.to_string()),
            _ => Self::internal(err),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}
