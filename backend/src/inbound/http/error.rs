//! HTTP mapping for domain errors.
//!
//! Keeps [`Error`] free of actix types while letting handlers return it
//! directly: it becomes a JSON body `{ "error", "code", "traceId"?,
//! "details"? }` with a status derived from its code.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message sent for failures the handlers did not anticipate.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Internal errors keep their message, which adapters have already
/// sanitised, but lose any structured details.
fn strip_internal_details(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) && error.details().is_some() {
        let mut stripped = Error::internal(error.message());
        if let Some(id) = error.trace_id() {
            stripped = stripped.with_trace_id(id);
        }
        stripped
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(strip_internal_details(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_SERVER_ERROR)
    }
}

/// Map JSON extractor failures onto domain errors.
///
/// Only a missing id and a taken email are reported as client errors. A body
/// that cannot be read as JSON, whatever the cause, is an unexpected failure
/// and gets the generic internal message.
pub fn json_error(err: JsonPayloadError) -> Error {
    Error::from(actix_web::Error::from(err))
}

/// JSON extractor configuration routing failures through [`json_error`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req: &HttpRequest| actix_web::Error::from(json_error(err)))
}

/// Query string extractor configuration; malformed strings are client errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        actix_web::Error::from(
            Error::invalid_request(format!("invalid query string: {err}"))
                .with_details(json!({ "code": "invalid_query" })),
        )
    })
}
