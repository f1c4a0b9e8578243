//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these wrappers mirror their JSON
//! shape so the generated document stays accurate without coupling the
//! domain to utoipa.

use serde::Serialize;
use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(Serialize, ToSchema)]
#[schema(as = ErrorCode)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// An unexpected error occurred on the server or in the store.
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(Serialize, ToSchema)]
#[schema(as = Error)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Human-readable message.
    #[schema(example = "Email already exists")]
    error: String,
    /// Stable machine-readable error code.
    code: ErrorCodeSchema,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "6f1c2d3e-4a5b-4c6d-8e7f-0a1b2c3d4e5f")]
    trace_id: Option<String>,
    /// Field-level context for validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Gender`].
#[derive(Serialize, ToSchema)]
#[schema(as = Gender)]
pub enum GenderSchema {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Shown as "Prefer not to say" in the web form.
    Other,
}

/// OpenAPI schema for [`crate::domain::Student`].
#[derive(Serialize, ToSchema)]
#[schema(as = Student)]
pub struct StudentSchema {
    /// Identifier assigned on creation.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Student's name.
    #[schema(example = "Ann")]
    name: String,
    /// Email address, unique across students.
    #[schema(example = "a@x.com")]
    email: String,
    /// Phone number.
    #[schema(example = "07700 900123")]
    phone: String,
    /// Recorded gender.
    gender: GenderSchema,
}
