//! Request validation helpers shared by the JSON API and the web pages.
//!
//! Every failure becomes an [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode)
//! error whose details name the field and a machine-readable reason.

use serde_json::json;

use crate::domain::{Error, Gender, NewStudent, StudentId, StudentValidationError};

/// Message returned when an update or delete omits the student id.
pub const ID_REQUIRED: &str = "ID is required";

/// Newtype wrapper for request field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Field carrying the student identifier.
pub(crate) const ID_FIELD: FieldName = FieldName::new("id");

pub(crate) fn id_required_error() -> Error {
    Error::invalid_request(ID_REQUIRED).with_details(json!({
        "field": ID_FIELD.as_str(),
        "code": "missing_field",
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_uuid",
    }))
}

/// Translate a domain validation failure into a request error.
pub(crate) fn student_validation_error(err: StudentValidationError) -> Error {
    let details = match &err {
        StudentValidationError::UnknownGender { value } => json!({
            "field": err.field(),
            "value": value,
            "code": err.code(),
        }),
        _ => json!({ "field": err.field(), "code": err.code() }),
    };
    Error::invalid_request(err.to_string()).with_details(details)
}

/// Parse an optional id, treating absent and blank values as missing.
pub(crate) fn parse_student_id(raw: Option<&str>) -> Result<StudentId, Error> {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty());
    let Some(raw) = raw else {
        return Err(id_required_error());
    };
    StudentId::new(raw).map_err(|_| invalid_uuid_error(ID_FIELD, raw))
}

/// Parse an id used to look up a stored row.
///
/// Absent and blank values are still missing, but text that is not a UUID
/// yields `None`: no stored student can carry it.
pub(crate) fn parse_lookup_id(raw: Option<&str>) -> Result<Option<StudentId>, Error> {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty());
    let Some(raw) = raw else {
        return Err(id_required_error());
    };
    Ok(StudentId::new(raw).ok())
}

/// Validate the mutable student fields as submitted.
pub(crate) fn parse_new_student(
    name: &str,
    email: &str,
    phone: &str,
    gender: &str,
) -> Result<NewStudent, Error> {
    let gender = gender
        .trim()
        .parse::<Gender>()
        .map_err(student_validation_error)?;
    NewStudent::try_new(name, email, phone, gender).map_err(student_validation_error)
}
