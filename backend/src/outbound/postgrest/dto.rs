//! Wire types for PostgREST requests and responses.
//!
//! Responses are decoded into these DTOs first and converted into domain
//! students in one pass. Extra columns the hosted table may carry, such as
//! `created_at`, are ignored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{NewStudent, Student};
use crate::outbound::row_mapping::student_from_columns;

/// Columns requested on every read.
pub(super) const STUDENT_COLUMNS: &str = "id,name,email,phone,gender";

#[derive(Debug, Deserialize)]
pub(super) struct StudentRowDto {
    pub(super) id: Uuid,
    pub(super) name: String,
    pub(super) email: String,
    pub(super) phone: String,
    pub(super) gender: String,
}

impl StudentRowDto {
    pub(super) fn into_domain(self) -> Student {
        student_from_columns(self.id, self.name, self.email, self.phone, &self.gender)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct IdRowDto {
    pub(super) id: Uuid,
}

/// Body sent on insert and update; `id` is left to the table default.
#[derive(Debug, Serialize)]
pub(super) struct StudentWriteDto<'a> {
    pub(super) name: &'a str,
    pub(super) email: &'a str,
    pub(super) phone: &'a str,
    pub(super) gender: &'a str,
}

impl<'a> From<&'a NewStudent> for StudentWriteDto<'a> {
    fn from(value: &'a NewStudent) -> Self {
        Self {
            name: value.name(),
            email: value.email(),
            phone: value.phone(),
            gender: value.gender().as_str(),
        }
    }
}

/// Error body PostgREST returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(super) struct PostgrestErrorDto {
    pub(super) message: Option<String>,
    pub(super) code: Option<String>,
}
