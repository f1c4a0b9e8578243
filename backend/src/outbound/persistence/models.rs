//! Diesel row structs for the `students` table.
//!
//! These stay inside the persistence adapter; the repository converts them to
//! and from domain types.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::students;

/// Row read from `students`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
}

/// Row written on insert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub gender: &'a str,
}

/// Changeset replacing every mutable column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub gender: &'a str,
}
