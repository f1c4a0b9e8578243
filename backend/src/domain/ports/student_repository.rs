//! Port for the `students` record store.
//!
//! Adapters translate these calls into store queries: SQL through Diesel, a
//! PostgREST request, or operations on an in-memory table. None of them
//! enforce email uniqueness; the service checks it before writing.

use async_trait::async_trait;

use crate::domain::{NewStudent, Student, StudentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by student repository adapters.
    pub enum StudentPersistenceError {
        /// The store could not be reached.
        Connection { message: String } =>
            "student store connection failed: {message}",
        /// The store rejected or failed to execute a query.
        Query { message: String } =>
            "student store query failed: {message}",
    }
}

impl StudentPersistenceError {
    /// Message reported by the store, without the port prefix.
    pub fn store_message(&self) -> &str {
        match self {
            Self::Connection { message } | Self::Query { message } => message.as_str(),
        }
    }
}

/// Port for reading and writing student rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Every stored student. Ordering is whatever the store returns.
    async fn list(&self) -> Result<Vec<Student>, StudentPersistenceError>;

    /// Identifier of the student holding `email`, if any.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StudentId>, StudentPersistenceError>;

    /// Identifier of a student other than `excluding` holding `email`.
    async fn find_by_email_excluding(
        &self,
        email: &str,
        excluding: &StudentId,
    ) -> Result<Option<StudentId>, StudentPersistenceError>;

    /// Insert a draft and return the stored row with its assigned id.
    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentPersistenceError>;

    /// Replace every field except `id`.
    ///
    /// Returns `None` when no row carries the id.
    async fn update(&self, student: &Student) -> Result<Option<Student>, StudentPersistenceError>;

    /// Remove the row with `id`.
    ///
    /// Returns whether a row was removed; a miss is not an error.
    async fn delete(&self, id: &StudentId) -> Result<bool, StudentPersistenceError>;
}
