//! Driving port for changing the registry.

use async_trait::async_trait;

use crate::domain::{Error, NewStudent, Student, StudentId};

/// Message returned when an email already belongs to another student.
pub const EMAIL_ALREADY_EXISTS: &str = "Email already exists";

/// Store-side message returned when an update matches no row.
pub const NO_STUDENT_ROW_MATCHED: &str = "no student row matched the id";

/// Use-case port for creating, updating and deleting students.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsCommand: Send + Sync {
    /// Register a student.
    ///
    /// Fails with [`crate::domain::ErrorCode::InvalidRequest`] and
    /// [`EMAIL_ALREADY_EXISTS`] when the email is taken.
    async fn create_student(&self, student: NewStudent) -> Result<Student, Error>;

    /// Replace every field of an existing student except its id.
    ///
    /// Fails with [`EMAIL_ALREADY_EXISTS`] when another student holds the
    /// email, and with [`crate::domain::ErrorCode::InternalError`] and
    /// [`NO_STUDENT_ROW_MATCHED`] when the id is unknown.
    async fn update_student(&self, student: Student) -> Result<Student, Error>;

    /// Remove a student. Deleting an unknown id succeeds.
    async fn delete_student(&self, id: &StudentId) -> Result<(), Error>;
}
