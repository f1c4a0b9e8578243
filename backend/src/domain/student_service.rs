//! Student registry domain service.
//!
//! Implements the driving ports on top of a [`StudentRepository`]. The only
//! rule enforced here is email uniqueness, checked with a read before each
//! write. The check and the write are separate store calls, so two concurrent
//! writers can both pass it. An update that matches no row is a store failure,
//! as a single-row update against the record store would report it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    EMAIL_ALREADY_EXISTS, NO_STUDENT_ROW_MATCHED, StudentPersistenceError, StudentRepository,
    StudentsCommand, StudentsQuery,
};
use crate::domain::{Error, NewStudent, Student, StudentId};

/// Service implementing [`StudentsQuery`] and [`StudentsCommand`].
pub struct StudentService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for StudentService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> StudentService<R> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

/// Store failures surface as internal errors carrying the store's message.
fn map_persistence_error(error: StudentPersistenceError) -> Error {
    debug!(%error, "student store call failed");
    Error::internal(error.store_message())
}

fn email_taken() -> Error {
    Error::invalid_request(EMAIL_ALREADY_EXISTS).with_details(serde_json::json!({
        "field": "email",
        "code": "duplicate_email",
    }))
}

#[async_trait]
impl<R> StudentsQuery for StudentService<R>
where
    R: StudentRepository + ?Sized,
{
    async fn list_students(&self) -> Result<Vec<Student>, Error> {
        self.repository.list().await.map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R> StudentsCommand for StudentService<R>
where
    R: StudentRepository + ?Sized,
{
    async fn create_student(&self, student: NewStudent) -> Result<Student, Error> {
        let existing = self
            .repository
            .find_by_email(student.email())
            .await
            .map_err(map_persistence_error)?;
        if existing.is_some() {
            return Err(email_taken());
        }

        let created = self
            .repository
            .insert(&student)
            .await
            .map_err(map_persistence_error)?;
        info!(student_id = %created.id(), "student created");
        Ok(created)
    }

    async fn update_student(&self, student: Student) -> Result<Student, Error> {
        let owner = self
            .repository
            .find_by_email_excluding(student.email(), student.id())
            .await
            .map_err(map_persistence_error)?;
        if owner.is_some() {
            return Err(email_taken());
        }

        let updated = self
            .repository
            .update(&student)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| {
                debug!(student_id = %student.id(), "update matched no student row");
                Error::internal(NO_STUDENT_ROW_MATCHED)
            })?;
        info!(student_id = %updated.id(), "student updated");
        Ok(updated)
    }

    async fn delete_student(&self, id: &StudentId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        info!(student_id = %id, removed, "student delete handled");
        Ok(())
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
