//! Driving port for reading the registry.
//!
//! Inbound adapters (the JSON API and the server-rendered page) depend on this
//! trait rather than on the repository so store errors are already mapped to
//! domain errors when they arrive.

use async_trait::async_trait;

use crate::domain::{Error, Student};

/// Use-case port for listing students.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsQuery: Send + Sync {
    /// Every registered student, unfiltered.
    async fn list_students(&self) -> Result<Vec<Student>, Error>;
}
