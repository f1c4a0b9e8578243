//! Shared state for the HTTP and web adapters.
//!
//! Handlers receive this through `actix_web::web::Data` and only see the
//! driving ports, so they can be exercised without a store.

use std::sync::Arc;

use crate::domain::StudentService;
use crate::domain::ports::{StudentRepository, StudentsCommand, StudentsQuery};

/// Dependency bundle for handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Create, update and delete use cases.
    pub students: Arc<dyn StudentsCommand>,
    /// Listing use case.
    pub students_query: Arc<dyn StudentsQuery>,
}

impl HttpState {
    /// Bundle explicit port implementations.
    pub fn new(students: Arc<dyn StudentsCommand>, students_query: Arc<dyn StudentsQuery>) -> Self {
        Self {
            students,
            students_query,
        }
    }

    /// Wire both ports to a [`StudentService`] over `repository`.
    pub fn from_repository(repository: Arc<dyn StudentRepository>) -> Self {
        let service = Arc::new(StudentService::new(repository));
        Self::new(service.clone(), service)
    }
}
