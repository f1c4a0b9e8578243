//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod student_repository;
mod students_command;
mod students_query;

#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentPersistenceError, StudentRepository};
#[cfg(test)]
pub use students_command::MockStudentsCommand;
pub use students_command::{EMAIL_ALREADY_EXISTS, NO_STUDENT_ROW_MATCHED, StudentsCommand};
#[cfg(test)]
pub use students_query::MockStudentsQuery;
pub use students_query::StudentsQuery;
