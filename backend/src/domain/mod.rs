//! Domain primitives, ports and services.
//!
//! Purpose: define the student record, the errors adapters translate into
//! their own protocols, and the service enforcing email uniqueness. Nothing in
//! here knows about HTTP, SQL or PostgREST.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Student, StudentId, NewStudent, Gender: the record model.
//! - StudentService: implements the driving ports in [`ports`].
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod student;
pub mod student_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::student::{Gender, NewStudent, Student, StudentId, StudentValidationError};
pub use self::student_service::StudentService;
pub use self::trace_id::TraceId;
