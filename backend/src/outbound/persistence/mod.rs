//! PostgreSQL persistence through Diesel and `diesel-async`.
//!
//! The pool and repository are the only public items; row structs and the
//! table definition stay private to the adapter.

mod diesel_error_mapping;
mod diesel_student_repository;
mod models;
mod pool;
mod schema;

pub use diesel_student_repository::DieselStudentRepository;
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, DbPool, PoolConfig, PoolError,
};
