//! Outbound adapters implementing the student repository port.
//!
//! - **persistence**: PostgreSQL through Diesel and a `bb8` pool.
//! - **postgrest**: a hosted database's REST interface through `reqwest`.
//! - **memory**: a process-local table for development and tests.
//!
//! Adapters translate between domain types and store rows. They hold no
//! business rules; email uniqueness lives in the domain service.

pub mod memory;
pub mod persistence;
pub mod postgrest;
mod row_mapping;

pub use memory::InMemoryStudentRepository;
