//! PostgREST adapter for hosted record stores.

mod dto;
mod http_repository;

pub use http_repository::{PostgrestSetupError, PostgrestStudentRepository};
