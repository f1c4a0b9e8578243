//! Translation of pool and Diesel failures into [`StudentPersistenceError`].
//!
//! Driver messages can leak SQL and connection details, so they are logged at
//! debug level and replaced with short fixed messages.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::StudentPersistenceError;

/// Pool failures mean the store is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> StudentPersistenceError {
    debug!(%error, "student store checkout failed");
    match error {
        PoolError::Checkout { .. } => {
            StudentPersistenceError::connection("database connection unavailable")
        }
        PoolError::Build { .. } => StudentPersistenceError::connection("database pool unavailable"),
    }
}

pub(crate) fn map_diesel_error(error: DieselError) -> StudentPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => StudentPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => StudentPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StudentPersistenceError::connection("database connection error")
        }
        _ => StudentPersistenceError::query("database error"),
    }
}
