//! Builders turning resolved settings into a repository adapter.

use std::io;
use std::sync::Arc;

use tracing::{info, warn};

use student_registry::domain::ports::StudentRepository;
use student_registry::outbound::InMemoryStudentRepository;
use student_registry::outbound::persistence::{DbPool, DieselStudentRepository};
use student_registry::outbound::postgrest::PostgrestStudentRepository;
use student_registry::settings::StoreSelection;

/// Build the repository adapter chosen by the settings.
///
/// # Errors
/// Returns [`io::Error`] when the pool or HTTP client cannot be constructed.
pub async fn build_repository(store: StoreSelection) -> io::Result<Arc<dyn StudentRepository>> {
    match store {
        StoreSelection::Memory => {
            warn!("no record store configured; students are kept in memory");
            Ok(Arc::new(InMemoryStudentRepository::new()))
        }
        StoreSelection::Postgres(pool_config) => {
            info!(
                max_size = pool_config.max_size(),
                "connecting to PostgreSQL record store"
            );
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|err| io::Error::other(format!("database pool: {err}")))?;
            Ok(Arc::new(DieselStudentRepository::new(pool)))
        }
        StoreSelection::Postgrest {
            base_url,
            api_key,
            timeout,
        } => {
            info!(url = %base_url, "using PostgREST record store");
            let repository = PostgrestStudentRepository::new(base_url, api_key, timeout)
                .map_err(|err| io::Error::other(format!("PostgREST client: {err}")))?;
            Ok(Arc::new(repository))
        }
    }
}
