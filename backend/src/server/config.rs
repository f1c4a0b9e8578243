//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use student_registry::domain::ports::StudentRepository;

/// Everything [`super::create_server`] needs once settings are resolved.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repository: Arc<dyn StudentRepository>,
}

impl ServerConfig {
    /// Serve `repository` on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, repository: Arc<dyn StudentRepository>) -> Self {
        Self {
            bind_addr,
            repository,
        }
    }
}
