//! Student registry backend.
//!
//! Hexagonal layout: [`domain`] holds the record model, ports and service;
//! [`inbound`] adapts HTTP requests (JSON API and server-rendered page) onto
//! the driving ports; [`outbound`] implements the repository port against
//! PostgreSQL, PostgREST or memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
