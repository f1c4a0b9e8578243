//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The JSON API lives under [`http`]; the server-rendered pages under
//! [`web`] share its state and validation helpers.

pub mod http;
pub mod web;
