//! NoteMaster REST API server library.
//!
//! Exposes configuration, state, error handling, extractors and routes so
//! integration tests and the binary entrypoint build the same application.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
