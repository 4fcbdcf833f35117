//! Server-rendered NoteMaster site.
//!
//! Pages are rendered with minijinja from embedded templates. All data goes
//! through [`NoteApiClient`](client::NoteApiClient), a typed proxy over the
//! REST API; the site has no storage of its own.

pub mod client;
pub mod config;
pub mod error;
pub mod site;
pub mod templates;
