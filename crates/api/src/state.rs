use std::sync::Arc;

use notemaster_services::NoteService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the service holds its store behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub config: Arc<ServerConfig>,
}
