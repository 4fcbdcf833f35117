//! Application services for NoteMaster.
//!
//! [`NoteService`] orchestrates entity construction, mutation and
//! persistence over a [`NoteStore`](notemaster_core::store::NoteStore), and
//! reports every outcome through the operation-result envelope.

pub mod note_service;

pub use note_service::NoteService;
