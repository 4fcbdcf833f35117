//! Domain core for NoteMaster: entities, commands, the operation-result
//! envelope, transport view models and the storage seam.

pub mod commands;
pub mod config;
pub mod entities;
pub mod error;
pub mod models;
pub mod result;
pub mod store;
pub mod types;
