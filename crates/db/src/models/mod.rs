//! Row structs read from the note tables.
//!
//! Each submodule contains a plain `FromRow` struct per query shape and the
//! conversion into the matching domain entity.

pub mod category;
pub mod note;
pub mod tag;
