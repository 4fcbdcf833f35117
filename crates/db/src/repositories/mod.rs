//! Repositories issuing the SQL for each table.
//!
//! Reads run directly on the pool. Writes take a connection so the store can
//! group several of them into one transaction.

pub mod category_repo;
pub mod note_repo;
pub mod tag_repo;

pub use category_repo::CategoryRepo;
pub use note_repo::NoteRepo;
pub use tag_repo::TagRepo;
