pub mod categories;
pub mod notes;
pub mod tags;
