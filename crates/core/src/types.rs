/// All primary keys are random 128-bit UUIDs.
pub type DbId = uuid::Uuid;

/// Generate a fresh identifier for an entity that was created without one.
pub fn new_id() -> DbId {
    uuid::Uuid::new_v4()
}
