//! Team and player domain model.
//!
//! # Responsibility
//! - Define the persisted entity shapes shared by repositories and services.
//! - Define draft structs carrying every caller-editable field.
//!
//! # Invariants
//! - Identifiers are assigned by the store and are non-zero once persisted.
//! - Timestamps are store-assigned epoch milliseconds.

pub mod player;
pub mod team;

/// Common surface of persisted entities held by a cache pool.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable entity type name used in errors and log events.
    const KIND: &'static str;

    /// Store-assigned identifier.
    fn id(&self) -> i32;
}
