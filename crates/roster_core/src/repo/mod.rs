//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the persistence gateway contracts consumed by services.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repositories never validate business rules; services do that before
//!   any write reaches this layer.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod player_repo;
pub mod team_repo;
