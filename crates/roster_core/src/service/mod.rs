//! Core use-case services.
//!
//! # Responsibility
//! - Validate input, delegate writes to repositories and keep the cache pool
//!   of each entity type in sync with storage.
//! - Answer list/filter/sort/statistics reads from the cache pool.
//!
//! # Invariants
//! - No repository write happens before validation passes.
//! - Every successful write is followed by a full synchronous cache refresh;
//!   failed writes never refresh.

pub mod dashboard;
pub mod error;
pub mod player_service;
pub mod sort;
pub mod team_service;
