//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - Eviction sweep: removes cache entries older than the TTL at configured
//!   intervals

mod sweep;

pub use sweep::spawn_sweep_task;
