//! # Profile Isolation
//!
//! Sandboxes the configuration server's changes in a dedicated host profile
//! and restores the user's profile afterwards.
//!
//! This crate provides:
//! - `ProfileIsolation`, the Normal/Isolated state machine
//! - `MemoryHost`, an in-process `ConfigHost` used by the standalone binary
//!   and by tests

pub mod isolation;
pub mod memory;

pub use isolation::{IsolationState, ProfileIsolation};
pub use memory::{BASE_PROFILE, MemoryHost};
