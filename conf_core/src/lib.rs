//! # Configuration Server Core
//!
//! Shared types and traits for the configuration server.
//!
//! This crate provides:
//! - The configuration tree model (`ConfigTree`, `ConfigValue`, `Scalar`)
//! - The `ConfigHost` trait through which the host's profiles are reached
//! - The structural merge engine used to apply partial updates

pub mod merge;
pub mod traits;
pub mod types;

pub use merge::update;
pub use traits::ConfigHost;
pub use types::{ConfigTree, ConfigValue, Scalar};
