//! Integration test utilities for the nearby server
//!
//! Spawns the full HTTP application on a local port and drives it with
//! `reqwest`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
