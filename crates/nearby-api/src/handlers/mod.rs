//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod health;
pub mod interactions;
pub mod locations;
pub mod notifications;
pub mod places;
pub mod users;
