//! # nearby-service
//!
//! Application layer: proximity evaluation, location posting, follows,
//! interactions, places and notifications, plus the request/response DTOs.

pub mod dto;
pub mod services;

pub use services::{
    InteractionService, LocationService, NotificationService, PlaceService, ProximityEvaluator,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};

#[cfg(test)]
pub(crate) mod test_support;
