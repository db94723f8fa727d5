//! Application layer - Use cases over the settings store
//!
//! This layer contains:
//! - DTOs: API request/response shapes
//! - Ports: interfaces the application requires from the store
//! - Services: validate, merge and persist settings updates
//! - Validation: per-field rules for update payloads

pub mod dto;
pub mod ports;
pub mod services;
pub mod validation;
