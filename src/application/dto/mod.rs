//! Data Transfer Objects - For API boundaries
//!
//! Update payloads are partial: every field is optional and only the present
//! ones are merged onto the stored record.

pub mod settings;

pub use settings::*;
