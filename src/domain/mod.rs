//! Domain layer - Settings records and the rules for changing them
//!
//! This layer contains:
//! - Entities: GlobalSettings (singleton) and ChatSettings (one per chat)
//! - Value Objects: chat identifiers and the optional-field patch contract

pub mod entities;
pub mod value_objects;
