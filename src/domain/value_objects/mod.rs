//! Value objects - Immutable objects defined by their attributes

mod ids;
mod patch;

pub use ids::ChatId;
pub use patch::{merge, overlay, Patch};
