//! Value objects - Immutable objects defined by their attributes

mod names;
mod ownership;

pub use names::{DisplayName, UNNAMED_CHARACTER};
pub use ownership::{Ownership, OwnershipLevel};
