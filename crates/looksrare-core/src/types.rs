//! Core domain types for LooksRare v2 maker orders.

pub mod enums;
pub mod maker;

pub use enums::*;
pub use maker::*;
