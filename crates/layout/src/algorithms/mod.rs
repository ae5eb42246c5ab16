//! The two passes of a pack layout.
//!
//! [`natural`] walks the tree bottom-up and works out how big every node wants to be.
//! [`pack`] walks it top-down, hands out the space each container actually has and writes
//! the resulting [`LayoutBox`](crate::LayoutBox) of every node.

pub mod distribute;
pub mod natural;
pub mod pack;

pub use distribute::{FlexClaim, apportion, distribute};
