//! Builder Implementations
//!
//! The framework build output on disk, exposed through the Builder port.

mod kit;

pub use kit::{KitLayout, KitOutputBuilder};
