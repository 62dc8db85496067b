//! Request handlers.

pub mod health;
pub mod labels;
pub mod predict;
pub mod text_to_sign;

pub use health::*;
pub use labels::*;
pub use predict::*;
pub use text_to_sign::*;
