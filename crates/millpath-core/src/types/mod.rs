//! Type aliases and callback utilities.
//!
//! ## Modules
//!
//! - [`aliases`]: progress/cancellation callbacks.

pub mod aliases;

pub use aliases::*;
