//! Client for the remote question answering service.
mod core;
pub use self::core::*;
