//! Error handling for LZ8 operations
//!
//! This module re-exports the error types defined alongside the shared
//! configuration in [`crate::common`].

pub use crate::common::Lz8Error;
pub use crate::common::Result;
