//! Shared utility helpers.

pub mod error;

pub use error::{DotFindError, DotFindResult};
