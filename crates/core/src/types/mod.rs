//! Core types for Reclaim.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod item_type;

pub use email::{Email, EmailError};
pub use id::*;
pub use item_type::{ItemType, ItemTypeError};
