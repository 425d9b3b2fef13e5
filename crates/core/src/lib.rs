//! Reclaim Core - Shared types library.
//!
//! This crate provides common types used across the Reclaim components:
//! - `server` - The lost & found HTTP API
//! - `integration-tests` - End-to-end test harness
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and item types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
