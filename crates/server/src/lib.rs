//! Reclaim server library.
//!
//! This crate provides the lost & found registry as a library, allowing the
//! full router to be built in integration tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
