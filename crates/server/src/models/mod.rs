//! Domain types.
//!
//! These types represent validated domain objects separate from database row
//! types and from request/response shapes.

pub mod account;
pub mod item;

pub use account::{Account, AccountProfile};
pub use item::{Item, ItemView};
