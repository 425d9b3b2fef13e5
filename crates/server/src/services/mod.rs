//! Business logic services.

pub mod auth;
pub mod items;
pub mod uploads;

pub use auth::{AuthError, AuthService};
pub use items::{CreateItem, ItemError, ItemService};
pub use uploads::{ImageStore, UploadError};
