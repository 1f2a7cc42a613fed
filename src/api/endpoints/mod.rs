//! API endpoint handlers.
//!
//! Handlers validate nothing themselves: the active source does, and its
//! errors convert into `ApiError`.

pub mod drugs;
pub mod health;
pub mod interactions;
pub mod resources;
