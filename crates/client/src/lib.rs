//! Client for the encrypted user-record API.
//!
//! [`UserClient`] issues the five `/users` calls and rewraps every failure
//! into a [`ClientError`] with a human-readable, per-operation message.
//! [`app::execute`] drives one user action and renders the resulting screen.

pub mod app;
pub mod client;
pub mod error;
pub mod prompt;
pub mod render;

#[cfg(test)]
mod testing;

pub use client::UserClient;
pub use error::{ClientError, Operation};
