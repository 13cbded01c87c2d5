//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with the `/users` routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Render service errors as JSON bodies with matching status codes.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
