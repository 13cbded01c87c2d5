//! Common types, protocol definitions, and errors shared by the user-record API and its client.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
