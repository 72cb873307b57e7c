pub mod auth;
pub mod error;
pub mod multipart;
pub mod transport;
