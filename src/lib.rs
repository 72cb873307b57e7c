pub mod api;
pub mod config;
pub mod core;
pub mod orchestrator;
pub mod utils;

pub use crate::config::ClientConfig;
pub use crate::core::auth::AuthContext;
pub use crate::core::error::{ApiError, ApiResult};
pub use crate::core::transport::ApiClient;
