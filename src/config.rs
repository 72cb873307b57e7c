use anyhow::{Error, anyhow};
use std::time::Duration;
use url::Url;

use crate::utils::constants::{
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_UPLOAD_TIMEOUT_SECS, ENV_API_URL, ENV_REQUEST_TIMEOUT,
    ENV_UPLOAD_TIMEOUT,
};
use crate::utils::get_env::{env_var_to_secs, get_env_var};
use crate::utils::urls::{api_root, to_url};

/// Settings the transport is configured with once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
    pub upload_timeout: Duration,
    /// Drop the stored token when the backend answers 401.
    pub clear_token_on_unauthorized: bool,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
            clear_token_on_unauthorized: true,
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, Error> {
        let url = to_url(base_url).map_err(|e| anyhow!("invalid base url {}: {}", base_url, e))?;
        match url.scheme() {
            "http" | "https" => Ok(Self::new(url)),
            other => Err(anyhow!("unsupported base url scheme: {}", other)),
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        let base_url = get_env_var(ENV_API_URL)?;
        let request_secs = env_var_to_secs(ENV_REQUEST_TIMEOUT, DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let upload_secs = env_var_to_secs(ENV_UPLOAD_TIMEOUT, DEFAULT_UPLOAD_TIMEOUT_SECS)?;

        Ok(Self::parse(&base_url)?
            .request_timeout(Duration::from_secs(request_secs))
            .upload_timeout(Duration::from_secs(upload_secs)))
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    pub fn clear_token_on_unauthorized(mut self, clear: bool) -> Self {
        self.clear_token_on_unauthorized = clear;
        self
    }

    pub fn api_root(&self) -> String {
        api_root(&self.base_url)
    }
}
