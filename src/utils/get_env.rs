use anyhow::{Error, anyhow};
use dotenv::dotenv;
use std::env;

pub fn get_env_var(key: &str) -> Result<String, Error> {
    dotenv().ok();
    env::var(key).map_err(|e| anyhow!("{}: {}", key, e))
}

pub fn get_optional_env_var(key: &str) -> Option<String> {
    dotenv().ok();
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().to_string()),
        _ => None,
    }
}

pub fn env_var_to_secs(key: &str, default: u64) -> Result<u64, Error> {
    match get_optional_env_var(key) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| anyhow!("{} must be a whole number of seconds: {}", key, e)),
        None => Ok(default),
    }
}
