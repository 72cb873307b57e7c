pub const API_PATH_PREFIX: &str = "/api";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;

// upload helper fallbacks when the picker hands over no metadata
pub const DEFAULT_UPLOAD_MIME: &str = "image/jpeg";
pub const DEFAULT_UPLOAD_FILENAME: &str = "photo.jpg";
pub const UPLOAD_FILE_FIELD: &str = "file";

pub const RECOGNIZED_URI_SCHEMES: [&str; 3] = ["file://", "http://", "https://"];

pub const ENV_API_URL: &str = "SERVICEHUB_API_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "SERVICEHUB_REQUEST_TIMEOUT_SECS";
pub const ENV_UPLOAD_TIMEOUT: &str = "SERVICEHUB_UPLOAD_TIMEOUT_SECS";
pub const ENV_LOGIN_EMAIL: &str = "SERVICEHUB_EMAIL";
pub const ENV_LOGIN_PASSWORD: &str = "SERVICEHUB_PASSWORD";
