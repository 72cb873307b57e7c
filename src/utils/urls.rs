use url::{ParseError, Url};

use crate::utils::constants::{API_PATH_PREFIX, RECOGNIZED_URI_SCHEMES};

pub fn to_url(host: &str) -> Result<Url, ParseError> {
    Url::parse(host)
}

/// Root every request path hangs off: the base URL plus `/api`.
pub fn api_root(base: &Url) -> String {
    format!("{}{}", base.as_str().trim_end_matches('/'), API_PATH_PREFIX)
}

pub fn join_path(root: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", root, path)
    } else {
        format!("{}/{}", root, path)
    }
}

pub fn has_recognized_scheme(uri: &str) -> bool {
    RECOGNIZED_URI_SCHEMES
        .iter()
        .any(|scheme| uri.starts_with(scheme))
}
