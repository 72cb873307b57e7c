use std::sync::{Arc, RwLock};

use crate::core::error::ApiError;

/// Bearer token shared between the transport and whoever logs in or out.
///
/// Cloning hands out another handle to the same slot. Requests read the token
/// once while they are being built, so a request already in flight keeps the
/// token it was sent with.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let ctx = Self::new();
        ctx.set_token(token);
        ctx
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.into());
    }

    pub fn clear(&self) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub(crate) fn bearer(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {}", token))
    }

    /// Response-error hook: a 401 drops the stored token. Returns whether it did.
    pub fn observe_error(&self, error: &ApiError) -> bool {
        if error.is_unauthorized() && self.is_authenticated() {
            self.clear();
            tracing::warn!("backend rejected the bearer token, cleared it");
            return true;
        }
        false
    }
}
