use crate::api::types::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse, User};
use crate::core::error::ApiResult;
use crate::core::transport::ApiClient;

pub struct AuthApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl AuthApi<'_> {
    /// Stores the returned access token on success. The refresh token is
    /// handed back to the caller and never exchanged here.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<TokenResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let tokens: TokenResponse = self.client.post("/auth/login", &body).await?;
        self.client.set_auth_token(tokens.access_token.clone());
        tracing::info!("logged in as {}", email);
        Ok(tokens)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterResponse> {
        let response: RegisterResponse = self.client.post("/auth/register", request).await?;
        if let Some(token) = &response.access_token {
            self.client.set_auth_token(token.clone());
            tracing::info!("registered and logged in as {}", request.email);
        }
        Ok(response)
    }

    pub async fn get_current_user(&self) -> ApiResult<User> {
        self.client.get("/auth/me").await
    }

    /// Local only: the backend keeps no session to end.
    pub fn logout(&self) {
        self.client.clear_auth_token();
        tracing::info!("logged out");
    }
}
