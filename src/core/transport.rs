use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::core::auth::AuthContext;
use crate::core::error::{ApiError, ApiResult};
use crate::core::multipart::MultipartUpload;
use crate::utils::urls::join_path;

/// Single point of configuration for every backend call.
///
/// Cheap to clone: the underlying `reqwest::Client` and the `AuthContext` are
/// both reference counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    api_root: String,
    auth: AuthContext,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        Self::with_auth(config, AuthContext::new())
    }

    pub fn with_auth(config: ClientConfig, auth: AuthContext) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        let api_root = config.api_root();
        tracing::debug!("api client configured for {}", api_root);

        Ok(Self {
            http,
            api_root,
            auth,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn auth_context(&self) -> &AuthContext {
        &self.auth
    }

    pub fn set_auth_token(&self, token: impl Into<String>) {
        self.auth.set_token(token);
    }

    pub fn clear_auth_token(&self) {
        self.auth.clear();
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// POST without a request body, for action endpoints like `/accept`.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::POST, path)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// Multipart POST with the longer upload timeout. The form sets its own
    /// `multipart/form-data` content type, overriding the JSON default.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        upload: MultipartUpload,
    ) -> ApiResult<T> {
        let file_name = upload.file.name_or_default().to_string();
        let form = upload.into_form(&self.http).await?;
        tracing::debug!("uploading {} to {}", file_name, path);

        let builder = self
            .request(Method::POST, path)
            .timeout(self.config.upload_timeout)
            .multipart(form);
        self.send(builder).await
    }

    // Authorization is attached here, once, when the request is built.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = join_path(&self.api_root, path);
        let bearer = self.auth.bearer();
        tracing::debug!(%method, %url, authenticated = bearer.is_some(), "api request");

        let builder = self
            .http
            .request(method, url)
            .timeout(self.config.request_timeout);
        match bearer {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = builder.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::Network)?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body).into_owned();
            tracing::debug!("api error {}: {}", status, text);
            let error = ApiError::from_status(status, text);
            if self.config.clear_token_on_unauthorized {
                self.auth.observe_error(&error);
            }
            return Err(error);
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::multipart::UploadableFile;
    use crate::utils::test_server::{TestServer, recorded};
    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use serde_json::{Value, json};
    use std::time::Duration;

    fn client_for(server: &TestServer) -> ApiClient {
        ApiClient::new(server.config()).unwrap()
    }

    #[tokio::test]
    async fn test_bearer_header_follows_latest_token() {
        let server = TestServer::start(Router::new()).await;
        let client = client_for(&server);

        let _: Value = client.get("/auth/me").await.unwrap();
        client.set_auth_token("first");
        let _: Value = client.get("/auth/me").await.unwrap();
        client.set_auth_token("second");
        let _: Value = client.get("/auth/me").await.unwrap();
        client.clear_auth_token();
        let _: Value = client.get("/auth/me").await.unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].authorization, None);
        assert_eq!(requests[1].authorization.as_deref(), Some("Bearer first"));
        assert_eq!(requests[2].authorization.as_deref(), Some("Bearer second"));
        assert_eq!(requests[3].authorization, None);
        assert!(requests.iter().all(|r| r.path == "/api/auth/me"));
    }

    #[tokio::test]
    async fn test_401_clears_token_for_next_request() {
        let router = Router::new().route(
            "/api/auth/me",
            get(|| async { (StatusCode::UNAUTHORIZED, "token expired") }),
        );
        let server = TestServer::start(router).await;
        let client = client_for(&server);
        client.set_auth_token("stale");

        let err = client.get::<Value>("/auth/me").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
        assert_eq!(err.body(), Some("token expired"));
        assert!(!client.auth_context().is_authenticated());

        let _ = client.get::<Value>("/auth/me").await;
        let requests = server.requests();
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer stale"));
        assert_eq!(requests[1].authorization, None);
    }

    #[tokio::test]
    async fn test_401_keeps_token_when_disabled() {
        let router = Router::new().route(
            "/api/auth/me",
            get(|| async { StatusCode::UNAUTHORIZED }),
        );
        let server = TestServer::start(router).await;
        let client =
            ApiClient::new(server.config().clear_token_on_unauthorized(false)).unwrap();
        client.set_auth_token("kept");

        assert!(client.get::<Value>("/auth/me").await.unwrap_err().is_unauthorized());
        assert_eq!(client.auth_context().token().as_deref(), Some("kept"));
    }

    #[tokio::test]
    async fn test_non_2xx_becomes_http_error() {
        let router = Router::new().route(
            "/api/jobs",
            post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "{\"detail\":\"title required\"}") }),
        );
        let server = TestServer::start(router).await;
        let client = client_for(&server);
        client.set_auth_token("t");

        match client.post::<_, Value>("/jobs", &json!({})).await {
            Err(ApiError::Http { status, body }) => {
                assert_eq!(status, reqwest::StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(body, "{\"detail\":\"title required\"}");
            }
            other => panic!("Expected ApiError::Http, got: {:?}", other),
        }
        // only 401 clears the token
        assert!(client.auth_context().is_authenticated());
    }

    #[tokio::test]
    async fn test_timeout_is_network_error_without_retry() {
        let router = Router::new().route(
            "/api/health",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({"status": "ok"}))
            }),
        );
        let server = TestServer::start(router).await;
        let client = ApiClient::new(
            server
                .config()
                .request_timeout(Duration::from_millis(200)),
        )
        .unwrap();

        let err = client.get::<Value>("/health").await.unwrap_err();
        assert!(err.is_network());
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let config = ClientConfig::parse("http://127.0.0.1:9").unwrap();
        let client = ApiClient::new(config).unwrap();
        let err = client.get::<Value>("/health").await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_json_defaults_and_empty_body() {
        let router = Router::new().route(
            "/api/jobs/7",
            axum::routing::delete(|| async { StatusCode::NO_CONTENT }),
        );
        let server = TestServer::start(router).await;
        let client = client_for(&server);

        let body: Option<Value> = client.delete("/jobs/7").await.unwrap();
        assert_eq!(body, None);
        let _: () = client.delete("/jobs/7").await.unwrap();

        let request = &server.requests()[0];
        assert_eq!(request.method, "DELETE");
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_decode_error_on_unexpected_body() {
        let router = Router::new().route("/api/health", get(|| async { "not json" }));
        let server = TestServer::start(router).await;
        let client = client_for(&server);

        let err = client.get::<Value>("/health").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_with_fields() {
        let server = TestServer::start(Router::new()).await;
        let client = client_for(&server);
        client.set_auth_token("uploader");

        let dir = std::env::temp_dir().join("servicehub-transport-test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("roof.jpg");
        std::fs::write(&path, b"roof-bytes").unwrap();

        let upload = MultipartUpload::new(UploadableFile::new(path.to_string_lossy().to_string()))
            .field("customer_id", "c-1");
        let _: Value = client.upload("/photos/upload", upload).await.unwrap();

        let request = recorded(&server, "/api/photos/upload");
        assert_eq!(request.method, "POST");
        assert_eq!(request.authorization.as_deref(), Some("Bearer uploader"));
        assert!(
            request
                .content_type
                .as_deref()
                .unwrap_or_default()
                .starts_with("multipart/form-data"),
            "unexpected content type: {:?}",
            request.content_type
        );
        assert_eq!(request.form_fields.get("customer_id").map(String::as_str), Some("c-1"));
        let file = request.form_files.get("file").unwrap();
        assert_eq!(file.file_name, "photo.jpg");
        assert_eq!(file.content_type, "image/jpeg");
        assert_eq!(file.size, b"roof-bytes".len());
    }

    #[tokio::test]
    async fn test_upload_uses_longer_timeout_than_json_calls() {
        let router = Router::new()
            .route(
                "/api/photos/upload",
                post(|| async {
                    tokio::time::sleep(Duration::from_millis(600)).await;
                    Json(json!({"url": "https://cdn/slow.jpg"}))
                }),
            )
            .route(
                "/api/health",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(600)).await;
                    Json(json!({"status": "ok"}))
                }),
            );
        let server = TestServer::start(router).await;
        let client = ApiClient::new(
            server
                .config()
                .request_timeout(Duration::from_millis(200))
                .upload_timeout(Duration::from_secs(5)),
        )
        .unwrap();

        let dir = std::env::temp_dir().join("servicehub-transport-timeout-test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("slow.jpg");
        std::fs::write(&path, b"slow-bytes").unwrap();

        let upload = MultipartUpload::new(UploadableFile::new(path.to_string_lossy().to_string()));
        let uploaded: Value = client.upload("/photos/upload", upload).await.unwrap();
        assert_eq!(uploaded["url"], "https://cdn/slow.jpg");

        let err = client.get::<Value>("/health").await.unwrap_err();
        assert!(err.is_timeout());
    }
}
