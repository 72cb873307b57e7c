//! Local axum server for exercising the client over real HTTP.
//!
//! Every request is recorded before it reaches the route, so tests can assert
//! on headers and bodies even when the handler never answers. Unrouted paths
//! answer `200 {}`.

use axum::body::Body;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;

#[derive(Debug, Clone)]
pub struct FormFile {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub json: Option<Value>,
    pub form_fields: HashMap<String, String>,
    pub form_files: HashMap<String, FormFile>,
}

type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

pub struct TestServer {
    pub addr: SocketAddr,
    log: RequestLog,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(router: Router) -> Self {
        let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let app = router
            .fallback(|| async { Json(json!({})) })
            .layer(middleware::from_fn_with_state(log.clone(), record));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, log, handle }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::parse(&format!("http://{}", self.addr)).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Last request seen on `path`.
pub fn recorded(server: &TestServer, path: &str) -> RecordedRequest {
    server
        .requests()
        .into_iter()
        .rev()
        .find(|r| r.path == path)
        .unwrap_or_else(|| panic!("no request recorded for {}", path))
}

async fn record(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    let header = |name: axum::http::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    let mut entry = RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(String::from),
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        ..Default::default()
    };

    match entry.content_type.clone() {
        Some(ct) if ct.starts_with("multipart/form-data") => {
            read_form(&mut entry, &ct, bytes.clone()).await;
        }
        _ if !bytes.is_empty() => entry.json = serde_json::from_slice(&bytes).ok(),
        _ => {}
    }

    log.lock().unwrap().push(entry);
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

async fn read_form(entry: &mut RecordedRequest, content_type: &str, bytes: bytes::Bytes) {
    let request = axum::http::Request::builder()
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .unwrap();
    let Ok(mut multipart) = Multipart::from_request(request, &()).await else {
        return;
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(String::from) {
            Some(file_name) => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                let size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
                entry.form_files.insert(
                    name,
                    FormFile {
                        file_name,
                        content_type,
                        size,
                    },
                );
            }
            None => {
                let text = field.text().await.unwrap_or_default();
                entry.form_fields.insert(name, text);
            }
        }
    }
}
