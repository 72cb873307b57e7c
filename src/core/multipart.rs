//! Multipart bodies for photo and document uploads.
//!
//! Pickers on different platforms hand back local resource URIs in different
//! shapes (`file:///...`, bare `/var/...` paths, remote `https://` assets).
//! The helper normalizes them, substitutes safe defaults for missing metadata
//! and reads the bytes into a `reqwest` multipart form.

use bytes::Bytes;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::io;
use url::Url;

use crate::core::error::{ApiError, ApiResult};
use crate::utils::constants::{DEFAULT_UPLOAD_FILENAME, DEFAULT_UPLOAD_MIME, UPLOAD_FILE_FIELD};
use crate::utils::urls::has_recognized_scheme;

/// A local (or remote) resource the user picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadableFile {
    pub uri: String,
    pub mime_type: Option<String>,
    pub name: Option<String>,
}

impl UploadableFile {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: None,
            name: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn normalized_uri(&self) -> String {
        normalize_uri(&self.uri)
    }

    pub fn mime_or_default(&self) -> &str {
        self.mime_type
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_UPLOAD_MIME)
    }

    pub fn name_or_default(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_UPLOAD_FILENAME)
    }
}

/// Prefix `file://` unless the URI already carries a scheme we understand.
///
/// Bare paths must be absolute. A relative `photo.jpg` becomes
/// `file://photo.jpg`, whose `photo.jpg` parses as a host, and reading it
/// fails with [`ApiError::InvalidUri`].
pub fn normalize_uri(uri: &str) -> String {
    if has_recognized_scheme(uri) {
        uri.to_string()
    } else {
        format!("file://{}", uri)
    }
}

/// One upload: the file part plus any extra text fields.
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    pub file: UploadableFile,
    pub fields: Vec<(String, String)>,
}

impl MultipartUpload {
    pub fn new(file: UploadableFile) -> Self {
        Self {
            file,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Reads the file content and assembles the form. The same `Client` is used
    /// to fetch `http(s)` sources so they inherit the caller's settings.
    pub async fn into_form(self, http: &Client) -> ApiResult<Form> {
        let content = read_source(http, &self.file).await?;

        let part = Part::stream_with_length(content.clone(), content.len() as u64)
            .file_name(self.file.name_or_default().to_string())
            .mime_str(self.file.mime_or_default())
            .or_else(|_| {
                tracing::debug!(mime = ?self.file.mime_type, "unparseable mime type, using default");
                Part::stream_with_length(content.clone(), content.len() as u64)
                    .file_name(self.file.name_or_default().to_string())
                    .mime_str(DEFAULT_UPLOAD_MIME)
            })
            .map_err(ApiError::Client)?;

        let form = self
            .fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        Ok(form.part(UPLOAD_FILE_FIELD, part))
    }
}

async fn read_source(http: &Client, file: &UploadableFile) -> ApiResult<Bytes> {
    let uri = file.normalized_uri();
    let url = Url::parse(&uri).map_err(|e| ApiError::InvalidUri(format!("{}: {}", uri, e)))?;

    match url.scheme() {
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| ApiError::InvalidUri(uri.clone()))?;
            let data = tokio::fs::read(&path)
                .await
                .map_err(|source| ApiError::LocalFile {
                    uri: uri.clone(),
                    source,
                })?;
            tracing::debug!("read {} bytes from {}", data.len(), path.display());
            Ok(Bytes::from(data))
        }
        "http" | "https" => {
            let response = http.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::LocalFile {
                    uri,
                    source: io::Error::new(
                        io::ErrorKind::Other,
                        format!("source responded with {}", status),
                    ),
                });
            }
            Ok(response.bytes().await?)
        }
        other => Err(ApiError::InvalidUri(format!("unsupported scheme {}", other))),
    }
}
