use std::future::Future;

use crate::core::error::ApiResult;
use crate::core::multipart::UploadableFile;
use crate::core::transport::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickSource {
    Camera,
    Library,
}

/// Platform image acquisition (camera capture or library selection).
pub trait ImagePicker: Send + Sync {
    /// Asks the user for up to `limit` images. `Ok(None)` means the user
    /// cancelled; the camera yields at most one image.
    fn pick(
        &self,
        source: PickSource,
        limit: usize,
    ) -> impl Future<Output = anyhow::Result<Option<Vec<UploadableFile>>>> + Send;
}

/// Sends one picked image to the backend and returns its remote URL.
pub trait PhotoUploader: Send + Sync {
    fn upload_photo(&self, file: UploadableFile) -> impl Future<Output = ApiResult<String>> + Send;
}

/// Uploads through `quotes.upload_photo_immediate` on behalf of one customer.
#[derive(Debug, Clone)]
pub struct CustomerPhotoUploader {
    client: ApiClient,
    customer_id: String,
}

impl CustomerPhotoUploader {
    pub fn new(client: ApiClient, customer_id: impl Into<String>) -> Self {
        Self {
            client,
            customer_id: customer_id.into(),
        }
    }
}

impl PhotoUploader for CustomerPhotoUploader {
    async fn upload_photo(&self, file: UploadableFile) -> ApiResult<String> {
        let response = self
            .client
            .quotes()
            .upload_photo_immediate(file, &self.customer_id)
            .await?;
        Ok(response.url)
    }
}
