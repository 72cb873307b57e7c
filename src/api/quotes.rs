use std::fmt::Display;

use crate::api::types::{Quote, QuoteDecision, QuoteRequest, StatusFilter, UploadResponse};
use crate::core::error::ApiResult;
use crate::core::multipart::{MultipartUpload, UploadableFile};
use crate::core::transport::ApiClient;

pub struct QuotesApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl QuotesApi<'_> {
    pub async fn request_quote(&self, request: &QuoteRequest) -> ApiResult<Quote> {
        self.client.post("/quotes/request", request).await
    }

    pub async fn get_quotes(&self, status: Option<&str>) -> ApiResult<Vec<Quote>> {
        self.client
            .get_with_query("/quotes", &StatusFilter::new(status))
            .await
    }

    pub async fn get_quote(&self, quote_id: impl Display) -> ApiResult<Quote> {
        self.client.get(&format!("/quotes/{}", quote_id)).await
    }

    pub async fn accept_quote(&self, quote_id: impl Display) -> ApiResult<Quote> {
        self.client
            .post(&format!("/quotes/{}/accept", quote_id), &QuoteDecision::default())
            .await
    }

    pub async fn reject_quote(
        &self,
        quote_id: impl Display,
        reason: Option<&str>,
    ) -> ApiResult<Quote> {
        let decision = QuoteDecision {
            reason: reason.map(String::from),
        };
        self.client
            .post(&format!("/quotes/{}/reject", quote_id), &decision)
            .await
    }

    /// Uploads a photo as soon as it is picked, before the quote request that
    /// will reference it exists.
    pub async fn upload_photo_immediate(
        &self,
        file: UploadableFile,
        customer_id: &str,
    ) -> ApiResult<UploadResponse> {
        let upload = MultipartUpload::new(file).field("customer_id", customer_id);
        self.client.upload("/photos/upload", upload).await
    }
}
