use std::fmt::Display;

use crate::api::types::{
    ActionResponse, ContractorProfile, Job, JobFilters, Quote, QuoteSubmission, UploadResponse,
};
use crate::core::error::ApiResult;
use crate::core::multipart::{MultipartUpload, UploadableFile};
use crate::core::transport::ApiClient;

/// Contractor and handyman side of the marketplace.
pub struct ContractorApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl ContractorApi<'_> {
    pub async fn get_available_jobs(&self, filters: &JobFilters) -> ApiResult<Vec<Job>> {
        self.client
            .get_with_query("/contractor/jobs/available", filters)
            .await
    }

    pub async fn get_my_jobs(&self) -> ApiResult<Vec<Job>> {
        self.client.get("/contractor/jobs").await
    }

    pub async fn accept_job(&self, job_id: impl Display) -> ApiResult<Option<ActionResponse>> {
        self.client
            .post_empty(&format!("/contractor/jobs/{}/accept", job_id))
            .await
    }

    pub async fn submit_quote(
        &self,
        job_id: impl Display,
        quote: &QuoteSubmission,
    ) -> ApiResult<Quote> {
        self.client
            .post(&format!("/contractor/jobs/{}/quote", job_id), quote)
            .await
    }

    pub async fn complete_job(
        &self,
        job_id: impl Display,
    ) -> ApiResult<Option<ActionResponse>> {
        self.client
            .post_empty(&format!("/contractor/jobs/{}/complete", job_id))
            .await
    }

    pub async fn get_profile(&self) -> ApiResult<ContractorProfile> {
        self.client.get("/contractor/profile").await
    }

    pub async fn update_profile(&self, profile: &ContractorProfile) -> ApiResult<ContractorProfile> {
        self.client.put("/contractor/profile", profile).await
    }

    /// Licence, insurance certificate and similar verification documents.
    pub async fn upload_document(
        &self,
        file: UploadableFile,
        document_type: &str,
    ) -> ApiResult<UploadResponse> {
        let upload = MultipartUpload::new(file).field("document_type", document_type);
        self.client
            .upload("/contractor/photos/document", upload)
            .await
    }
}
