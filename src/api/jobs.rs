use std::fmt::Display;

use crate::api::types::{ActionResponse, Job, JobUpdate, NewJob, StatusFilter};
use crate::core::error::ApiResult;
use crate::core::transport::ApiClient;

/// Customer-side job requests.
pub struct JobsApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl JobsApi<'_> {
    pub async fn create_job(&self, job: &NewJob) -> ApiResult<Job> {
        self.client.post("/jobs", job).await
    }

    pub async fn get_jobs(&self, status: Option<&str>) -> ApiResult<Vec<Job>> {
        self.client
            .get_with_query("/jobs", &StatusFilter::new(status))
            .await
    }

    pub async fn get_job(&self, job_id: impl Display) -> ApiResult<Job> {
        self.client.get(&format!("/jobs/{}", job_id)).await
    }

    pub async fn update_job(&self, job_id: impl Display, update: &JobUpdate) -> ApiResult<Job> {
        self.client
            .patch(&format!("/jobs/{}", job_id), update)
            .await
    }

    pub async fn cancel_job(&self, job_id: impl Display) -> ApiResult<Option<ActionResponse>> {
        self.client.delete(&format!("/jobs/{}", job_id)).await
    }

    pub async fn approve_completion(
        &self,
        job_id: impl Display,
    ) -> ApiResult<Option<ActionResponse>> {
        self.client
            .post_empty(&format!("/jobs/{}/approve", job_id))
            .await
    }
}
