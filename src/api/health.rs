use crate::api::types::HealthStatus;
use crate::core::error::ApiResult;
use crate::core::transport::ApiClient;

pub struct HealthApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl HealthApi<'_> {
    pub async fn check(&self) -> ApiResult<HealthStatus> {
        self.client.get("/health").await
    }
}
