use std::fmt::Display;

use crate::api::types::{ActionResponse, Warranty, WarrantyClaim};
use crate::core::error::ApiResult;
use crate::core::transport::ApiClient;

pub struct WarrantiesApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl WarrantiesApi<'_> {
    pub async fn get_warranties(&self) -> ApiResult<Vec<Warranty>> {
        self.client.get("/warranties").await
    }

    pub async fn get_warranty(&self, warranty_id: impl Display) -> ApiResult<Warranty> {
        self.client
            .get(&format!("/warranties/{}", warranty_id))
            .await
    }

    pub async fn file_claim(
        &self,
        warranty_id: impl Display,
        claim: &WarrantyClaim,
    ) -> ApiResult<Option<ActionResponse>> {
        self.client
            .post(&format!("/warranties/{}/claims", warranty_id), claim)
            .await
    }
}
