use crate::api::types::{ProfileUpdate, User};
use crate::core::error::ApiResult;
use crate::core::transport::ApiClient;

pub struct ProfileApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl ProfileApi<'_> {
    pub async fn get_profile(&self) -> ApiResult<User> {
        self.client.get("/profile").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<User> {
        self.client.put("/profile", update).await
    }
}
