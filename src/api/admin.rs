use std::fmt::Display;

use crate::api::types::{ActionResponse, AdminStats, RoleFilter, User, UserRole};
use crate::core::error::ApiResult;
use crate::core::transport::ApiClient;

/// Admin management endpoints. The backend rejects these for non-admin tokens.
pub struct AdminApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl AdminApi<'_> {
    pub async fn get_users(&self, role: Option<UserRole>) -> ApiResult<Vec<User>> {
        self.client
            .get_with_query("/admin/users", &RoleFilter { role })
            .await
    }

    pub async fn approve_contractor(
        &self,
        contractor_id: impl Display,
    ) -> ApiResult<Option<ActionResponse>> {
        self.client
            .post_empty(&format!("/admin/contractors/{}/approve", contractor_id))
            .await
    }

    pub async fn suspend_user(
        &self,
        user_id: impl Display,
    ) -> ApiResult<Option<ActionResponse>> {
        self.client
            .post_empty(&format!("/admin/users/{}/suspend", user_id))
            .await
    }

    pub async fn get_stats(&self) -> ApiResult<AdminStats> {
        self.client.get("/admin/stats").await
    }
}
