//! Domain façades over the transport.
//!
//! Each façade is a borrowed view of an [`ApiClient`] that maps one semantic
//! operation onto one fixed verb, path and payload shape of the backend's REST
//! contract. Façades do no validation, caching or retries, and hand transport
//! errors back unchanged.

use crate::core::transport::ApiClient;

pub mod admin;
pub mod auth;
pub mod contractor;
pub mod health;
pub mod jobs;
pub mod profile;
pub mod quotes;
pub mod types;
pub mod warranties;

pub use self::{
    admin::AdminApi, auth::AuthApi, contractor::ContractorApi, health::HealthApi, jobs::JobsApi,
    profile::ProfileApi, quotes::QuotesApi, warranties::WarrantiesApi,
};

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    pub fn jobs(&self) -> JobsApi<'_> {
        JobsApi { client: self }
    }

    pub fn contractor(&self) -> ContractorApi<'_> {
        ContractorApi { client: self }
    }

    pub fn quotes(&self) -> QuotesApi<'_> {
        QuotesApi { client: self }
    }

    pub fn profile(&self) -> ProfileApi<'_> {
        ProfileApi { client: self }
    }

    pub fn warranties(&self) -> WarrantiesApi<'_> {
        WarrantiesApi { client: self }
    }

    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi { client: self }
    }

    pub fn health(&self) -> HealthApi<'_> {
        HealthApi { client: self }
    }
}
