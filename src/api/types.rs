use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Loosely-known records keep unrecognised backend fields in `extra` so newer
// server versions still decode.

#[derive(Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Contractor,
    Handyman,
    Admin,
}

#[derive(Serialize, Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RegisterResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub user: Option<User>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct User {
    pub id: Value,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Job {
    pub id: Value,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    /// Remote URLs returned by the photo upload endpoint.
    pub photos: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct StatusFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<String>,
}

impl StatusFilter {
    pub fn new(status: Option<&str>) -> Self {
        Self {
            status_filter: status.map(String::from),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct JobFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct QuoteRequest {
    pub service_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<String>,
    pub photos: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Quote {
    pub id: Value,
    pub status: Option<String>,
    pub service_type: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub job_id: Option<Value>,
    pub contractor_id: Option<Value>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct QuoteSubmission {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct QuoteDecision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ContractorProfile {
    pub id: Option<Value>,
    pub business_name: Option<String>,
    #[serde(default)]
    pub trades: Vec<String>,
    pub license_number: Option<String>,
    pub is_verified: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Warranty {
    pub id: Value,
    pub job_id: Option<Value>,
    pub status: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct WarrantyClaim {
    pub description: String,
    pub photos: Vec<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct RoleFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct AdminStats {
    pub total_users: Option<u64>,
    pub total_jobs: Option<u64>,
    pub pending_contractors: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Generic acknowledgement returned by action endpoints.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ActionResponse {
    pub message: Option<String>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UploadResponse {
    #[serde(alias = "photo_url", alias = "file_url")]
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}
