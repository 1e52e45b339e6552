use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that binds a request body to its endpoint and raw response type.
///
/// Only single-endpoint operations live here; reads that walk a fallback
/// chain are described in the client's resource modules instead.
pub trait ApiRequest: Serialize {
    /// Raw response payload. Normalization into canonical records happens in the client.
    type Response: DeserializeOwned;
    /// The URL path relative to the API base address.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Request Definitions
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {}

impl ApiRequest for LogoutRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/auth/logout";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ApiRequest for ChangePasswordRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/auth/change-password";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Commit a (course, teacher, slot) choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSelectionRequest {
    pub course_id: String,
    pub teacher_id: String,
    pub slot_id: String,
}

impl ApiRequest for CreateSelectionRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/student-courses/select";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthRequest;

impl ApiRequest for HealthRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/health";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugInfoRequest;

impl ApiRequest for DebugInfoRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/debug/info";
    const METHOD: HttpMethod = HttpMethod::Get;
}
