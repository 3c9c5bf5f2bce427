use crate::api::{ApiClient, ApiError, ApiResponse};
use crate::models::{
    AuthResponse, LoginRequest, PasswordResetConfirm, PasswordResetRequest, RegisterRequest,
};
use serde_json::json;

/// Authentication endpoints
///
/// Stateless: persisting the returned token is the session store's job.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<ApiResponse<AuthResponse>, ApiError> {
        self.api.post("/auth/login", credentials).await?.decode()
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<ApiResponse<AuthResponse>, ApiError> {
        self.api.post("/auth/register", payload).await?.decode()
    }

    pub async fn logout(&self) -> Result<ApiResponse, ApiError> {
        self.api.post("/auth/logout", &json!({})).await
    }

    /// Ask the backend to e-mail a reset link
    pub async fn request_password_reset(&self, request: &PasswordResetRequest) -> Result<ApiResponse, ApiError> {
        self.api.post("/auth/reset-password/request", request).await
    }

    pub async fn confirm_password_reset(&self, confirm: &PasswordResetConfirm) -> Result<ApiResponse, ApiError> {
        self.api.post("/auth/reset-password/confirm", confirm).await
    }
}
