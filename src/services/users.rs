use super::item_path;
use super::types::UserFilters;
use crate::api::{ApiClient, ApiError, ApiResponse};
use crate::models::{Page, PasswordChange, ProfileUpdate, User};
use tracing::info;

const USERS: &str = "/users";

/// Personal cabinet and admin user management
#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Account behind the stored token
    pub async fn me(&self) -> Result<ApiResponse<User>, ApiError> {
        self.api.get("/users/me").await?.decode()
    }

    pub async fn update_me(&self, update: &ProfileUpdate) -> Result<ApiResponse<User>, ApiError> {
        self.api.put("/users/me", update).await?.decode()
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<ApiResponse, ApiError> {
        self.api.put("/users/me/password", change).await
    }

    pub async fn list(&self, filters: &UserFilters) -> Result<ApiResponse<Page<User>>, ApiError> {
        self.api.get(&filters.to_query().apply(USERS)).await?.decode()
    }

    pub async fn delete(&self, id: &str) -> Result<ApiResponse, ApiError> {
        info!("Deleting user {}", id);
        self.api.delete(&item_path(USERS, id)).await
    }
}
