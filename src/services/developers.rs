use super::item_path;
use super::traits::CatalogService;
use super::types::DeveloperFilters;
use crate::api::{ApiClient, ApiError, ApiResponse};
use crate::models::{Developer, Page};
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

const DEVELOPERS: &str = "/developers";

/// Developer profiles
#[derive(Clone)]
pub struct DeveloperService {
    api: ApiClient,
}

impl DeveloperService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create<T: Serialize + ?Sized + Sync>(&self, developer: &T) -> Result<ApiResponse<Developer>, ApiError> {
        info!("Creating developer");
        self.api.post(DEVELOPERS, developer).await?.decode()
    }

    pub async fn update<T: Serialize + ?Sized + Sync>(
        &self,
        id: &str,
        changes: &T,
    ) -> Result<ApiResponse<Developer>, ApiError> {
        info!("Updating developer {}", id);
        self.api.put(&item_path(DEVELOPERS, id), changes).await?.decode()
    }

    pub async fn delete(&self, id: &str) -> Result<ApiResponse, ApiError> {
        info!("Deleting developer {}", id);
        self.api.delete(&item_path(DEVELOPERS, id)).await
    }
}

#[async_trait]
impl CatalogService for DeveloperService {
    type Item = Developer;
    type Filters = DeveloperFilters;

    async fn list(&self, filters: &DeveloperFilters) -> Result<ApiResponse<Page<Developer>>, ApiError> {
        self.api.get(&filters.to_query().apply(DEVELOPERS)).await?.decode()
    }

    async fn get(&self, id: &str) -> Result<ApiResponse<Developer>, ApiError> {
        self.api.get(&item_path(DEVELOPERS, id)).await?.decode()
    }

    fn resource_name(&self) -> &'static str {
        "developers"
    }
}
