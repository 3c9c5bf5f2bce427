use super::item_path;
use super::traits::CatalogService;
use super::types::PromotionFilters;
use crate::api::{ApiClient, ApiError, ApiResponse};
use crate::models::{Page, Promotion};
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

const PROMOTIONS: &str = "/promotions";

#[derive(Clone)]
pub struct PromotionService {
    api: ApiClient,
}

impl PromotionService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create<T: Serialize + ?Sized + Sync>(&self, promotion: &T) -> Result<ApiResponse<Promotion>, ApiError> {
        info!("Creating promotion");
        self.api.post(PROMOTIONS, promotion).await?.decode()
    }

    pub async fn update<T: Serialize + ?Sized + Sync>(
        &self,
        id: &str,
        changes: &T,
    ) -> Result<ApiResponse<Promotion>, ApiError> {
        info!("Updating promotion {}", id);
        self.api.put(&item_path(PROMOTIONS, id), changes).await?.decode()
    }

    pub async fn delete(&self, id: &str) -> Result<ApiResponse, ApiError> {
        info!("Deleting promotion {}", id);
        self.api.delete(&item_path(PROMOTIONS, id)).await
    }
}

#[async_trait]
impl CatalogService for PromotionService {
    type Item = Promotion;
    type Filters = PromotionFilters;

    async fn list(&self, filters: &PromotionFilters) -> Result<ApiResponse<Page<Promotion>>, ApiError> {
        self.api.get(&filters.to_query().apply(PROMOTIONS)).await?.decode()
    }

    async fn get(&self, id: &str) -> Result<ApiResponse<Promotion>, ApiError> {
        self.api.get(&item_path(PROMOTIONS, id)).await?.decode()
    }

    fn resource_name(&self) -> &'static str {
        "promotions"
    }
}
