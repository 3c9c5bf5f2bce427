use crate::api::{ApiError, ApiResponse};
use crate::models::Page;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Common read surface of the browsable catalogs
///
/// Implemented by the property, developer and promotion services so callers
/// can list and open any of them the same way.
#[async_trait]
pub trait CatalogService: Send + Sync {
    type Item: Serialize + DeserializeOwned + Send;
    type Filters: Send + Sync;

    /// List items matching `filters`
    async fn list(&self, filters: &Self::Filters) -> Result<ApiResponse<Page<Self::Item>>, ApiError>;

    /// Fetch one item by id
    async fn get(&self, id: &str) -> Result<ApiResponse<Self::Item>, ApiError>;

    /// Name of the resource, used in log lines
    fn resource_name(&self) -> &'static str;
}
