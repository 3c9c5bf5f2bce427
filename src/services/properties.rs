use super::item_path;
use super::traits::CatalogService;
use super::types::{ApartmentFilters, PropertyFilters};
use crate::api::{ApiClient, ApiError, ApiResponse};
use crate::models::{Apartment, Page, Property};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use tracing::{debug, info};

const PROPERTIES: &str = "/properties";
const APARTMENTS: &str = "/apartments";

/// File attached to an image upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Property catalog, apartments and admin maintenance
#[derive(Clone)]
pub struct PropertyService {
    api: ApiClient,
}

impl PropertyService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Units of one property
    pub async fn apartments(
        &self,
        property_id: &str,
        filters: &ApartmentFilters,
    ) -> Result<ApiResponse<Page<Apartment>>, ApiError> {
        let path = filters
            .to_query()
            .apply(&format!("{}/apartments", item_path(PROPERTIES, property_id)));
        self.api.get(&path).await?.decode()
    }

    pub async fn apartment(&self, id: &str) -> Result<ApiResponse<Apartment>, ApiError> {
        self.api.get(&item_path(APARTMENTS, id)).await?.decode()
    }

    pub async fn create<T: Serialize + ?Sized + Sync>(&self, property: &T) -> Result<ApiResponse<Property>, ApiError> {
        info!("Creating property");
        self.api.post(PROPERTIES, property).await?.decode()
    }

    pub async fn update<T: Serialize + ?Sized + Sync>(
        &self,
        id: &str,
        changes: &T,
    ) -> Result<ApiResponse<Property>, ApiError> {
        info!("Updating property {}", id);
        self.api.put(&item_path(PROPERTIES, id), changes).await?.decode()
    }

    pub async fn delete(&self, id: &str) -> Result<ApiResponse, ApiError> {
        info!("Deleting property {}", id);
        self.api.delete(&item_path(PROPERTIES, id)).await
    }

    /// Attach gallery images as a multipart `images` field
    pub async fn upload_images(&self, id: &str, images: Vec<ImageUpload>) -> Result<ApiResponse, ApiError> {
        debug!("Uploading {} images to property {}", images.len(), id);

        let form = images.into_iter().fold(Form::new(), |form, image| {
            form.part("images", Part::bytes(image.bytes).file_name(image.file_name))
        });

        self.api
            .upload_form(&format!("{}/images", item_path(PROPERTIES, id)), form)
            .await
    }
}

#[async_trait]
impl CatalogService for PropertyService {
    type Item = Property;
    type Filters = PropertyFilters;

    async fn list(&self, filters: &PropertyFilters) -> Result<ApiResponse<Page<Property>>, ApiError> {
        self.api.get(&filters.to_query().apply(PROPERTIES)).await?.decode()
    }

    async fn get(&self, id: &str) -> Result<ApiResponse<Property>, ApiError> {
        self.api.get(&item_path(PROPERTIES, id)).await?.decode()
    }

    fn resource_name(&self) -> &'static str {
        "properties"
    }
}
