use crate::api::QueryParams;
use serde::{Deserialize, Serialize};

/// Search parameters for the property catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertyFilters {
    /// Free-text search over title and address
    pub search: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub developer_id: Option<String>,
    /// `planned`, `construction`, `completed` or `sold`
    pub status: Option<String>,
    /// Minimum price
    pub min_price: Option<i64>,
    /// Maximum price
    pub max_price: Option<i64>,
    /// Minimum size in square meters
    pub min_area: Option<f64>,
    /// Maximum size in square meters
    pub max_area: Option<f64>,
    /// Number of rooms
    pub rooms: Option<u32>,
    /// Sort key, e.g. `price_asc`
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PropertyFilters {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push("search", self.search.as_deref())
            .push("city", self.city.as_deref())
            .push("district", self.district.as_deref())
            .push("developerId", self.developer_id.as_deref())
            .push("status", self.status.as_deref())
            .push("minPrice", self.min_price)
            .push("maxPrice", self.max_price)
            .push("minArea", self.min_area)
            .push("maxArea", self.max_area)
            .push("rooms", self.rooms)
            .push("sort", self.sort.as_deref())
            .push("page", self.page)
            .push("limit", self.limit);
        query
    }
}

/// Filters for the apartments of a single property
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApartmentFilters {
    pub rooms: Option<u32>,
    pub floor: Option<i32>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ApartmentFilters {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push("rooms", self.rooms)
            .push("floor", self.floor)
            .push("minPrice", self.min_price)
            .push("maxPrice", self.max_price)
            .push("status", self.status.as_deref())
            .push("page", self.page)
            .push("limit", self.limit);
        query
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeveloperFilters {
    pub search: Option<String>,
    pub city: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl DeveloperFilters {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push("search", self.search.as_deref())
            .push("city", self.city.as_deref())
            .push("page", self.page)
            .push("limit", self.limit);
        query
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PromotionFilters {
    pub developer_id: Option<String>,
    pub property_id: Option<String>,
    /// Only offers running right now
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PromotionFilters {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push("developerId", self.developer_id.as_deref())
            .push("propertyId", self.property_id.as_deref())
            .push("active", self.active)
            .push("page", self.page)
            .push("limit", self.limit);
        query
    }
}

/// Admin user listing filters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserFilters {
    pub search: Option<String>,
    pub role: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl UserFilters {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push("search", self.search.as_deref())
            .push("role", self.role.as_deref())
            .push("page", self.page)
            .push("limit", self.limit);
        query
    }
}
