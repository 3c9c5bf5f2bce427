pub mod auth;
pub mod developers;
pub mod inquiries;
pub mod promotions;
pub mod properties;
pub mod traits;
pub mod types;
pub mod users;

pub use auth::AuthService;
pub use developers::DeveloperService;
pub use inquiries::InquiryService;
pub use promotions::PromotionService;
pub use properties::PropertyService;
pub use traits::CatalogService;
pub use types::{ApartmentFilters, DeveloperFilters, PromotionFilters, PropertyFilters, UserFilters};
pub use users::UserService;

/// `/collection/<id>` with the id percent-encoded
pub(crate) fn item_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}
