use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub mod developer;
pub mod inquiry;
pub mod page;
pub mod promotion;
pub mod user;

pub use developer::Developer;
pub use inquiry::{
    Bank, CallbackRequest, MortgageCalculation, MortgageEstimate, MortgageInquiry, ValidationError,
};
pub use page::Page;
pub use promotion::Promotion;
pub use user::{
    AuthResponse, LoginRequest, PasswordChange, PasswordResetConfirm, PasswordResetRequest,
    ProfileUpdate, RegisterRequest, User, UserRole,
};

/// Construction / sales stage of a residential complex
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Planned,
    Construction,
    Completed,
    Sold,
    #[serde(other)]
    Unknown,
}

/// Location information for a property
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Property listing (residential complex) as served by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_from: Option<f64>,
    #[serde(default)]
    pub price_to: Option<f64>,
    #[serde(default)]
    pub area_from: Option<f64>,
    #[serde(default)]
    pub area_to: Option<f64>,
    /// Room counts on offer; a bare number is read as a single entry
    #[serde(default, deserialize_with = "room_counts")]
    pub rooms: Vec<u32>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub developer_id: Option<String>,
    #[serde(default)]
    pub developer: Option<DeveloperRef>,
    /// Free-form completion date as published ("Q4 2026", "2025-12-01")
    #[serde(default)]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub status: Option<PropertyStatus>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Fields this client does not model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Property {
    /// Human-readable price range, e.g. `"25000000 – 48000000"`
    pub fn price_label(&self) -> String {
        range_label(self.starting_price(), self.price_to)
    }

    /// `priceFrom`, or the flat `price` some listings carry instead
    pub fn starting_price(&self) -> Option<f64> {
        self.price_from
            .or_else(|| self.extra.get("price").and_then(Value::as_f64))
    }

    pub fn area_label(&self) -> String {
        range_label(self.area_from, self.area_to)
    }
}

/// Short developer reference embedded in a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Single unit inside a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Apartment {
    pub id: String,
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub floor: Option<i32>,
    #[serde(default)]
    pub rooms: Option<u32>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub layout_image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn room_counts<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Rooms {
        Single(u32),
        List(Vec<u32>),
    }

    Ok(match Option::<Rooms>::deserialize(deserializer)? {
        Some(Rooms::Single(count)) => vec![count],
        Some(Rooms::List(counts)) => counts,
        None => Vec::new(),
    })
}

pub(crate) fn range_label(from: Option<f64>, to: Option<f64>) -> String {
    match (from, to) {
        (Some(a), Some(b)) if a == b => format!("{}", a),
        (Some(a), Some(b)) => format!("{} – {}", a, b),
        (Some(a), None) => format!("from {}", a),
        (None, Some(b)) => format!("up to {}", b),
        (None, None) => "n/a".to_string(),
    }
}
