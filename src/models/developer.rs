use super::Property;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Developer company profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub projects_count: Option<u32>,
    /// Projects embedded in the profile response
    #[serde(default, alias = "projects")]
    pub properties: Vec<Property>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
