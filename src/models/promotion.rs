use super::{DeveloperRef, Property};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Time-bounded discount offer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Discount in percent
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default, alias = "startDate")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "endDate")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub developer_id: Option<String>,
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(default)]
    pub developer: Option<DeveloperRef>,
    #[serde(default)]
    pub property: Option<Box<Property>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Promotion {
    /// Whether `now` falls inside the offer window; open bounds always match
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        let started = self.starts_at.map_or(true, |start| start <= now);
        let not_ended = self.ends_at.map_or(true, |end| now <= end);
        started && not_ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn promotion(starts: Option<&str>, ends: Option<&str>) -> Promotion {
        serde_json::from_value(json!({
            "id": "promo-1",
            "title": "Spring sale",
            "discount": 7.5,
            "startsAt": starts,
            "endsAt": ends,
        }))
        .unwrap()
    }

    #[test]
    fn active_window_is_inclusive() {
        let promo = promotion(Some("2026-03-01T00:00:00Z"), Some("2026-03-31T23:59:59Z"));
        let inside = Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();

        assert!(promo.is_active_at(inside));
        assert!(promo.is_active_at(start));
        assert!(!promo.is_active_at(after));
    }

    #[test]
    fn open_ended_promotion_never_expires() {
        let promo = promotion(Some("2026-01-01T00:00:00Z"), None);
        let later = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert!(promo.is_active_at(later));
        assert_eq!(promo.discount, Some(7.5));
    }

    #[test]
    fn legacy_date_field_names() {
        let promo: Promotion = serde_json::from_value(json!({
            "id": "promo-2",
            "title": "Winter",
            "startDate": "2026-12-01T00:00:00Z"
        }))
        .unwrap();
        assert!(promo.starts_at.is_some());
    }
}
