//! Site content aggregate - the single document describing all editable page content
//!
//! Wire names stay camelCase for compatibility with the JSON blob already
//! persisted in the key-value store.

use serde::{Deserialize, Serialize};

/// One slot in a conference day's program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSession {
    pub time: String,
    /// Session kind, e.g. "Семинар". Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
}

/// One conference day with its ordered sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramDay {
    pub date: String,
    pub sessions: Vec<ProgramSession>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub name: String,
    pub role: String,
    pub experience: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Empty string when no photo has been uploaded yet
    pub photo_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingOption {
    /// Badge text, e.g. "Лучшая цена". Omitted when not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub period: String,
    pub price: String,
    pub features: Vec<String>,
    #[serde(default)]
    pub highlight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationNotifications {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSection {
    pub title: String,
    pub phone: String,
    pub email: String,
    pub website: String,
}

/// The aggregate root. Persisted wholesale under a single key and replaced
/// on every save - there is no partial patching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub program_days: Vec<ProgramDay>,
    pub speakers: Vec<Speaker>,
    pub pricing_options: Vec<PricingOption>,
    pub registration_notifications: RegistrationNotifications,
    pub contact_section: ContactSection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults::default_content;

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(default_content()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("programDays"));
        assert!(obj.contains_key("pricingOptions"));
        assert!(obj.contains_key("registrationNotifications"));
        assert!(obj.contains_key("contactSection"));
        assert!(json["speakers"][0].as_object().unwrap().contains_key("photoUrl"));
        assert!(json["programDays"][0]["sessions"][0].as_object().unwrap().contains_key("type"));
    }

    #[test]
    fn test_unset_label_is_omitted() {
        let option = PricingOption {
            label: None,
            period: "До 20 октября".to_string(),
            price: "6 000₽".to_string(),
            features: vec!["Доступ ко всем сессиям".to_string()],
            highlight: false,
        };
        let json = serde_json::to_value(&option).unwrap();
        assert!(!json.as_object().unwrap().contains_key("label"));
    }

    #[test]
    fn test_content_roundtrips_through_json() {
        let content = default_content();
        let json = serde_json::to_string(&content).unwrap();
        let back: SiteContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, content);
    }
}
