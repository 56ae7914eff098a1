//! Content normalization - coerces arbitrary stored input into a complete document
//!
//! `normalize` is total: whatever shape the store hands back (missing key,
//! partial document, wrong types), the result is a valid `SiteContent`.
//! Rules:
//! - a provided non-empty collection is mapped element-wise, trimming strings
//!   and substituting per-field placeholders for blanks
//! - an empty, absent, or wrong-typed collection is replaced by the default
//!   collection wholesale
//! - required nested arrays (sessions, tags, features, items) fall back to a
//!   singleton placeholder
//! - `label` stays `None` when blank, `highlight` defaults to `false`
//!
//! Normalization is deterministic and idempotent.

use crate::domain::content::{
    ContactSection, PricingOption, ProgramDay, ProgramSession, RegistrationNotifications,
    SiteContent, Speaker,
};
use crate::domain::defaults::{
    default_content, empty_day, empty_pricing, empty_session, empty_speaker,
};
use serde::Deserialize;
use serde_json::Value;

/// Tolerant mirror of `SiteContent` where every field is optional.
///
/// Built field-by-field from a raw JSON value, so one unusable top-level
/// field falls back to its default collection without discarding the rest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSiteContent {
    pub program_days: Option<Vec<RawProgramDay>>,
    pub speakers: Option<Vec<RawSpeaker>>,
    pub pricing_options: Option<Vec<RawPricingOption>>,
    pub registration_notifications: Option<RawRegistrationNotifications>,
    pub contact_section: Option<RawContactSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProgramDay {
    pub date: Option<String>,
    pub sessions: Option<Vec<RawProgramSession>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProgramSession {
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSpeaker {
    pub name: Option<String>,
    pub role: Option<String>,
    pub experience: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<Option<String>>>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPricingOption {
    pub label: Option<String>,
    pub period: Option<String>,
    pub price: Option<String>,
    pub features: Option<Vec<Option<String>>>,
    pub highlight: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRegistrationNotifications {
    pub title: Option<String>,
    pub items: Option<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawContactSection {
    pub title: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl RawSiteContent {
    /// Extract each top-level field independently. A field that fails to
    /// deserialize (wrong type somewhere inside it) becomes `None` and the
    /// normalizer substitutes the default for that field only.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        fn field<T: serde::de::DeserializeOwned>(
            map: &serde_json::Map<String, Value>,
            key: &str,
        ) -> Option<T> {
            map.get(key).and_then(|v| serde_json::from_value(v.clone()).ok())
        }

        Self {
            program_days: field(map, "programDays"),
            speakers: field(map, "speakers"),
            pricing_options: field(map, "pricingOptions"),
            registration_notifications: field(map, "registrationNotifications"),
            contact_section: field(map, "contactSection"),
        }
    }
}

/// Trimmed string, or the fallback when absent or blank
fn clean(value: Option<&String>, fallback: &str) -> String {
    match value.map(|s| s.trim()) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => fallback.to_string(),
    }
}

/// Trimmed optional string, `None` when absent or blank
fn clean_optional(value: Option<&String>) -> Option<String> {
    value.map(|s| s.trim()).filter(|t| !t.is_empty()).map(|t| t.to_string())
}

fn normalize_day(raw: &RawProgramDay) -> ProgramDay {
    let placeholder = empty_session();
    let sessions = match raw.sessions.as_deref() {
        Some(sessions) if !sessions.is_empty() => sessions
            .iter()
            .map(|s| ProgramSession {
                time: clean(s.time.as_ref(), &placeholder.time),
                kind: clean(s.kind.as_ref(), &placeholder.kind),
                title: clean(s.title.as_ref(), &placeholder.title),
                description: clean(s.description.as_ref(), &placeholder.description),
            })
            .collect(),
        _ => vec![empty_session()],
    };

    ProgramDay { date: clean(raw.date.as_ref(), &empty_day().date), sessions }
}

fn normalize_speaker(raw: &RawSpeaker) -> Speaker {
    let placeholder = empty_speaker();
    let tags = match raw.tags.as_deref() {
        Some(tags) if !tags.is_empty() => {
            tags.iter().map(|t| clean(t.as_ref(), &placeholder.tags[0])).collect()
        }
        _ => placeholder.tags.clone(),
    };

    Speaker {
        name: clean(raw.name.as_ref(), &placeholder.name),
        role: clean(raw.role.as_ref(), &placeholder.role),
        experience: clean(raw.experience.as_ref(), &placeholder.experience),
        description: clean(raw.description.as_ref(), &placeholder.description),
        tags,
        photo_url: raw.photo_url.as_deref().map(str::trim).unwrap_or_default().to_string(),
    }
}

fn normalize_pricing(raw: &RawPricingOption) -> PricingOption {
    let placeholder = empty_pricing();
    let features = match raw.features.as_deref() {
        Some(features) if !features.is_empty() => {
            features.iter().map(|f| clean(f.as_ref(), &placeholder.features[0])).collect()
        }
        _ => placeholder.features.clone(),
    };

    PricingOption {
        label: clean_optional(raw.label.as_ref()),
        period: clean(raw.period.as_ref(), &placeholder.period),
        price: clean(raw.price.as_ref(), &placeholder.price),
        features,
        highlight: raw.highlight.unwrap_or(false),
    }
}

fn normalize_notifications(
    raw: Option<&RawRegistrationNotifications>,
    fallback: &RegistrationNotifications,
) -> RegistrationNotifications {
    let title = clean(raw.and_then(|n| n.title.as_ref()), &fallback.title);

    // Blank items are dropped rather than replaced; an all-blank list falls
    // back to the default items.
    let items: Vec<String> = raw
        .and_then(|n| n.items.as_deref())
        .unwrap_or_default()
        .iter()
        .filter_map(|i| clean_optional(i.as_ref()))
        .collect();
    let items = if items.is_empty() { fallback.items.clone() } else { items };

    RegistrationNotifications { title, items }
}

fn normalize_contact(raw: Option<&RawContactSection>, fallback: &ContactSection) -> ContactSection {
    ContactSection {
        title: clean(raw.and_then(|c| c.title.as_ref()), &fallback.title),
        phone: clean(raw.and_then(|c| c.phone.as_ref()), &fallback.phone),
        email: clean(raw.and_then(|c| c.email.as_ref()), &fallback.email),
        website: clean(raw.and_then(|c| c.website.as_ref()), &fallback.website),
    }
}

/// Coerce a tolerant input into a complete, valid document
pub fn normalize(raw: &RawSiteContent) -> SiteContent {
    let fallback = default_content();

    let program_days = match raw.program_days.as_deref() {
        Some(days) if !days.is_empty() => days.iter().map(normalize_day).collect(),
        _ => fallback.program_days.clone(),
    };

    let speakers = match raw.speakers.as_deref() {
        Some(speakers) if !speakers.is_empty() => {
            speakers.iter().map(normalize_speaker).collect()
        }
        _ => fallback.speakers.clone(),
    };

    let pricing_options = match raw.pricing_options.as_deref() {
        Some(options) if !options.is_empty() => options.iter().map(normalize_pricing).collect(),
        _ => fallback.pricing_options.clone(),
    };

    SiteContent {
        program_days,
        speakers,
        pricing_options,
        registration_notifications: normalize_notifications(
            raw.registration_notifications.as_ref(),
            &fallback.registration_notifications,
        ),
        contact_section: normalize_contact(
            raw.contact_section.as_ref(),
            &fallback.contact_section,
        ),
    }
}

/// Normalize a raw JSON value as read from the store. `None` (missing key)
/// yields the default document.
pub fn normalize_value(value: Option<&Value>) -> SiteContent {
    match value {
        Some(v) => normalize(&RawSiteContent::from_value(v)),
        None => default_content(),
    }
}

/// Re-normalize an already-typed document (trims edits before persisting)
pub fn normalize_content(content: &SiteContent) -> SiteContent {
    match serde_json::to_value(content) {
        Ok(value) => normalize_value(Some(&value)),
        Err(_) => default_content(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_value_yields_defaults() {
        assert_eq!(normalize_value(None), default_content());
    }

    #[test]
    fn test_non_object_value_yields_defaults() {
        assert_eq!(normalize_value(Some(&json!("nonsense"))), default_content());
        assert_eq!(normalize_value(Some(&json!(42))), default_content());
        assert_eq!(normalize_value(Some(&json!([1, 2, 3]))), default_content());
    }

    #[test]
    fn test_wrong_typed_field_falls_back_alone() {
        let value = json!({
            "programDays": "not an array",
            "contactSection": { "phone": "  +7 999 000-00-00  " }
        });
        let content = normalize_value(Some(&value));
        assert_eq!(content.program_days, default_content().program_days);
        assert_eq!(content.contact_section.phone, "+7 999 000-00-00");
        // Untouched contact fields keep their defaults
        assert_eq!(content.contact_section.email, default_content().contact_section.email);
    }

    #[test]
    fn test_strings_are_trimmed_and_blanks_defaulted() {
        let value = json!({
            "programDays": [{
                "date": "  27 ноября  ",
                "sessions": [{ "time": "   ", "title": "Доклад" }]
            }]
        });
        let content = normalize_value(Some(&value));
        assert_eq!(content.program_days.len(), 1);
        assert_eq!(content.program_days[0].date, "27 ноября");
        let session = &content.program_days[0].sessions[0];
        assert_eq!(session.time, empty_session().time);
        assert_eq!(session.title, "Доклад");
        assert_eq!(session.kind, empty_session().kind);
    }

    #[test]
    fn test_empty_nested_arrays_get_singleton_placeholders() {
        let value = json!({
            "programDays": [{ "date": "27 ноября", "sessions": [] }],
            "speakers": [{ "name": "Ольга", "tags": [] }],
            "pricingOptions": [{ "period": "Сейчас", "features": [] }]
        });
        let content = normalize_value(Some(&value));
        assert_eq!(content.program_days[0].sessions, vec![empty_session()]);
        assert_eq!(content.speakers[0].tags, empty_speaker().tags);
        assert_eq!(content.pricing_options[0].features, empty_pricing().features);
    }

    #[test]
    fn test_optional_fields() {
        let value = json!({
            "pricingOptions": [
                { "label": "  ", "period": "A", "price": "1₽", "features": ["x"] },
                { "label": " Акция ", "period": "B", "price": "2₽", "features": ["x"], "highlight": true }
            ]
        });
        let content = normalize_value(Some(&value));
        assert_eq!(content.pricing_options[0].label, None);
        assert!(!content.pricing_options[0].highlight);
        assert_eq!(content.pricing_options[1].label.as_deref(), Some("Акция"));
        assert!(content.pricing_options[1].highlight);
    }

    #[test]
    fn test_blank_notification_items_are_dropped() {
        let value = json!({
            "registrationNotifications": { "title": "Уведомления", "items": ["  ", "Первое", null] }
        });
        let content = normalize_value(Some(&value));
        assert_eq!(content.registration_notifications.items, vec!["Первое".to_string()]);

        let all_blank = json!({
            "registrationNotifications": { "items": ["", "   "] }
        });
        let content = normalize_value(Some(&all_blank));
        assert_eq!(
            content.registration_notifications.items,
            default_content().registration_notifications.items
        );
    }

    #[test]
    fn test_never_produces_empty_required_collections() {
        let inputs = vec![
            json!({}),
            json!({ "programDays": [] }),
            json!({ "programDays": [{}], "speakers": [{}], "pricingOptions": [{}] }),
            json!({ "speakers": [{ "tags": [null, null] }] }),
            json!(null),
        ];
        for input in inputs {
            let content = normalize_value(Some(&input));
            assert!(!content.program_days.is_empty());
            for day in &content.program_days {
                assert!(!day.sessions.is_empty());
            }
            assert!(!content.speakers.is_empty());
            for speaker in &content.speakers {
                assert!(!speaker.tags.is_empty());
            }
            assert!(!content.pricing_options.is_empty());
            for option in &content.pricing_options {
                assert!(!option.features.is_empty());
            }
            assert!(!content.registration_notifications.items.is_empty());
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = vec![
            json!({}),
            json!({ "programDays": [{ "date": "  x  ", "sessions": [{ "time": " 10:00 " }] }] }),
            json!({ "speakers": [{ "name": "", "tags": [" a ", ""] }] }),
            json!({ "pricingOptions": [{ "label": "", "highlight": true }] }),
            serde_json::to_value(default_content()).unwrap(),
        ];
        for input in inputs {
            let once = normalize_value(Some(&input));
            let twice = normalize_content(&once);
            assert_eq!(twice, once);
        }
    }
}
