//! Strict validation of incoming PUT payloads
//!
//! The normalizer is deliberately forgiving; this layer is not. A payload
//! must match the document shape exactly (unknown fields rejected), every
//! required string and array must be non-empty, and `photoUrl` must be a
//! valid http(s) URL or the empty string. Failures carry the field path so
//! the server can log what was wrong before answering with the generic
//! 400 envelope.

use crate::infra::error::{ContentError, Result};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SessionInput {
    time: String,
    #[serde(rename = "type")]
    kind: String,
    title: String,
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DayInput {
    date: String,
    sessions: Vec<SessionInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SpeakerInput {
    name: String,
    role: String,
    experience: String,
    description: String,
    tags: Vec<String>,
    photo_url: String,
}

// label/highlight are accepted but need no checks; they are declared so
// deny_unknown_fields does not reject them.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct PricingInput {
    #[serde(default)]
    label: Option<String>,
    period: String,
    price: String,
    features: Vec<String>,
    #[serde(default)]
    highlight: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NotificationsInput {
    title: String,
    items: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContactInput {
    title: String,
    phone: String,
    email: String,
    website: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SiteContentInput {
    program_days: Vec<DayInput>,
    speakers: Vec<SpeakerInput>,
    pricing_options: Vec<PricingInput>,
    registration_notifications: NotificationsInput,
    contact_section: ContactInput,
}

fn invalid(path: &str, reason: &str) -> ContentError {
    ContentError::Validation(format!("{path}: {reason}"))
}

fn require_string(path: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(path, "must not be empty"));
    }
    Ok(())
}

fn require_strings(path: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(invalid(path, "must contain at least one element"));
    }
    for (i, value) in values.iter().enumerate() {
        require_string(&format!("{path}[{i}]"), value)?;
    }
    Ok(())
}

fn require_photo_url(path: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        Ok(url) => Err(invalid(path, &format!("unsupported URL scheme: {}", url.scheme()))),
        Err(e) => Err(invalid(path, &format!("invalid URL: {e}"))),
    }
}

/// Validate a PUT payload. Returns the field-path error for the first
/// violation found.
pub fn validate_payload(payload: &Value) -> Result<()> {
    let input: SiteContentInput = serde_json::from_value(payload.clone())
        .map_err(|e| ContentError::Validation(e.to_string()))?;

    if input.program_days.is_empty() {
        return Err(invalid("programDays", "must contain at least one day"));
    }
    for (i, day) in input.program_days.iter().enumerate() {
        require_string(&format!("programDays[{i}].date"), &day.date)?;
        if day.sessions.is_empty() {
            return Err(invalid(
                &format!("programDays[{i}].sessions"),
                "must contain at least one session",
            ));
        }
        for (j, session) in day.sessions.iter().enumerate() {
            let path = format!("programDays[{i}].sessions[{j}]");
            require_string(&format!("{path}.time"), &session.time)?;
            require_string(&format!("{path}.type"), &session.kind)?;
            require_string(&format!("{path}.title"), &session.title)?;
            require_string(&format!("{path}.description"), &session.description)?;
        }
    }

    if input.speakers.is_empty() {
        return Err(invalid("speakers", "must contain at least one speaker"));
    }
    for (i, speaker) in input.speakers.iter().enumerate() {
        let path = format!("speakers[{i}]");
        require_string(&format!("{path}.name"), &speaker.name)?;
        require_string(&format!("{path}.role"), &speaker.role)?;
        require_string(&format!("{path}.experience"), &speaker.experience)?;
        require_string(&format!("{path}.description"), &speaker.description)?;
        require_strings(&format!("{path}.tags"), &speaker.tags)?;
        require_photo_url(&format!("{path}.photoUrl"), &speaker.photo_url)?;
    }

    if input.pricing_options.is_empty() {
        return Err(invalid("pricingOptions", "must contain at least one option"));
    }
    for (i, option) in input.pricing_options.iter().enumerate() {
        let path = format!("pricingOptions[{i}]");
        require_string(&format!("{path}.period"), &option.period)?;
        require_string(&format!("{path}.price"), &option.price)?;
        require_strings(&format!("{path}.features"), &option.features)?;
    }

    require_string("registrationNotifications.title", &input.registration_notifications.title)?;
    require_strings("registrationNotifications.items", &input.registration_notifications.items)?;

    require_string("contactSection.title", &input.contact_section.title)?;
    require_string("contactSection.phone", &input.contact_section.phone)?;
    require_string("contactSection.email", &input.contact_section.email)?;
    require_string("contactSection.website", &input.contact_section.website)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults::default_content;
    use serde_json::json;

    fn valid_payload() -> Value {
        serde_json::to_value(default_content()).unwrap()
    }

    #[test]
    fn test_default_document_is_valid() {
        assert!(validate_payload(&valid_payload()).is_ok());
    }

    #[test]
    fn test_empty_program_days_rejected() {
        let mut payload = valid_payload();
        payload["programDays"] = json!([]);
        let err = validate_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("programDays"));
    }

    #[test]
    fn test_empty_sessions_rejected() {
        let mut payload = valid_payload();
        payload["programDays"][0]["sessions"] = json!([]);
        assert!(validate_payload(&payload).is_err());
    }

    #[test]
    fn test_empty_required_string_rejected() {
        let mut payload = valid_payload();
        payload["contactSection"]["phone"] = json!("");
        let err = validate_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("contactSection.phone"));
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("speakers");
        assert!(validate_payload(&payload).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        // The retired flat discount schema must not slip through silently.
        let mut payload = valid_payload();
        payload["discountTitle"] = json!("Скидка");
        assert!(validate_payload(&payload).is_err());
    }

    #[test]
    fn test_photo_url_rules() {
        let mut payload = valid_payload();
        payload["speakers"][0]["photoUrl"] = json!("https://img.example/p.jpg");
        assert!(validate_payload(&payload).is_ok());

        payload["speakers"][0]["photoUrl"] = json!("");
        assert!(validate_payload(&payload).is_ok());

        payload["speakers"][0]["photoUrl"] = json!("not a url");
        assert!(validate_payload(&payload).is_err());

        payload["speakers"][0]["photoUrl"] = json!("ftp://img.example/p.jpg");
        assert!(validate_payload(&payload).is_err());
    }

    #[test]
    fn test_empty_tags_rejected() {
        let mut payload = valid_payload();
        payload["speakers"][0]["tags"] = json!([]);
        assert!(validate_payload(&payload).is_err());

        payload["speakers"][0]["tags"] = json!(["ok", ""]);
        assert!(validate_payload(&payload).is_err());
    }

    #[test]
    fn test_label_and_highlight_optional() {
        let mut payload = valid_payload();
        let option = payload["pricingOptions"][1].as_object_mut().unwrap();
        option.remove("label");
        option.remove("highlight");
        assert!(validate_payload(&payload).is_ok());
    }
}
