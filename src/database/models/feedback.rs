use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
};
use serde::{Deserialize, Serialize};

use super::{FieldErrors, Validate};

/// Body of `POST /addToGallery`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub food_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// RFC 3339 timestamp; existing documents store it as a string
    #[serde(default)]
    pub created_at: Option<String>,
}

impl NewFeedback {
    /// Store `createdAt` as UTC with millisecond precision so the string
    /// ordering the listing sorts on is chronological. Missing values become
    /// `now`; unparsable ones are left for `validate` to reject.
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        let at = match self.created_at.as_deref().map(DateTime::parse_from_rfc3339) {
            None => now,
            Some(Ok(at)) => at.with_timezone(&Utc),
            Some(Err(_)) => return self,
        };
        self.created_at = Some(at.to_rfc3339_opts(SecondsFormat::Millis, true));
        self
    }
}

impl Validate for NewFeedback {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.require("foodItemId", &self.food_item_id);
        if let Some(created_at) = &self.created_at {
            if DateTime::parse_from_rfc3339(created_at).is_err() {
                errors.add("createdAt", "Must be an RFC 3339 timestamp");
            }
        }
        if let Some(email) = &self.user_email {
            errors.require_email("userEmail", email);
        }
        errors.into_result()
    }
}

/// Lookup for `GET /usersFeedback/:foodItemId`, newest first
pub struct FeedbackQuery;

impl FeedbackQuery {
    pub fn filter(food_item_id: &str) -> Document {
        doc! { "foodItemId": food_item_id }
    }

    pub fn find_options() -> FindOptions {
        let mut options = FindOptions::default();
        options.sort = Some(doc! { "createdAt": -1 });
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn missing_timestamp_is_stamped() {
        let feedback: NewFeedback =
            serde_json::from_str(r#"{"foodItemId":"abc","feedback":"Great"}"#).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap();
        let stamped = feedback.stamped(now);
        assert_eq!(stamped.created_at.as_deref(), Some("2024-03-14T12:00:00.000Z"));
        assert!(stamped.validate().is_ok());
    }

    #[test]
    fn client_timestamp_is_kept() {
        let feedback: NewFeedback = serde_json::from_str(
            r#"{"foodItemId":"abc","createdAt":"2023-01-01T08:30:00.000Z"}"#,
        )
        .unwrap();
        let stamped = feedback.stamped(Utc::now());
        assert_eq!(stamped.created_at.as_deref(), Some("2023-01-01T08:30:00.000Z"));
    }

    #[test]
    fn mixed_offsets_and_precisions_sort_chronologically() {
        let stamp = |raw: &str| {
            let feedback: NewFeedback = serde_json::from_value(serde_json::json!({
                "foodItemId": "abc",
                "createdAt": raw,
            }))
            .unwrap();
            feedback.stamped(Utc::now()).created_at.unwrap()
        };

        let noon = stamp("2024-03-14T12:00:00Z");
        let noon_and_a_half_second = stamp("2024-03-14T12:00:00.500Z");
        let eight_utc = stamp("2024-03-14T13:00:00+05:00");

        assert_eq!(noon, "2024-03-14T12:00:00.000Z");
        assert_eq!(noon_and_a_half_second, "2024-03-14T12:00:00.500Z");
        assert_eq!(eight_utc, "2024-03-14T08:00:00.000Z");
        assert!(noon_and_a_half_second > noon);
        assert!(eight_utc < noon);
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        let feedback: NewFeedback =
            serde_json::from_str(r#"{"foodItemId":"abc","createdAt":"yesterday"}"#).unwrap();
        assert!(feedback.validate().unwrap_err().get("createdAt").is_some());
    }

    #[test]
    fn listing_sorts_newest_first() {
        assert_eq!(FeedbackQuery::filter("abc"), doc! { "foodItemId": "abc" });
        assert_eq!(FeedbackQuery::find_options().sort, Some(doc! { "createdAt": -1 }));
    }
}
