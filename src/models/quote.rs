use crate::error::app_error::AppError;
use serde::{Deserialize, Serialize};

/// Required submission fields, in the order validation reports them.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "eventName",
    "eventDate",
    "eventPlace",
    "contactName",
    "contactPhone",
    "contactEmail",
];

/// One persisted rental inquiry. Fields are write-once: a quote is only ever
/// inserted, listed, or deleted.
#[derive(Serialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: i64,
    pub event_name: String,
    pub event_date: String,
    pub event_place: String,
    pub event_duration: String,
    pub led_type: String,
    pub led_size: String,
    pub led_content: String,
    pub power: String,
    pub extra: String,
    pub contact_name: String,
    pub contact_company: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub created_at: String,
}

/// Inbound submission payload. Every field is optional at the wire level so
/// validation can name the first missing one instead of failing on
/// deserialization.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub event_place: Option<String>,
    #[serde(default)]
    pub event_duration: Option<String>,
    #[serde(default)]
    pub led_type: Option<String>,
    #[serde(default)]
    pub led_size: Option<String>,
    #[serde(default)]
    pub led_content: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub extra: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_company: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

/// A validated quote ready for insertion, with optionals resolved to empty
/// strings and the server-side timestamp applied.
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub event_name: String,
    pub event_date: String,
    pub event_place: String,
    pub event_duration: String,
    pub led_type: String,
    pub led_size: String,
    pub led_content: String,
    pub power: String,
    pub extra: String,
    pub contact_name: String,
    pub contact_company: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub created_at: String,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl QuoteRequest {
    /// Returns the wire name of the first missing required field, if any.
    /// An empty string counts as missing.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        let required = [
            (&self.event_name, REQUIRED_FIELDS[0]),
            (&self.event_date, REQUIRED_FIELDS[1]),
            (&self.event_place, REQUIRED_FIELDS[2]),
            (&self.contact_name, REQUIRED_FIELDS[3]),
            (&self.contact_phone, REQUIRED_FIELDS[4]),
            (&self.contact_email, REQUIRED_FIELDS[5]),
        ];

        required.into_iter().find(|(value, _)| !present(value)).map(|(_, name)| name)
    }

    /// Validate the payload and stamp it with the server-side creation time.
    pub fn into_new_quote(self, created_at: String) -> Result<NewQuote, AppError> {
        if let Some(field) = self.first_missing_field() {
            return Err(AppError::MissingField(field));
        }

        Ok(NewQuote {
            event_name: self.event_name.unwrap_or_default(),
            event_date: self.event_date.unwrap_or_default(),
            event_place: self.event_place.unwrap_or_default(),
            event_duration: optional(&self.event_duration),
            led_type: optional(&self.led_type),
            led_size: optional(&self.led_size),
            led_content: optional(&self.led_content),
            power: optional(&self.power),
            extra: optional(&self.extra),
            contact_name: self.contact_name.unwrap_or_default(),
            contact_company: optional(&self.contact_company),
            contact_phone: self.contact_phone.unwrap_or_default(),
            contact_email: self.contact_email.unwrap_or_default(),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_request() -> QuoteRequest {
        QuoteRequest {
            event_name: Some("Launch".to_string()),
            event_date: Some("2024-05-01".to_string()),
            event_place: Some("Seoul".to_string()),
            contact_name: Some("Kim".to_string()),
            contact_phone: Some("010-1111-2222".to_string()),
            contact_email: Some("a@b.com".to_string()),
            ..QuoteRequest::default()
        }
    }

    #[test]
    fn valid_request_passes_validation() {
        assert!(valid_request().first_missing_field().is_none());
    }

    #[test]
    fn reports_fields_in_declaration_order() {
        let mut request = valid_request();
        request.event_date = None;
        request.contact_phone = None;
        assert_eq!(request.first_missing_field(), Some("eventDate"));

        let empty = QuoteRequest::default();
        assert_eq!(empty.first_missing_field(), Some("eventName"));
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let mut request = valid_request();
        request.contact_email = Some(String::new());
        assert_eq!(request.first_missing_field(), Some("contactEmail"));
    }

    #[test]
    fn optionals_default_to_empty_strings() {
        let quote = valid_request().into_new_quote("2024-05-01 10:00:00".to_string()).unwrap();
        assert_eq!(quote.event_name, "Launch");
        assert_eq!(quote.event_duration, "");
        assert_eq!(quote.led_type, "");
        assert_eq!(quote.contact_company, "");
        assert_eq!(quote.created_at, "2024-05-01 10:00:00");
    }

    #[test]
    fn camel_case_wire_names_are_accepted() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{"eventName":"Launch","eventDate":"2024-05-01","eventPlace":"Seoul",
                "contactName":"Kim","contactPhone":"010-1111-2222","contactEmail":"a@b.com",
                "ledType":"P3.9"}"#,
        )
        .unwrap();
        assert!(request.first_missing_field().is_none());
        assert_eq!(request.led_type.as_deref(), Some("P3.9"));
    }

    proptest! {
        #[test]
        fn any_missing_required_field_fails_validation(mask in proptest::collection::vec(any::<bool>(), 6)) {
            let mut request = valid_request();
            let slots: [&mut Option<String>; 6] = [
                &mut request.event_name,
                &mut request.event_date,
                &mut request.event_place,
                &mut request.contact_name,
                &mut request.contact_phone,
                &mut request.contact_email,
            ];
            let mut any_cleared = false;
            for (slot, clear) in slots.into_iter().zip(mask.iter()) {
                if *clear {
                    *slot = None;
                    any_cleared = true;
                }
            }

            prop_assert_eq!(request.first_missing_field().is_some(), any_cleared);
        }
    }
}
