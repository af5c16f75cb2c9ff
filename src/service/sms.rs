use crate::config::SmsConfig;
use crate::error::app_error::AppError;
use crate::models::quote::NewQuote;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// HTTP request timeout for a single gateway call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sign a gateway request the way NCP SENS expects: HMAC-SHA256 over
/// `"{method} {path}\n{timestamp}\n{access_key}"`, base64-encoded.
pub fn sign_request(method: &str, path: &str, timestamp: &str, access_key: &str, secret_key: &str) -> String {
    let message = format!("{} {}\n{}\n{}", method, path, timestamp, access_key);

    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());

    BASE64.encode(mac.finalize().into_bytes())
}

pub struct SmsService {
    config: SmsConfig,
    client: reqwest::Client,
}

impl SmsService {
    pub fn new(config: SmsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { config, client }
    }

    /// Short fixed-format message for the administrator's phone.
    fn message_content(quote: &NewQuote) -> String {
        format!("견적 요청: {} / {} / {}", quote.event_name, quote.event_date, quote.contact_name)
    }

    /// Submit a notification SMS to the gateway. No-ops silently when any
    /// credential or the destination number is not configured.
    pub async fn send_quote_notification(&self, quote: &NewQuote) -> Result<(), AppError> {
        if !self.config.is_configured() {
            tracing::debug!("SMS gateway not configured, skipping SMS notification");
            return Ok(());
        }

        let path = format!("/sms/v2/services/{}/messages", self.config.service_id);
        let timestamp = Utc::now().timestamp_millis().to_string();
        let signature = sign_request("POST", &path, &timestamp, &self.config.access_key, &self.config.secret_key);

        let body = serde_json::json!({
            "type": "SMS",
            "from": self.config.from_number,
            "content": Self::message_content(quote),
            "messages": [{ "to": self.config.admin_phone }],
        });

        let response = self
            .client
            .post(format!("{}{}", self.config.base_url, path))
            .header("x-ncp-apigw-timestamp", &timestamp)
            .header("x-ncp-iam-access-key", &self.config.access_key)
            .header("x-ncp-apigw-signature-v2", &signature)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Sms(format!("gateway request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Sms(format!("gateway returned {}: {}", status.as_u16(), text)));
        }

        tracing::info!(to = %self.config.admin_phone, "quote notification SMS sent");
        Ok(())
    }
}
