use crate::config::SmtpConfig;
use crate::error::app_error::AppError;
use crate::models::quote::NewQuote;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

pub struct EmailService {
    config: SmtpConfig,
}

impl EmailService {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Notify the administrator about a newly stored quote. No-ops silently
    /// when the relay or destination address is not configured.
    pub async fn send_quote_notification(&self, quote: &NewQuote) -> Result<(), AppError> {
        if !self.config.is_configured() {
            tracing::debug!("mail relay not configured, skipping email notification");
            return Ok(());
        }

        let subject = format!("견적 요청: {}", quote.event_name);
        let body = self.quote_body(quote);

        self.send_email(&subject, body).await
    }

    /// Labelled plain-text body listing every quote field, absent optionals
    /// shown as "-".
    fn quote_body(&self, quote: &NewQuote) -> String {
        [
            format!("행사명: {}", quote.event_name),
            format!("행사일: {}", quote.event_date),
            format!("장소: {}", quote.event_place),
            format!("운영기간: {}", or_dash(&quote.event_duration)),
            format!("장비: {}", or_dash(&quote.led_type)),
            format!("규격: {}", or_dash(&quote.led_size)),
            format!("콘텐츠: {}", or_dash(&quote.led_content)),
            format!("전력: {}", or_dash(&quote.power)),
            format!("요청사항: {}", or_dash(&quote.extra)),
            format!("담당자: {}", quote.contact_name),
            format!("회사/기관: {}", or_dash(&quote.contact_company)),
            format!("연락처: {}", quote.contact_phone),
            format!("이메일: {}", quote.contact_email),
            format!("접수시간: {}", quote.created_at),
        ]
        .join("\n")
    }

    /// Send an email using SMTP
    async fn send_email(&self, subject: &str, body: String) -> Result<(), AppError> {
        let email = Message::builder()
            .from(self.config.from.parse().map_err(|e| AppError::Email(format!("Invalid from address: {}", e)))?)
            .to(self
                .config
                .admin_email
                .parse()
                .map_err(|e| AppError::Email(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::Email(format!("Failed to build email: {}", e)))?;

        let creds = Credentials::new(self.config.username.clone(), self.config.password.clone());

        let mailer = SmtpTransport::relay(&self.config.host)
            .map_err(|e| AppError::Email(format!("Failed to create SMTP transport: {}", e)))?
            .credentials(creds)
            .port(self.config.port)
            .build();

        // lettre's SmtpTransport is blocking, so run it off the async worker
        let result = tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::Email(format!("Failed to spawn email sending task: {}", e)))?;

        result.map_err(|e| AppError::Email(format!("Failed to send email: {}", e)))?;

        tracing::info!(to = %self.config.admin_email, "quote notification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quote::QuoteRequest;

    fn sample_quote() -> NewQuote {
        QuoteRequest {
            event_name: Some("Launch".to_string()),
            event_date: Some("2024-05-01".to_string()),
            event_place: Some("Seoul".to_string()),
            led_type: Some("P3.9".to_string()),
            contact_name: Some("Kim".to_string()),
            contact_phone: Some("010-1111-2222".to_string()),
            contact_email: Some("a@b.com".to_string()),
            ..QuoteRequest::default()
        }
        .into_new_quote("2024-05-01 10:00:00".to_string())
        .expect("valid quote")
    }

    #[test]
    fn body_lists_every_field() {
        let service = EmailService::new(SmtpConfig::default());
        let body = service.quote_body(&sample_quote());

        assert!(body.contains("행사명: Launch"));
        assert!(body.contains("장소: Seoul"));
        assert!(body.contains("장비: P3.9"));
        assert!(body.contains("연락처: 010-1111-2222"));
        assert!(body.contains("접수시간: 2024-05-01 10:00:00"));
    }

    #[test]
    fn body_shows_dash_for_absent_optionals() {
        let service = EmailService::new(SmtpConfig::default());
        let body = service.quote_body(&sample_quote());

        assert!(body.contains("운영기간: -"));
        assert!(body.contains("회사/기관: -"));
        assert!(body.contains("요청사항: -"));
    }

    #[rocket::async_test]
    async fn unconfigured_relay_is_a_silent_noop() {
        let service = EmailService::new(SmtpConfig::default());
        assert!(service.send_quote_notification(&sample_quote()).await.is_ok());
    }
}
