use crate::config::Config;
use crate::models::quote::NewQuote;
use crate::service::email::EmailService;
use crate::service::sms::SmsService;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fans a stored quote out to the email and SMS channels. Both sends run
/// concurrently; failures are logged and counted per channel but never reach
/// the submitter, since the persisted row is the source of truth.
pub struct Notifier {
    email: EmailService,
    sms: SmsService,
    email_failures: AtomicU64,
    sms_failures: AtomicU64,
}

impl Notifier {
    pub fn new(config: &Config) -> Self {
        Self {
            email: EmailService::new(config.smtp.clone()),
            sms: SmsService::new(config.sms.clone()),
            email_failures: AtomicU64::new(0),
            sms_failures: AtomicU64::new(0),
        }
    }

    /// Dispatch both notifications and wait for them to settle, for logging
    /// only. The caller's response does not depend on the outcome.
    pub async fn dispatch(&self, quote: &NewQuote) {
        let (email, sms) = tokio::join!(
            self.email.send_quote_notification(quote),
            self.sms.send_quote_notification(quote),
        );

        if let Err(e) = email {
            self.email_failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(error = %e, failures = self.email_failures(), "email notification failed");
        }

        if let Err(e) = sms {
            self.sms_failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(error = %e, failures = self.sms_failures(), "SMS notification failed");
        }
    }

    pub fn email_failures(&self) -> u64 {
        self.email_failures.load(Ordering::Relaxed)
    }

    pub fn sms_failures(&self) -> u64 {
        self.sms_failures.load(Ordering::Relaxed)
    }
}
