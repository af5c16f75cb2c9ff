use crate::Config;
use crate::build_rocket_with_store;
use crate::config::SmsConfig;
use crate::database::quote_store::{DynQuoteStore, QuoteStore};
use crate::error::app_error::AppError;
use crate::models::quote::{NewQuote, Quote, QuoteRequest};
use rocket::local::asynchronous::Client;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

pub const TEST_ADMIN_PASSWORD: &str = "correct-horse-battery";

/// In-memory store standing in for the real engines in route tests.
pub struct MockStore {
    quotes: Mutex<Vec<Quote>>,
    next_id: AtomicI64,
    fail_inserts: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            quotes: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_inserts: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_inserts: true,
            ..Self::new()
        }
    }

    /// Snapshot of stored quotes in insertion order.
    pub fn quotes(&self) -> Vec<Quote> {
        self.quotes.lock().unwrap().clone()
    }

    /// Insert minimal valid quotes with the given event names.
    pub async fn seed<const N: usize>(&self, event_names: [&str; N]) {
        for name in event_names {
            let quote = QuoteRequest {
                event_name: Some(name.to_string()),
                event_date: Some("2024-05-01".to_string()),
                event_place: Some("Seoul".to_string()),
                contact_name: Some("Kim".to_string()),
                contact_phone: Some("010-1111-2222".to_string()),
                contact_email: Some("a@b.com".to_string()),
                ..QuoteRequest::default()
            }
            .into_new_quote("2024-05-01 10:00:00".to_string())
            .expect("valid seed quote");

            self.insert(&quote).await.expect("seed insert");
        }
    }
}

#[async_trait::async_trait]
impl QuoteStore for MockStore {
    async fn initialize(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert(&self, quote: &NewQuote) -> Result<i64, AppError> {
        if self.fail_inserts {
            return Err(AppError::db("mock insert failure", sqlx::Error::PoolClosed));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.quotes.lock().unwrap().push(Quote {
            id,
            event_name: quote.event_name.clone(),
            event_date: quote.event_date.clone(),
            event_place: quote.event_place.clone(),
            event_duration: quote.event_duration.clone(),
            led_type: quote.led_type.clone(),
            led_size: quote.led_size.clone(),
            led_content: quote.led_content.clone(),
            power: quote.power.clone(),
            extra: quote.extra.clone(),
            contact_name: quote.contact_name.clone(),
            contact_company: quote.contact_company.clone(),
            contact_phone: quote.contact_phone.clone(),
            contact_email: quote.contact_email.clone(),
            created_at: quote.created_at.clone(),
        });
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Quote>, AppError> {
        let mut quotes = self.quotes.lock().unwrap().clone();
        quotes.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(quotes)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.quotes.lock().unwrap().retain(|q| q.id != id);
        Ok(())
    }
}

pub struct TestHarness {
    pub client: Client,
    pub store: Arc<MockStore>,
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.admin.password = TEST_ADMIN_PASSWORD.to_string();
    config.admin.token_secret = "test-token-secret".to_string();
    config.logging.level = "error".to_string();
    config
}

/// A gateway config pointing at a port nothing listens on, so dispatch
/// attempts fail fast.
fn unreachable_sms_config() -> SmsConfig {
    SmsConfig {
        service_id: "svc".to_string(),
        access_key: "access".to_string(),
        secret_key: "secret".to_string(),
        from_number: "0200000000".to_string(),
        admin_phone: "01000000000".to_string(),
        base_url: "http://127.0.0.1:1".to_string(),
    }
}

async fn harness(config: Config, store: Arc<MockStore>) -> TestHarness {
    let dyn_store: DynQuoteStore = store.clone();
    let rocket = build_rocket_with_store(config, dyn_store);
    let client = Client::tracked(rocket).await.expect("valid rocket instance");
    TestHarness { client, store }
}

/// Rocket over a working mock store with notifications unconfigured.
pub async fn test_client() -> TestHarness {
    harness(test_config(), Arc::new(MockStore::new())).await
}

/// Rocket whose store rejects inserts, with an SMS channel that would count
/// a failure if dispatch were (incorrectly) attempted.
pub async fn failing_client() -> TestHarness {
    let mut config = test_config();
    config.sms = unreachable_sms_config();
    harness(config, Arc::new(MockStore::failing())).await
}

/// Rocket over a working store whose SMS channel is unreachable.
pub async fn sms_failure_client() -> TestHarness {
    let mut config = test_config();
    config.sms = unreachable_sms_config();
    harness(config, Arc::new(MockStore::new())).await
}
