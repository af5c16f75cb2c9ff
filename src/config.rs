use rocket::figment::{Figment, providers::{Env, Format, Toml}};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub admin: AdminConfig,
    pub smtp: SmtpConfig,
    pub sms: SmsConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub address: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json_format: bool,
}

/// Allowed CORS origins as a comma-separated list. An empty list means every
/// origin is accepted.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: String,
}

impl CorsConfig {
    pub fn origin_list(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdminConfig {
    /// Static admin password. Login always fails while this is empty.
    pub password: String,
    /// HS256 secret for admin tokens. Verification always fails while empty.
    pub token_secret: String,
    pub token_ttl_hours: i64,
    /// Where `GET /` redirects to.
    pub page_url: String,
}

/// Outbound mail relay. Email notifications are skipped unless every field
/// including `admin_email` is set.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub admin_email: String,
}

/// NCP SENS gateway credentials. SMS notifications are skipped unless every
/// credential including `admin_phone` is set.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SmsConfig {
    pub service_id: String,
    pub access_key: String,
    pub secret_key: String,
    pub from_number: String,
    pub admin_phone: String,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string. When empty the embedded SQLite engine is
    /// used instead.
    pub url: String,
    pub require_tls: bool,
    pub sqlite_path: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            address: "0.0.0.0".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: String::new(),
            token_secret: String::new(),
            token_ttl_hours: 12,
            page_url: "https://mag599746-bot.github.io/oneoffrental2/admin.html".to_string(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 465,
            username: String::new(),
            password: String::new(),
            from: String::new(),
            admin_email: String::new(),
        }
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            service_id: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            from_number: String::new(),
            admin_phone: String::new(),
            base_url: "https://sens.apigw.ntruss.com".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            require_tls: true,
            sqlite_path: "data.sqlite".to_string(),
            max_connections: 16,
            min_connections: 4,
            acquire_timeout: 5,
        }
    }
}

impl SmtpConfig {
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty()
            && !self.username.is_empty()
            && !self.password.is_empty()
            && !self.from.is_empty()
            && !self.admin_email.is_empty()
    }
}

impl SmsConfig {
    pub fn is_configured(&self) -> bool {
        !self.service_id.is_empty()
            && !self.access_key.is_empty()
            && !self.secret_key.is_empty()
            && !self.from_number.is_empty()
            && !self.admin_phone.is_empty()
    }
}

impl Config {
    /// Load configuration from multiple sources in priority order:
    /// 1. Quotedesk.toml (base configuration file)
    /// 2. Environment variables (prefixed with QUOTEDESK_, double underscore
    ///    between section and key, e.g. QUOTEDESK_ADMIN__TOKEN_SECRET)
    /// 3. The flat deployment variables (PORT, ADMIN_PASSWORD, SMTP_HOST,
    ///    DATABASE_URL, ...) the hosting environment already defines
    pub fn load() -> Result<Self, figment::Error> {
        let figment = Figment::new()
            // Start with defaults
            .merge(Toml::string(&toml::to_string(&Config::default()).unwrap()).nested())
            // Layer on Quotedesk.toml if it exists
            .merge(Toml::file("Quotedesk.toml").nested())
            // Layer on environment variables (e.g., QUOTEDESK_ADMIN__PASSWORD)
            .merge(Env::prefixed("QUOTEDESK_").split("__"))
            // Flat deployment variables take highest priority
            .merge(Env::raw().only(FLAT_ENV_KEYS).map(|key| {
                match key.as_str().to_ascii_uppercase().as_str() {
                    "PORT" => "server.port".into(),
                    "ADMIN_PASSWORD" => "admin.password".into(),
                    "ADMIN_TOKEN_SECRET" => "admin.token_secret".into(),
                    "ALLOWED_ORIGINS" => "cors.allowed_origins".into(),
                    "SMTP_HOST" => "smtp.host".into(),
                    "SMTP_PORT" => "smtp.port".into(),
                    "SMTP_USER" => "smtp.username".into(),
                    "SMTP_PASS" => "smtp.password".into(),
                    "SMTP_FROM" => "smtp.from".into(),
                    "ADMIN_EMAIL" => "smtp.admin_email".into(),
                    "SENS_SERVICE_ID" => "sms.service_id".into(),
                    "SENS_ACCESS_KEY" => "sms.access_key".into(),
                    "SENS_SECRET_KEY" => "sms.secret_key".into(),
                    "SENS_FROM_NUMBER" => "sms.from_number".into(),
                    "ADMIN_PHONE" => "sms.admin_phone".into(),
                    "DATABASE_URL" => "database.url".into(),
                    "PG_SSL" => "database.require_tls".into(),
                    other => other.to_string().into(),
                }
            }));

        figment.extract()
    }
}

/// Deployment environment variables mapped onto config paths.
const FLAT_ENV_KEYS: &[&str] = &[
    "PORT",
    "ADMIN_PASSWORD",
    "ADMIN_TOKEN_SECRET",
    "ALLOWED_ORIGINS",
    "SMTP_HOST",
    "SMTP_PORT",
    "SMTP_USER",
    "SMTP_PASS",
    "SMTP_FROM",
    "ADMIN_EMAIL",
    "SENS_SERVICE_ID",
    "SENS_ACCESS_KEY",
    "SENS_SECRET_KEY",
    "SENS_FROM_NUMBER",
    "ADMIN_PHONE",
    "DATABASE_URL",
    "PG_SSL",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smtp_config_requires_every_field() {
        let mut config = SmtpConfig::default();
        assert!(!config.is_configured());

        config.host = "smtp.example.com".to_string();
        config.username = "mailer".to_string();
        config.password = "secret".to_string();
        config.from = "noreply@example.com".to_string();
        assert!(!config.is_configured());

        config.admin_email = "admin@example.com".to_string();
        assert!(config.is_configured());
    }

    #[test]
    fn sms_config_requires_every_field() {
        let mut config = SmsConfig::default();
        assert!(!config.is_configured());

        config.service_id = "ncp:sms:kr:1:svc".to_string();
        config.access_key = "access".to_string();
        config.secret_key = "secret".to_string();
        config.from_number = "0200000000".to_string();
        assert!(!config.is_configured());

        config.admin_phone = "01000000000".to_string();
        assert!(config.is_configured());
    }

    #[test]
    fn origin_list_splits_and_trims() {
        let cors = CorsConfig {
            allowed_origins: "https://a.example, https://b.example,,".to_string(),
        };
        assert_eq!(cors.origin_list(), vec!["https://a.example", "https://b.example"]);
        assert!(CorsConfig::default().origin_list().is_empty());
    }

    #[test]
    fn default_token_ttl_is_twelve_hours() {
        assert_eq!(AdminConfig::default().token_ttl_hours, 12);
    }
}
