use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use rocket::{Request, Response};
use std::io::Cursor;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing {0}")]
    MissingField(&'static str),
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal server error")]
    Db {
        message: String,
        #[source]
        source: sqlx::error::Error,
    },
    /// Mail relay failure. Logged by the notification dispatcher, never
    /// turned into an HTTP response.
    #[error("Email delivery failed: {0}")]
    Email(String),
    /// SMS gateway failure, carrying the provider's status and body when the
    /// request itself went through.
    #[error("SMS delivery failed: {0}")]
    Sms(String),
}

impl AppError {
    pub fn db(message: impl Into<String>, source: sqlx::error::Error) -> Self {
        Self::Db {
            message: message.into(),
            source,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::db("Database error", e)
    }
}

impl From<&AppError> for Status {
    fn from(e: &AppError) -> Self {
        match e {
            AppError::MissingField(_) => Status::BadRequest,
            AppError::InvalidPassword => Status::Unauthorized,
            AppError::Unauthorized => Status::Unauthorized,
            AppError::Db { .. } => Status::InternalServerError,
            AppError::Email(_) => Status::InternalServerError,
            AppError::Sms(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &Request<'_>) -> rocket::response::Result<'static> {
        let method = req.method();
        let uri = req.uri();

        let request_id = req
            .local_cache(|| None::<crate::middleware::RequestId>)
            .as_ref()
            .map(|r| r.0.as_str())
            .unwrap_or("unknown");

        error!(
            error = ?self,
            request_id = %request_id,
            method = %method,
            uri = %uri,
            "request failed"
        );

        let status = Status::from(&self);
        let body = serde_json::json!({ "message": self.to_string() }).to_string();

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
