#![forbid(unsafe_code)]

//! Request handling for the two form endpoints.
//!
//! [`handle`] is transport-agnostic: the hosting function passes the HTTP
//! method and raw body in and writes the returned [`HandlerResponse`] out.
//! Submissions are attempted once; there are no retries.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::email::Compose;
use crate::form::{ContactRequest, ProjectBrief};
use crate::mailer::{MailError, Mailer, MailerConfig};
use crate::validate::{Validate, ValidationError};

/// Which form a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// The short contact form.
    Contact,
    /// The get-started project brief.
    GetStarted,
}

impl FormKind {
    /// Endpoint-style name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::GetStarted => "get-started",
        }
    }

    const fn success_message(self) -> &'static str {
        match self {
            Self::Contact => "Thanks for reaching out! We'll get back to you soon.",
            Self::GetStarted => "Thanks! We've received your project details and will be in touch.",
        }
    }
}

/// Status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    /// HTTP status.
    pub status: u16,
    /// `{"message": ...}` on success, `{"error": ...}` otherwise.
    pub body: serde_json::Value,
}

impl HandlerResponse {
    fn ok(message: &str) -> Self {
        Self {
            status: 200,
            body: json!({ "message": message }),
        }
    }

    fn error(err: &SubmitError) -> Self {
        Self {
            status: err.status(),
            body: json!({ "error": err.user_message() }),
        }
    }

    /// Whether the submission went through.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Why a submission was not delivered.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Anything other than POST.
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),
    /// Body was not valid JSON for the form.
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    /// A field failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Mail destination is not configured.
    #[error("mail delivery is not configured")]
    NotConfigured,
    /// The mailer failed.
    #[error("delivery failed: {0}")]
    Delivery(#[from] MailError),
}

impl SubmitError {
    /// HTTP status for this failure.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::MethodNotAllowed(_) => 405,
            Self::MalformedBody(_) | Self::Invalid(_) => 400,
            Self::NotConfigured | Self::Delivery(_) => 500,
        }
    }

    /// Message safe to show the visitor. Internal details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MethodNotAllowed(_) => "Method not allowed.".to_owned(),
            Self::MalformedBody(_) => "Invalid request body.".to_owned(),
            Self::Invalid(err) => err.user_message(),
            Self::NotConfigured | Self::Delivery(_) => {
                "Something went wrong sending your message. Please try again later.".to_owned()
            }
        }
    }
}

/// Handle one form submission.
///
/// `config` is `None` when the deployment has no mail destination; that is
/// reported after validation so visitors still get field-level feedback.
pub fn handle(
    method: &str,
    body: &str,
    kind: FormKind,
    mailer: &dyn Mailer,
    config: Option<&MailerConfig>,
) -> HandlerResponse {
    match submit(method, body, kind, mailer, config) {
        Ok(()) => {
            tracing::info!(form = kind.as_str(), "submission delivered");
            HandlerResponse::ok(kind.success_message())
        }
        Err(err) => {
            let status = err.status();
            if status >= 500 {
                tracing::error!(form = kind.as_str(), status, error = %err, "submission failed");
            } else {
                tracing::debug!(form = kind.as_str(), status, error = %err, "submission rejected");
            }
            HandlerResponse::error(&err)
        }
    }
}

/// The fallible core of [`handle`].
pub fn submit(
    method: &str,
    body: &str,
    kind: FormKind,
    mailer: &dyn Mailer,
    config: Option<&MailerConfig>,
) -> Result<(), SubmitError> {
    if !method.eq_ignore_ascii_case("POST") {
        return Err(SubmitError::MethodNotAllowed(method.to_owned()));
    }
    match kind {
        FormKind::Contact => deliver(parse::<ContactRequest>(body)?, mailer, config),
        FormKind::GetStarted => deliver(parse::<ProjectBrief>(body)?, mailer, config),
    }
}

fn parse<F: DeserializeOwned>(body: &str) -> Result<F, SubmitError> {
    Ok(serde_json::from_str(body)?)
}

fn deliver<F: Validate + Compose>(
    form: F,
    mailer: &dyn Mailer,
    config: Option<&MailerConfig>,
) -> Result<(), SubmitError> {
    form.validate()?;
    let config = config.ok_or(SubmitError::NotConfigured)?;
    mailer.send(&form.compose(config))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(SubmitError::MethodNotAllowed("GET".into()).status(), 405);
        assert_eq!(SubmitError::NotConfigured.status(), 500);
        assert_eq!(
            SubmitError::Delivery(MailError::Rejected("spam".into())).status(),
            500
        );
        let bad_json = serde_json::from_str::<ContactRequest>("{").unwrap_err();
        assert_eq!(SubmitError::from(bad_json).status(), 400);
    }

    #[test]
    fn server_errors_hide_details() {
        let err = SubmitError::Delivery(MailError::Unavailable("smtp.internal:587".into()));
        assert!(!err.user_message().contains("smtp"));
        assert!(err.to_string().contains("smtp.internal"));
    }

    #[test]
    fn method_is_case_insensitive() {
        let mailer = crate::mailer::MockMailer::new();
        let err = submit("post", "{", FormKind::Contact, &mailer, None).unwrap_err();
        assert!(matches!(err, SubmitError::MalformedBody(_)));
    }
}
