#![forbid(unsafe_code)]

//! The delivery seam.
//!
//! No email provider lives in this crate. Deployments implement [`Mailer`]
//! over their transactional email API; tests use [`MockMailer`].

use std::sync::{Mutex, PoisonError};

use crate::email::Email;

/// Environment variable holding the inbox that receives submissions.
pub const ENV_TO: &str = "REEL_CONTACT_TO";
/// Environment variable holding the verified sender address.
pub const ENV_FROM: &str = "REEL_CONTACT_FROM";

/// Where submissions are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerConfig {
    /// Agency inbox.
    pub to: String,
    /// Verified sender.
    pub from: String,
}

impl MailerConfig {
    /// Explicit configuration.
    #[must_use]
    pub fn new(to: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
        }
    }

    /// Read [`ENV_TO`] and [`ENV_FROM`]. Returns the name of the first
    /// missing or empty variable on failure.
    pub fn from_env() -> Result<Self, &'static str> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, &'static str> {
        let get = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or(key)
        };
        Ok(Self {
            to: get(ENV_TO)?,
            from: get(ENV_FROM)?,
        })
    }
}

/// Failure reported by a delivery backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailError {
    /// The provider refused the message.
    #[error("provider rejected message: {0}")]
    Rejected(String),
    /// The provider could not be reached.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Sends composed emails.
pub trait Mailer {
    /// Deliver one message.
    fn send(&self, email: &Email) -> Result<(), MailError>;
}

/// Records every message; optionally fails every send.
#[derive(Debug, Default)]
pub struct MockMailer {
    sent: Mutex<Vec<Email>>,
    failure: Option<MailError>,
}

impl MockMailer {
    /// A mailer that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer that fails every send with `error`.
    #[must_use]
    pub fn failing(error: MailError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    /// Messages accepted so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Email> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Mailer for MockMailer {
    fn send(&self, email: &Email) -> Result<(), MailError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_requires_both_variables() {
        let only_to = |key: &str| (key == ENV_TO).then(|| "inbox@agency.test".to_owned());
        assert_eq!(MailerConfig::from_lookup(only_to), Err(ENV_FROM));
        assert_eq!(MailerConfig::from_lookup(|_| None), Err(ENV_TO));
    }

    #[test]
    fn lookup_rejects_blank_values() {
        let blank = |_: &str| Some("   ".to_owned());
        assert_eq!(MailerConfig::from_lookup(blank), Err(ENV_TO));
    }

    #[test]
    fn lookup_trims_values() {
        let config = MailerConfig::from_lookup(|key: &str| {
            Some(if key == ENV_TO { " to@a.test " } else { "from@a.test" }.to_owned())
        })
        .unwrap();
        assert_eq!(config, MailerConfig::new("to@a.test", "from@a.test"));
    }

    #[test]
    fn mock_records_and_fails() {
        let email = Email {
            from: "a".into(),
            to: "b".into(),
            reply_to: "c".into(),
            subject: "s".into(),
            text: "t".into(),
            html: "h".into(),
        };
        let ok = MockMailer::new();
        ok.send(&email).unwrap();
        assert_eq!(ok.sent(), vec![email.clone()]);

        let bad = MockMailer::failing(MailError::Unavailable("timeout".into()));
        assert!(bad.send(&email).is_err());
        assert!(bad.sent().is_empty());
    }
}
