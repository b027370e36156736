#![forbid(unsafe_code)]

//! Field validation for submitted forms.
//!
//! Validation runs before anything is sent. The first failing field wins;
//! its [`ValidationError`] message is shown to the visitor verbatim.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::form::{ContactRequest, ProjectBrief};

/// Longest accepted name.
pub const MAX_NAME_LEN: usize = 120;
/// Longest accepted free-text body.
pub const MAX_MESSAGE_LEN: usize = 5_000;
/// Longest accepted email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    /// Empty after trimming.
    Missing,
    /// Longer than the field allows.
    TooLong(usize),
    /// Not shaped like an email address.
    InvalidEmail,
    /// A list that needs at least one entry is empty.
    NoneSelected,
    /// A single-line field contains a line break or other control character.
    ControlCharacter,
}

/// A rejected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    /// Wire name of the field.
    pub field: &'static str,
    /// What is wrong with it.
    pub problem: Problem,
}

impl ValidationError {
    /// Message shown to the visitor.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.problem {
            Problem::Missing => format!("Please fill in the {} field.", self.field),
            Problem::TooLong(max) => {
                format!("The {} field must be at most {max} characters.", self.field)
            }
            Problem::InvalidEmail => "Please enter a valid email address.".to_owned(),
            Problem::NoneSelected => format!("Please select at least one of the {}.", self.field),
            Problem::ControlCharacter => {
                format!("The {} field must be a single line of text.", self.field)
            }
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for ValidationError {}

/// Something that can be checked before sending.
pub trait Validate {
    /// `Ok(())` if every field is acceptable.
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for ContactRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name, MAX_NAME_LEN)?;
        single_line("name", &self.name)?;
        email("email", &self.email)?;
        if let Some(phone) = &self.phone {
            bounded("phone", phone, 40)?;
            single_line("phone", phone)?;
        }
        required("message", &self.message, MAX_MESSAGE_LEN)
    }
}

impl Validate for ProjectBrief {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name, MAX_NAME_LEN)?;
        single_line("name", &self.name)?;
        email("email", &self.email)?;
        if let Some(company) = &self.company {
            bounded("company", company, MAX_NAME_LEN)?;
            single_line("company", company)?;
        }
        if self.services.is_empty() {
            return Err(ValidationError {
                field: "services",
                problem: Problem::NoneSelected,
            });
        }
        if let Some(timeline) = &self.timeline {
            bounded("timeline", timeline, MAX_NAME_LEN)?;
            single_line("timeline", timeline)?;
        }
        required("details", &self.details, MAX_MESSAGE_LEN)
    }
}

fn required(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError {
            field,
            problem: Problem::Missing,
        });
    }
    bounded(field, value, max)
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError {
            field,
            problem: Problem::TooLong(max),
        });
    }
    Ok(())
}

/// Values that end up in mail headers must not break lines.
fn single_line(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_control) {
        return Err(ValidationError {
            field,
            problem: Problem::ControlCharacter,
        });
    }
    Ok(())
}

fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    required(field, value, MAX_EMAIL_LEN)?;
    let valid = EMAIL.as_ref().is_some_and(|re| re.is_match(value));
    if valid {
        Ok(())
    } else {
        Err(ValidationError {
            field,
            problem: Problem::InvalidEmail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Budget, Service};

    fn contact() -> ContactRequest {
        ContactRequest {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: None,
            message: "We need a new site.".into(),
        }
    }

    fn brief() -> ProjectBrief {
        ProjectBrief {
            name: "Grace".into(),
            email: "grace@example.org".into(),
            company: Some("Navy".into()),
            services: vec![Service::WebDevelopment],
            budget: Budget::Over25k,
            timeline: None,
            details: "Rebuild".into(),
        }
    }

    #[test]
    fn valid_contact_passes() {
        assert_eq!(contact().validate(), Ok(()));
    }

    #[test]
    fn blank_name_is_missing() {
        let mut c = contact();
        c.name = "   ".into();
        let err = c.validate().unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.problem, Problem::Missing);
        assert_eq!(err.to_string(), "Please fill in the name field.");
    }

    #[test]
    fn malformed_email_rejected() {
        for bad in ["ada", "ada@", "ada@example", "a da@example.com", "@example.com"] {
            let mut c = contact();
            c.email = bad.into();
            assert_eq!(
                c.validate().unwrap_err().problem,
                Problem::InvalidEmail,
                "{bad}"
            );
        }
    }

    #[test]
    fn email_is_trimmed() {
        let mut c = contact();
        c.email = "  ada@example.com ".into();
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn overlong_message_rejected() {
        let mut c = contact();
        c.message = "x".repeat(MAX_MESSAGE_LEN + 1);
        assert_eq!(
            c.validate().unwrap_err().problem,
            Problem::TooLong(MAX_MESSAGE_LEN)
        );
    }

    #[test]
    fn line_breaks_rejected_in_single_line_fields() {
        let mut c = contact();
        c.name = "Eve\r\nBcc: victim@example.com".into();
        let err = c.validate().unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.problem, Problem::ControlCharacter);

        let mut c = contact();
        c.phone = Some("555\t0100".into());
        assert_eq!(c.validate().unwrap_err().field, "phone");

        let mut b = brief();
        b.company = Some("Navy\nInc".into());
        assert_eq!(b.validate().unwrap_err().problem, Problem::ControlCharacter);

        // Multi-line bodies stay allowed.
        let mut c = contact();
        c.message = "line one\nline two".into();
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn brief_requires_a_service() {
        let mut b = brief();
        assert_eq!(b.validate(), Ok(()));
        b.services.clear();
        let err = b.validate().unwrap_err();
        assert_eq!(err.field, "services");
        assert!(err.user_message().contains("at least one"));
    }
}
