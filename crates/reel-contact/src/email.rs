#![forbid(unsafe_code)]

//! Turning a validated form into an outgoing email.
//!
//! Every user-supplied value is HTML-escaped before it reaches the HTML part.
//! The plain-text part carries the raw values.

use std::fmt::Write as _;

use v_htmlescape::escape;

use crate::form::{ContactRequest, ProjectBrief};
use crate::mailer::MailerConfig;

/// A fully composed message, ready for a [`Mailer`](crate::mailer::Mailer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Sender address (the agency's verified sender).
    pub from: String,
    /// Recipient address (the agency inbox).
    pub to: String,
    /// The visitor's address.
    pub reply_to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    /// HTML body.
    pub html: String,
}

/// A form that can be rendered into an [`Email`].
pub trait Compose {
    /// Render for delivery to `config.to`.
    fn compose(&self, config: &MailerConfig) -> Email;
}

struct Rows<'a>(Vec<(&'static str, &'a str)>);

impl Rows<'_> {
    fn text(&self) -> String {
        let mut out = String::new();
        for (label, value) in &self.0 {
            let _ = writeln!(out, "{label}: {value}");
        }
        out
    }

    fn html(&self, heading: &str) -> String {
        let mut out = format!("<h2>{}</h2>\n<table>\n", escape(heading));
        for (label, value) in &self.0 {
            let value = escape(value).to_string().replace('\n', "<br>");
            let _ = writeln!(out, "<tr><th align=\"left\">{label}</th><td>{value}</td></tr>");
        }
        out.push_str("</table>\n");
        out
    }
}

impl Compose for ContactRequest {
    fn compose(&self, config: &MailerConfig) -> Email {
        let mut rows = vec![("Name", self.name.trim()), ("Email", self.email.trim())];
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            rows.push(("Phone", phone.trim()));
        }
        rows.push(("Message", self.message.trim()));
        let rows = Rows(rows);

        Email {
            from: config.from.clone(),
            to: config.to.clone(),
            reply_to: self.email.trim().to_owned(),
            subject: format!("New contact message from {}", self.name.trim()),
            text: rows.text(),
            html: rows.html("New contact message"),
        }
    }
}

impl Compose for ProjectBrief {
    fn compose(&self, config: &MailerConfig) -> Email {
        let services = self
            .services
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ");
        let mut rows = vec![("Name", self.name.trim()), ("Email", self.email.trim())];
        if let Some(company) = self.company.as_deref().filter(|c| !c.trim().is_empty()) {
            rows.push(("Company", company.trim()));
        }
        rows.push(("Services", services.as_str()));
        rows.push(("Budget", self.budget.label()));
        if let Some(timeline) = self.timeline.as_deref().filter(|t| !t.trim().is_empty()) {
            rows.push(("Timeline", timeline.trim()));
        }
        rows.push(("Details", self.details.trim()));
        let rows = Rows(rows);

        let subject = match self.company.as_deref().map(str::trim) {
            Some(company) if !company.is_empty() => {
                format!("New project inquiry from {} ({company})", self.name.trim())
            }
            _ => format!("New project inquiry from {}", self.name.trim()),
        };

        Email {
            from: config.from.clone(),
            to: config.to.clone(),
            reply_to: self.email.trim().to_owned(),
            subject,
            text: rows.text(),
            html: rows.html("New project inquiry"),
        }
    }
}
