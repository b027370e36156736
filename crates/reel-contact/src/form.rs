#![forbid(unsafe_code)]

//! Form records as submitted by the site's contact and get-started pages.
//!
//! Field names on the wire are camelCase, matching the page scripts.

use serde::{Deserialize, Serialize};

/// The short "contact us" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    /// Sender's name.
    pub name: String,
    /// Sender's reply address.
    pub email: String,
    /// Optional phone number, free-form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Message body.
    pub message: String,
}

/// A service the prospect is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    /// Visual and UX design.
    WebDesign,
    /// Site build.
    WebDevelopment,
    /// Logo and identity work.
    Branding,
    /// Search optimization.
    Seo,
    /// Online store.
    Ecommerce,
    /// Ongoing support.
    Maintenance,
}

impl Service {
    /// Human-readable label used in emails.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WebDesign => "Web design",
            Self::WebDevelopment => "Web development",
            Self::Branding => "Branding",
            Self::Seo => "SEO",
            Self::Ecommerce => "E-commerce",
            Self::Maintenance => "Maintenance",
        }
    }
}

/// Budget bracket picked on the get-started form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Budget {
    /// Less than 5k.
    #[serde(rename = "under-5k")]
    Under5k,
    /// 5k to 10k.
    #[serde(rename = "5k-10k")]
    From5kTo10k,
    /// 10k to 25k.
    #[serde(rename = "10k-25k")]
    From10kTo25k,
    /// More than 25k.
    #[serde(rename = "25k-plus")]
    Over25k,
    /// Undecided.
    #[default]
    #[serde(rename = "not-sure")]
    NotSure,
}

impl Budget {
    /// Human-readable label used in emails.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under5k => "Under $5k",
            Self::From5kTo10k => "$5k - $10k",
            Self::From10kTo25k => "$10k - $25k",
            Self::Over25k => "$25k+",
            Self::NotSure => "Not sure yet",
        }
    }
}

/// The longer "get started" project brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBrief {
    /// Prospect's name.
    pub name: String,
    /// Prospect's reply address.
    pub email: String,
    /// Company, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Services of interest. At least one is required.
    #[serde(default)]
    pub services: Vec<Service>,
    /// Budget bracket.
    #[serde(default)]
    pub budget: Budget,
    /// Desired timeline, free-form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    /// Project description.
    pub details: String,
}
