#![forbid(unsafe_code)]

//! Contact and get-started form handling.
//!
//! # Role in reel
//! The agency site pairs its carousels with two forms. This crate turns a
//! raw submission into either a delivered email or a user-facing error:
//!
//! 1. parse the JSON body into a [`ContactRequest`] or [`ProjectBrief`],
//! 2. [`Validate`] it,
//! 3. [`Compose`] an [`Email`] with every user value HTML-escaped,
//! 4. hand it to a [`Mailer`].
//!
//! [`handle`] wraps the whole flow and maps failures to status codes.

pub mod email;
pub mod form;
pub mod handler;
pub mod mailer;
pub mod validate;

pub use email::{Compose, Email};
pub use form::{Budget, ContactRequest, ProjectBrief, Service};
pub use handler::{FormKind, HandlerResponse, SubmitError, handle, submit};
pub use mailer::{MailError, Mailer, MailerConfig, MockMailer};
pub use validate::{Problem, Validate, ValidationError};
