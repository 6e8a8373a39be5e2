//! Outbound email notifications.
//!
//! The only consumer today is the review retention sweep, which warns an
//! author before their hidden review is purged. Delivery is strictly
//! best-effort: callers log failures and move on.

pub mod mailer;

pub use mailer::{MailError, Mailer, MailerConfig};
