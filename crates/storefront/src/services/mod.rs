//! Outbound integrations.
//!
//! - `webhook` - Form relay to spreadsheet web apps

pub mod webhook;

pub use webhook::{SheetWebhook, WebhookError, WebhookKind};
