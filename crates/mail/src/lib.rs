//! Outbound mail for Appli Farm.
//!
//! - [`delivery::email`] -- SMTP delivery of signup confirmation links.
//! - [`delivery::resend`] -- contact form forwarding through the Resend HTTP API.
//!
//! Both channels are optional. Their `from_env` constructors return `None`
//! when unconfigured, and callers fall back to logging.

pub mod delivery;

pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
pub use delivery::resend::{ResendClient, ResendConfig, ResendError};
