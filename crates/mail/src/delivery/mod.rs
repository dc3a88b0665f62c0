//! External delivery channels.

pub mod email;
pub mod resend;
