//! Magic-link login and bearer sessions
//!
//! - [`magic_link`] - Single-use, time-limited login tokens
//! - [`session`] - Bearer credentials with server-side revocation
//! - [`mailer`] - Link delivery seam

pub mod mailer;
pub mod magic_link;
pub mod session;

#[cfg(test)]
pub mod tests;

pub use mailer::{LinkMailer, LogMailer};
pub use magic_link::{MagicLink, MagicLinkIssuer};
pub use session::{Session, SessionStore};

use rand::RngCore;

use crate::constants::TOKEN_BYTES;

/// Fresh random token, hex encoded
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Link the user clicks to verify a token
pub fn verification_url(frontend_url: &str, token: &str) -> String {
    format!(
        "{}/auth/verify?token={}",
        frontend_url.trim_end_matches('/'),
        token
    )
}
