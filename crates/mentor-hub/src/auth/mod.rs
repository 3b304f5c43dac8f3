//! Request authentication.
//!
//! Tokens are HS256 JWTs accepted from an `Authorization: Bearer` header (mobile
//! clients) or the session cookie (web). A validated token becomes a [`Principal`]
//! that handlers receive as an extractor and pass on explicitly.

mod claims;
mod error;
mod principal;

pub use claims::{Claims, Role};
pub use error::AuthError;
pub use principal::{AuthState, Principal};
