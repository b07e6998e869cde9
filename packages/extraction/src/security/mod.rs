//! SSRF protection for user-submitted URLs.

pub mod validator;

pub use validator::UrlValidator;
