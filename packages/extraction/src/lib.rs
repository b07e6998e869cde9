//! URL Screening and Content Extraction Library
//!
//! Turns a user-submitted URL into plain text that is safe to analyze:
//!
//! 1. [`UrlValidator`] rejects non-HTTP(S) schemes and any hostname that
//!    resolves into a private, loopback, link-local or reserved range.
//! 2. [`HttpExtractor`] fetches the page under a timeout, a content-type check
//!    and a hard byte cap, then reduces the HTML body to visible text.
//!
//! # Usage
//!
//! ```rust,ignore
//! use extraction::{ContentExtractor, HttpExtractor, UrlValidator};
//!
//! let validator = UrlValidator::new();
//! let url = validator.validate("https://example.com/").await?;
//!
//! let extractor = HttpExtractor::new()?;
//! match extractor.extract(&url).await {
//!     Some(text) => println!("{} chars", text.len()),
//!     None => println!("nothing to analyze"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (ContentExtractor, DnsResolver)
//! - [`security`] - SSRF protection
//! - [`extractors`] - Extractor implementations (HttpExtractor)
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod extractors;
pub mod security;
pub mod testing;
pub mod traits;

// Re-export core types at crate root
pub use error::{ExtractError, ExtractResult, SecurityError, SecurityResult};
pub use extractors::{visible_text, HttpExtractor, HttpExtractorConfig};
pub use security::UrlValidator;
pub use traits::{
    extractor::ContentExtractor,
    resolver::{DnsResolver, SystemResolver},
};

// Re-export testing utilities
pub use testing::{MockExtractor, StaticResolver};
