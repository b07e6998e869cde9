//! Content extractor implementations.
//!
//! - `HttpExtractor` - bounded HTTP fetch + visible-text extraction
//! - `MockExtractor` (in [`crate::testing`]) - for testing

mod html;
mod http;

pub use html::visible_text;
pub use http::{HttpExtractor, HttpExtractorConfig};
