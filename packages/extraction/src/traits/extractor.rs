//! Content extractor trait.

use async_trait::async_trait;

/// Fetches a page and yields its visible plain text.
///
/// Implementations must never fail past this boundary: any network, status,
/// content-type, size or parse problem is reported as `None`. Callers are
/// expected to have screened `url` with [`crate::UrlValidator`] first.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Fetch `url` and return its extracted text, or `None` when there is
    /// nothing usable.
    async fn extract(&self, url: &str) -> Option<String>;

    /// Get the extractor name (for logging/debugging).
    fn name(&self) -> &str;
}
