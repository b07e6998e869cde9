//! Fact reference lookup backed by the Fact Check Tools API.

use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use google_client::{Claim, FactCheckClient};

use crate::domains::analysis::models::FactReference;
use crate::kernel::BaseFactChecker;

/// Searches published fact-checks and fails soft.
pub struct GoogleFactChecker {
    client: FactCheckClient,
}

impl GoogleFactChecker {
    pub fn new(client: FactCheckClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseFactChecker for GoogleFactChecker {
    async fn search(&self, query: &str, limit: usize) -> Vec<FactReference> {
        info!(query = %query, limit, "Searching for fact checks");

        match self.client.search_claims(query, limit).await {
            Ok(response) => {
                let references = references_from_claims(response.claims, limit);
                info!(query = %query, found = references.len(), "Fact check search complete");
                references
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Fact check search failed, continuing without references");
                Vec::new()
            }
        }
    }
}

/// Convert claims to references, in order.
///
/// Only the first review of each claim is considered, and only when it names
/// a publisher, a title, a rating and a parseable review URL.
pub fn references_from_claims(claims: Vec<Claim>, limit: usize) -> Vec<FactReference> {
    claims
        .into_iter()
        .filter_map(|claim| {
            let review = claim.claim_review.into_iter().next()?;
            Some(FactReference {
                publisher: review.publisher?.name?,
                claim: review.title?,
                rating: review.textual_rating?,
                review_url: Url::parse(review.url.as_deref()?).ok()?,
            })
        })
        .take(limit)
        .collect()
}
