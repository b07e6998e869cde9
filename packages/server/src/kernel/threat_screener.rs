//! Threat screening backed by the Safe Browsing Lookup API.

use async_trait::async_trait;
use tracing::{error, info, warn};

use google_client::SafeBrowsingClient;

use crate::domains::analysis::models::ThreatVerdict;
use crate::kernel::BaseThreatScreener;

const UNREACHABLE_MESSAGE: &str = "Could not connect to Safe Browsing API.";
const INTERNAL_MESSAGE: &str = "An internal error occurred.";

/// Screens URLs with Safe Browsing and fails open.
///
/// Transport and HTTP failures become an `API_ERROR` verdict; anything else
/// (an unreadable response) becomes `CLIENT_ERROR`.
pub struct SafeBrowsingScreener {
    client: SafeBrowsingClient,
}

impl SafeBrowsingScreener {
    pub fn new(client: SafeBrowsingClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseThreatScreener for SafeBrowsingScreener {
    async fn check(&self, url: &str) -> ThreatVerdict {
        info!(url = %url, "Checking URL with Safe Browsing");

        match self.client.find_threat_matches(url).await {
            Ok(response) => match response.matches.into_iter().next() {
                Some(threat) => {
                    let verdict = ThreatVerdict::from_match(threat);
                    warn!(
                        url = %url,
                        threat_type = verdict.threat_type.as_str(),
                        "Safe Browsing reported a threat"
                    );
                    verdict
                }
                None => {
                    info!(url = %url, "URL is safe according to Safe Browsing");
                    ThreatVerdict::safe()
                }
            },
            Err(e) if e.is_transport() => {
                error!(url = %url, error = %e, "Safe Browsing request failed");
                ThreatVerdict::api_error(UNREACHABLE_MESSAGE)
            }
            Err(e) => {
                error!(url = %url, error = %e, "Unexpected Safe Browsing failure");
                ThreatVerdict::client_error(INTERNAL_MESSAGE)
            }
        }
    }
}
