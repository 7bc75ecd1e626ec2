//! Local endpoint discovery
//!
//! Best-effort scan for locally running AI servers. Probes the cross
//! product of known product signatures and local hostname aliases,
//! short-circuiting each signature on its first answering alias (one
//! instance is assumed to answer on at most one alias). Probe failures
//! are silent; a product that never answers is simply absent from the
//! report.

mod probe;
mod signatures;

pub use probe::{extract_models, probe};
pub use signatures::{EndpointSignature, LOCAL_HOSTS, SIGNATURES, UNKNOWN_MODELS_PLACEHOLDER};

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::types::DiscoveredEndpoint;

/// Per-probe deadline. Local servers answer in milliseconds; anything
/// slower is treated as not running.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Scan well-known local ports for running AI servers.
///
/// Signatures are probed concurrently (one task each) but the report is
/// assembled in signature table order, so callers see a deterministic
/// ranking regardless of which probe finished first.
pub async fn scan_for_local_backends() -> Vec<DiscoveredEndpoint> {
    let client = match Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(c) => c,
        Err(e) => {
            // A client without the probe deadline is worse than no scan.
            warn!("Failed to build HTTP client for discovery: {}", e);
            return Vec::new();
        }
    };

    info!("Scanning for local AI backends");

    let handles: Vec<_> = SIGNATURES
        .iter()
        .map(|signature| {
            let client = client.clone();
            let signature = *signature;
            tokio::spawn(async move { scan_signature(&client, &signature).await })
        })
        .collect();

    let mut detected = Vec::new();
    for handle in handles {
        if let Ok(Some(hit)) = handle.await {
            info!(
                "Detected {} at {} ({} models)",
                hit.name,
                hit.endpoint,
                hit.models.len()
            );
            detected.push(hit);
        }
    }

    detected
}

/// Try each local hostname alias for one signature, stopping at the
/// first hit.
async fn scan_signature(
    client: &Client,
    signature: &EndpointSignature,
) -> Option<DiscoveredEndpoint> {
    for host in LOCAL_HOSTS {
        let base_url = format!("http://{}:{}", host, signature.port);
        debug!("Probing {} at {}", signature.name, base_url);

        if let Some(hit) = probe::probe(client, &base_url, signature).await {
            return Some(hit);
        }
    }

    None
}
