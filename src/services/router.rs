//! Backend failover router
//!
//! Holds no state of its own: the descriptor list and personality are
//! immutable snapshots supplied by the caller on every request. Attempts
//! descriptors strictly one at a time (active ones first, configuration
//! order preserved within each group) so the same conversation is never
//! in flight against two paid backends at once. Every per-descriptor
//! failure is recovered here; only total exhaustion reaches the caller.

use std::time::Instant;

use tracing::{info, warn};

use crate::adapters;
use crate::types::{
    BackendDescriptor, CanonicalResult, ConversationTurn, EmberError, PersonalitySettings, Result,
};

/// Route one conversation to the first backend that answers.
///
/// Latency on the returned result is measured from the start of the very
/// first attempt, so it includes the cost of earlier failed backends.
pub async fn send_message(
    descriptors: &[BackendDescriptor],
    personality: &PersonalitySettings,
    conversation: &[ConversationTurn],
) -> Result<CanonicalResult> {
    let started = Instant::now();
    let mut failures: Vec<(String, String)> = Vec::new();

    for descriptor in ordered(descriptors) {
        info!(
            "Trying AI backend: {} ({})",
            descriptor.name,
            descriptor.family.as_str()
        );

        match adapters::attempt_request(descriptor, personality, conversation).await {
            Ok(content) => {
                let latency_ms = started.elapsed().as_millis() as u64;
                info!("Success with {} ({}ms)", descriptor.name, latency_ms);
                return Ok(CanonicalResult {
                    content,
                    model: descriptor.model.clone().unwrap_or_default(),
                    family: descriptor.family,
                    latency_ms,
                });
            }
            Err(e) => {
                warn!("Failed with {}: {}", descriptor.name, e);
                failures.push((descriptor.name.clone(), e.to_string()));
            }
        }
    }

    let details = if failures.is_empty() {
        "no AI backends configured".to_string()
    } else {
        failures
            .iter()
            .map(|(name, error)| format!("{}: {}", name, error))
            .collect::<Vec<_>>()
            .join("\n")
    };

    Err(EmberError::AllBackendsFailed(details))
}

/// Attempt order: descriptors flagged active first, then the rest, each
/// group keeping its original configuration order.
fn ordered(descriptors: &[BackendDescriptor]) -> Vec<&BackendDescriptor> {
    let mut order: Vec<&BackendDescriptor> =
        descriptors.iter().filter(|d| d.is_active).collect();
    order.extend(descriptors.iter().filter(|d| !d.is_active));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BackendFamily, Tone};

    fn personality() -> PersonalitySettings {
        PersonalitySettings {
            level: 5,
            tone: Tone::Casual,
            verbose: false,
            system_prompt: None,
        }
    }

    #[test]
    fn test_active_descriptors_ordered_first() {
        let descriptors = vec![
            BackendDescriptor::new("A", BackendFamily::Local),
            BackendDescriptor::new("B", BackendFamily::CloudGenerative).active(true),
            BackendDescriptor::new("C", BackendFamily::OpenaiCompatible).active(true),
        ];

        let names: Vec<&str> = ordered(&descriptors)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ordering_is_stable_within_groups() {
        let descriptors = vec![
            BackendDescriptor::new("one", BackendFamily::Local).active(true),
            BackendDescriptor::new("two", BackendFamily::Local),
            BackendDescriptor::new("three", BackendFamily::Local).active(true),
            BackendDescriptor::new("four", BackendFamily::Local),
        ];

        let names: Vec<&str> = ordered(&descriptors)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["one", "three", "two", "four"]);
    }

    #[tokio::test]
    async fn test_all_misconfigured_aggregates_every_name_in_attempt_order() {
        // None of these carry required fields, so no network call is made.
        let descriptors = vec![
            BackendDescriptor::new("A", BackendFamily::Local),
            BackendDescriptor::new("B", BackendFamily::CloudGenerative).active(true),
            BackendDescriptor::new("C", BackendFamily::OpenaiCompatible).active(true),
        ];

        let err = send_message(&descriptors, &personality(), &[ConversationTurn::user("hi")])
            .await
            .unwrap_err();

        let EmberError::AllBackendsFailed(details) = err else {
            panic!("expected AllBackendsFailed");
        };
        assert!(details.contains("A:"));
        assert!(details.contains("B:"));
        assert!(details.contains("C:"));

        // Active backends B and C are reported before inactive A.
        let pos = |name: &str| details.find(name).unwrap();
        assert!(pos("B:") < pos("C:"));
        assert!(pos("C:") < pos("A:"));
    }

    #[tokio::test]
    async fn test_misconfiguration_is_reported_as_such() {
        let descriptors =
            vec![BackendDescriptor::new("lonely", BackendFamily::OpenaiCompatible)];

        let err = send_message(&descriptors, &personality(), &[ConversationTurn::user("hi")])
            .await
            .unwrap_err();

        assert!(err.to_string().contains("lonely"));
        assert!(err.to_string().contains("not configured"));
    }

    #[tokio::test]
    async fn test_empty_descriptor_list_fails() {
        let err = send_message(&[], &personality(), &[ConversationTurn::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, EmberError::AllBackendsFailed(_)));
    }
}
