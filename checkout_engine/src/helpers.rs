//! Odds and ends used across the engine.
use chrono::Utc;
use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::db_types::ExternalRef;

/// Generates a fresh correlation token for a checkout.
///
/// A millisecond timestamp alone can collide when two checkouts land in the same tick, so an 8-character random
/// alphanumeric suffix is appended. The `ref-` prefix makes the tokens easy to spot in gateway dashboards.
pub fn generate_external_ref() -> ExternalRef {
    let suffix: String = thread_rng().sample_iter(&Alphanumeric).take(8).map(char::from).collect();
    ExternalRef(format!("ref-{}-{suffix}", Utc::now().timestamp_millis()))
}
