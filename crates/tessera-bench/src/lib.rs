//! Benchmark profiles for the Tessera attribute store.
//!
//! Provides pre-built registries for benchmarking:
//!
//! - [`reference_profile`]: 10K striped blocks (~100K entries per attribute)
//! - [`stress_profile`]: 100K striped blocks (~1M entries per attribute)
//! - [`scattered_entries`]: deterministic lookup targets inside a domain

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tessera_core::{EntryId, RangeSet};
use tessera_store::AttributeRegistry;
use tessera_test_utils::fixtures::particle_registry;

/// Split grain used by both profiles.
pub const PROFILE_GRAIN: usize = 4096;

/// Build the reference benchmark registry: 10K blocks of the particle
/// layout (`position`, `mass`, `species`).
pub fn reference_profile() -> AttributeRegistry {
    particle_registry(10_000, PROFILE_GRAIN)
}

/// Build the stress benchmark registry: same layout at 10x the blocks.
pub fn stress_profile() -> AttributeRegistry {
    particle_registry(100_000, PROFILE_GRAIN)
}

/// Pick `n` member entries of `domain` in a deterministic scattered
/// order, for random-access benchmarks.
///
/// Uses a multiplicative stride over the member ranks so successive
/// targets jump across intervals in both directions.
pub fn scattered_entries(domain: &RangeSet, n: usize, seed: u64) -> Vec<EntryId> {
    let members: Vec<EntryId> = domain.entries().collect();
    if members.is_empty() {
        return Vec::new();
    }
    let len = members.len() as u64;
    (0..n as u64)
        .map(|i| {
            let rank = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(i.wrapping_mul(1442695040888963407))
                % len;
            members[rank as usize]
        })
        .collect()
}
