// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic random streams.
//!
//! Every subsystem draws from its own generator, seeded from a SHA-256 digest
//! of `"{seed}:{subsystem}"`. Streams share no state, so adding a subsystem
//! or generating floors out of order never perturbs another stream.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use sha2::{Digest, Sha256};

/// Generator type handed out to subsystems.
pub type LayoutRng = Pcg64Mcg;

/// Derive the 64-bit seed for a named subsystem.
///
/// First eight bytes of the digest, little-endian.
pub fn subsystem_seed(seed: u64, subsystem: &str) -> u64 {
    let digest = Sha256::digest(format!("{seed}:{subsystem}").as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Independent, reproducible stream for `subsystem` under `seed`.
pub fn stream_for(seed: u64, subsystem: &str) -> LayoutRng {
    LayoutRng::seed_from_u64(subsystem_seed(seed, subsystem))
}

/// Subsystem key for the floorplan partitioner of one story.
pub fn floorplan_key(floor_index: u32) -> String {
    format!("floorplan:{floor_index}")
}

/// Subsystem key for window placement on one story.
pub fn windows_key(floor_index: u32) -> String {
    format!("windows:{floor_index}")
}
