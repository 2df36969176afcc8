// SPDX-License-Identifier: Apache-2.0
//! Derived adjacency index: node id → incident link ids.
//!
//! The index is owned and patched by the network container; operations see
//! it as a read-only query surface.

use rustc_hash::FxHashMap;

use crate::ident::AssetId;

/// Node → incident links adjacency.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    incident: FxHashMap<AssetId, Vec<AssetId>>,
}

impl Topology {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Link ids incident to `node`, in attachment order.
    #[must_use]
    pub fn links_at(&self, node: AssetId) -> &[AssetId] {
        self.incident.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Records `link` as incident to both `endpoints`.
    pub fn attach(&mut self, link: AssetId, endpoints: [AssetId; 2]) {
        for node in dedup_endpoints(endpoints) {
            let bucket = self.incident.entry(node).or_default();
            if !bucket.contains(&link) {
                bucket.push(link);
            }
        }
    }

    /// Removes `link` from both endpoint buckets, dropping buckets that
    /// become empty.
    pub fn detach(&mut self, link: AssetId, endpoints: [AssetId; 2]) {
        for node in dedup_endpoints(endpoints) {
            if let Some(bucket) = self.incident.get_mut(&node) {
                bucket.retain(|l| *l != link);
                if bucket.is_empty() {
                    self.incident.remove(&node);
                }
            }
        }
    }
}

/// Self-loops appear once per bucket, not twice.
fn dedup_endpoints([a, b]: [AssetId; 2]) -> impl Iterator<Item = AssetId> {
    let second = if a == b { None } else { Some(b) };
    core::iter::once(a).chain(second)
}
