// SPDX-License-Identifier: Apache-2.0
//! The [`Moment`]: the declarative diff every mutation operation returns.
//!
//! A moment describes "insert/overwrite these assets, remove these ids,
//! insert/overwrite these customer points". It is a value, not a command:
//! the external transaction/undo layer applies it back into the snapshot
//! (here, [`crate::network::Network::apply`] stands in for that layer).

use crate::asset::Asset;
use crate::curve::{Curve, Demand, EpsTiming};
use crate::customer::CustomerPoint;
use crate::ident::AssetId;

/// Declarative diff produced by one mutation operation.
///
/// Invariant: an id appears in both `put_assets` and `delete_assets` only
/// when the moment deliberately represents "delete the old variant, insert
/// a replacement under a different id" — the put/delete ids differ then, so
/// in practice the two lists never share an id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Moment {
    /// Human-readable description, shown in undo history.
    pub note: String,
    /// Assets to insert or overwrite.
    pub put_assets: Vec<Asset>,
    /// Asset ids to remove.
    pub delete_assets: Vec<AssetId>,
    /// Customer points to insert or overwrite.
    pub put_customer_points: Vec<CustomerPoint>,
    /// Curves to insert or overwrite.
    pub put_curves: Vec<Curve>,
    /// Demands to insert or overwrite (import pipeline only).
    pub put_demands: Vec<Demand>,
    /// Extended-period timing to replace (import pipeline only).
    pub put_eps_timing: Option<EpsTiming>,
}

/// Per-kind counts of a moment's entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MomentStats {
    /// Asset upserts.
    pub put_assets: usize,
    /// Asset removals.
    pub delete_assets: usize,
    /// Customer point upserts.
    pub customer_points: usize,
    /// Curve upserts.
    pub curves: usize,
}

impl Moment {
    /// Creates an empty moment with the given note.
    #[must_use]
    pub fn new(note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            ..Self::default()
        }
    }

    /// Emits an asset upsert. A later put of the same id replaces the
    /// earlier entry, so each id appears at most once.
    pub fn put_asset(&mut self, asset: Asset) {
        if let Some(existing) = self.put_assets.iter_mut().find(|a| a.id() == asset.id()) {
            *existing = asset;
        } else {
            self.put_assets.push(asset);
        }
    }

    /// Emits an asset removal (deduplicated).
    pub fn delete_asset(&mut self, id: AssetId) {
        if !self.delete_assets.contains(&id) {
            self.delete_assets.push(id);
        }
    }

    /// Emits a customer point upsert, replacing any earlier entry for the
    /// same id.
    pub fn put_customer_point(&mut self, point: CustomerPoint) {
        if let Some(existing) = self
            .put_customer_points
            .iter_mut()
            .find(|p| p.id == point.id)
        {
            *existing = point;
        } else {
            self.put_customer_points.push(point);
        }
    }

    /// Emits a curve upsert.
    pub fn put_curve(&mut self, curve: Curve) {
        self.put_curves.push(curve);
    }

    /// Looks up an asset already emitted into this moment.
    #[must_use]
    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.put_assets.iter().find(|a| a.id() == id)
    }

    /// Returns `true` when `id` has been emitted as an upsert.
    #[must_use]
    pub fn contains_asset(&self, id: AssetId) -> bool {
        self.asset(id).is_some()
    }

    /// Returns `true` when the moment carries no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.put_assets.is_empty()
            && self.delete_assets.is_empty()
            && self.put_customer_points.is_empty()
            && self.put_curves.is_empty()
            && self.put_demands.is_empty()
            && self.put_eps_timing.is_none()
    }

    /// Computes per-kind counts (used for operation tracing).
    #[must_use]
    pub fn stats(&self) -> MomentStats {
        MomentStats {
            put_assets: self.put_assets.len(),
            delete_assets: self.delete_assets.len(),
            customer_points: self.put_customer_points.len(),
            curves: self.put_curves.len(),
        }
    }
}
