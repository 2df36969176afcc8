// SPDX-License-Identifier: Apache-2.0
//! The network container: asset and customer collections, the derived
//! topology index, the label manager, and the id allocator.
//!
//! The container stands in for the external model owner described by the
//! operation contract: it exposes the read-only query surface operations
//! need, the asset builders that fill in defaults, and [`Network::apply`],
//! which plays the role of the transaction/undo layer by folding a returned
//! [`Moment`] back into the snapshot.

use std::collections::BTreeMap;

use aqueduct_geom::LonLat;

use crate::asset::{
    Asset, AssetType, Junction, LinkStatus, Pipe, Pump, Reservoir, Tank, Valve, ValveKind,
};
use crate::constants::{
    DEFAULT_PIPE_DIAMETER_MM, DEFAULT_PIPE_ROUGHNESS, DEFAULT_VALVE_DIAMETER_MM,
};
use crate::curve::{Curve, Demand, EpsTiming};
use crate::customer::CustomerPoint;
use crate::ident::{AssetId, CurveId, CustomerPointId, IdAllocator};
use crate::label::LabelManager;
use crate::moment::Moment;
use crate::ops::OpError;
use crate::topology::Topology;

/// In-memory network snapshot plus the container-owned mutable services
/// (label manager, id allocator).
///
/// Collections are `BTreeMap`s so iteration order is deterministic. Mutation
/// operations read the collections and only mutate the label/id services;
/// all asset changes round-trip through a [`Moment`] and [`Network::apply`].
#[derive(Clone, Debug, Default)]
pub struct Network {
    assets: BTreeMap<AssetId, Asset>,
    customers: BTreeMap<CustomerPointId, CustomerPoint>,
    curves: BTreeMap<CurveId, Curve>,
    demands: BTreeMap<AssetId, Demand>,
    eps_timing: Option<EpsTiming>,
    topology: Topology,
    pub(crate) labels: LabelManager,
    pub(crate) ids: IdAllocator,
}

impl Network {
    /// Creates an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Query surface ────────────────────────────────────────────────

    /// Looks up an asset by id.
    #[must_use]
    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(&id)
    }

    /// Looks up an asset by label (linear scan; test and tooling seam).
    #[must_use]
    pub fn asset_by_label(&self, label: &str) -> Option<&Asset> {
        self.assets.values().find(|a| a.label() == label)
    }

    /// Looks up a customer point by id.
    #[must_use]
    pub fn customer_point(&self, id: CustomerPointId) -> Option<&CustomerPoint> {
        self.customers.get(&id)
    }

    /// Looks up a curve by id.
    #[must_use]
    pub fn curve(&self, id: CurveId) -> Option<&Curve> {
        self.curves.get(&id)
    }

    /// Looks up the base demand entry for a junction.
    #[must_use]
    pub fn demand(&self, junction: AssetId) -> Option<&Demand> {
        self.demands.get(&junction)
    }

    /// The derived adjacency index.
    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The label manager.
    #[must_use]
    pub fn labels(&self) -> &LabelManager {
        &self.labels
    }

    /// Extended-period timing, when set.
    #[must_use]
    pub fn eps_timing(&self) -> Option<&EpsTiming> {
        self.eps_timing.as_ref()
    }

    /// Iterates assets in ascending id order.
    pub fn iter_assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    /// Iterates customer points in ascending id order.
    pub fn iter_customer_points(&self) -> impl Iterator<Item = &CustomerPoint> {
        self.customers.values()
    }

    /// Customer points currently attached to `pipe`, cloned out of the
    /// snapshot in ascending id order.
    #[must_use]
    pub fn customer_points_on_pipe(&self, pipe: AssetId) -> Vec<CustomerPoint> {
        self.customers
            .values()
            .filter(|p| p.is_on_pipe(pipe))
            .cloned()
            .collect()
    }

    /// Resolves an asset id or fails with the invalid-reference error.
    ///
    /// # Errors
    ///
    /// [`OpError::InvalidAssetId`] when the id is unknown.
    pub fn require_asset(&self, id: AssetId) -> Result<&Asset, OpError> {
        self.assets.get(&id).ok_or(OpError::InvalidAssetId(id))
    }

    /// Resolves an id that must be a link variant.
    ///
    /// # Errors
    ///
    /// [`OpError::InvalidAssetId`] when unknown, [`OpError::NotALink`] when
    /// the asset is a node.
    pub fn require_link(&self, id: AssetId) -> Result<&Asset, OpError> {
        let asset = self.require_asset(id)?;
        if asset.is_link() {
            Ok(asset)
        } else {
            Err(OpError::NotALink {
                id,
                found: asset.asset_type(),
            })
        }
    }

    /// Resolves an id that must be a pipe.
    ///
    /// # Errors
    ///
    /// [`OpError::PipeNotFound`] when unknown, [`OpError::NotAPipe`] when the
    /// asset is some other variant.
    pub fn require_pipe(&self, id: AssetId) -> Result<&Pipe, OpError> {
        let asset = self.assets.get(&id).ok_or(OpError::PipeNotFound(id))?;
        asset.as_pipe().ok_or(OpError::NotAPipe {
            id,
            found: asset.asset_type(),
        })
    }

    /// Resolves a customer point id.
    ///
    /// # Errors
    ///
    /// [`OpError::InvalidCustomerPointId`] when the id is unknown.
    pub fn require_customer_point(&self, id: CustomerPointId) -> Result<&CustomerPoint, OpError> {
        self.customers
            .get(&id)
            .ok_or(OpError::InvalidCustomerPointId(id))
    }

    /// Resolves both endpoint nodes of a link.
    ///
    /// # Errors
    ///
    /// Propagates [`OpError::InvalidAssetId`] / [`OpError::NotALink`] from
    /// resolution of the link or its endpoints.
    pub fn link_endpoints(&self, link: AssetId) -> Result<(&Asset, &Asset), OpError> {
        let asset = self.require_link(link)?;
        let [a, b] = asset.connections().unwrap_or([link, link]);
        Ok((self.require_asset(a)?, self.require_asset(b)?))
    }

    // ── Asset construction (defaults) ────────────────────────────────

    /// Builds a junction with defaults at `at`. The label stays empty until
    /// an operation assigns one.
    pub fn build_junction(&mut self, at: LonLat) -> Junction {
        Junction {
            id: self.ids.next_asset(),
            label: String::new(),
            is_active: true,
            coordinates: at,
            elevation: 0.0,
        }
    }

    /// Builds a reservoir with defaults at `at`.
    pub fn build_reservoir(&mut self, at: LonLat) -> Reservoir {
        Reservoir {
            id: self.ids.next_asset(),
            label: String::new(),
            is_active: true,
            coordinates: at,
            head: 0.0,
        }
    }

    /// Builds a tank with defaults at `at`.
    pub fn build_tank(&mut self, at: LonLat) -> Tank {
        Tank {
            id: self.ids.next_asset(),
            label: String::new(),
            is_active: true,
            coordinates: at,
            elevation: 0.0,
            init_level: 10.0,
            min_level: 0.0,
            max_level: 20.0,
            diameter: 15.0,
        }
    }

    /// Builds a pipe between `start` and `end` with default hydraulics;
    /// length is computed from `vertices`.
    pub fn build_pipe(&mut self, start: AssetId, end: AssetId, vertices: Vec<LonLat>) -> Pipe {
        let mut pipe = Pipe {
            id: self.ids.next_asset(),
            label: String::new(),
            is_active: true,
            connections: [start, end],
            vertices: Vec::new(),
            diameter: DEFAULT_PIPE_DIAMETER_MM,
            roughness: DEFAULT_PIPE_ROUGHNESS,
            minor_loss: 0.0,
            initial_status: LinkStatus::Open,
            length: 0.0,
        };
        pipe.set_vertices(vertices);
        pipe
    }

    /// Builds a pump between `start` and `end` with no curve attached yet.
    pub fn build_pump(&mut self, start: AssetId, end: AssetId, vertices: Vec<LonLat>) -> Pump {
        Pump {
            id: self.ids.next_asset(),
            label: String::new(),
            is_active: true,
            connections: [start, end],
            vertices,
            initial_status: LinkStatus::Open,
            curve: None,
        }
    }

    /// Builds a valve between `start` and `end` with defaults.
    pub fn build_valve(&mut self, start: AssetId, end: AssetId, vertices: Vec<LonLat>) -> Valve {
        Valve {
            id: self.ids.next_asset(),
            label: String::new(),
            is_active: true,
            connections: [start, end],
            vertices,
            diameter: DEFAULT_VALVE_DIAMETER_MM,
            minor_loss: 0.0,
            kind: ValveKind::default(),
            setting: 0.0,
            initial_status: LinkStatus::Open,
        }
    }

    // ── Seeding and Moment application ───────────────────────────────

    /// Inserts an asset directly (import/test seam): registers its label and
    /// patches the topology.
    pub fn insert(&mut self, asset: Asset) {
        self.upsert_asset(asset);
    }

    /// Inserts a customer point directly (import/test seam).
    pub fn insert_customer_point(&mut self, point: CustomerPoint) {
        self.customers.insert(point.id, point);
    }

    /// Applies a moment back into the snapshot: removals first, then
    /// upserts. This is the container-side half of the operation contract;
    /// a real embedding would do the same from its undo/transaction layer.
    pub fn apply(&mut self, moment: &Moment) {
        for id in &moment.delete_assets {
            self.remove_asset(*id);
        }
        for asset in &moment.put_assets {
            self.upsert_asset(asset.clone());
        }
        for point in &moment.put_customer_points {
            self.customers.insert(point.id, point.clone());
        }
        for curve in &moment.put_curves {
            self.curves.insert(curve.id, curve.clone());
        }
        for demand in &moment.put_demands {
            self.demands.insert(demand.junction, demand.clone());
        }
        if let Some(timing) = moment.put_eps_timing {
            self.eps_timing = Some(timing);
        }
    }

    fn upsert_asset(&mut self, asset: Asset) {
        let id = asset.id();
        if let Some(old) = self.assets.get(&id) {
            if let Some(endpoints) = old.connections() {
                self.topology.detach(id, endpoints);
            }
            if old.label() != asset.label() && !old.label().is_empty() {
                self.labels.remove(old.label(), old.asset_type(), id);
            }
        }
        if let Some(endpoints) = asset.connections() {
            self.topology.attach(id, endpoints);
        }
        if !asset.label().is_empty() {
            // Idempotent when the operation already registered it.
            self.labels.register(asset.label(), asset.asset_type(), id);
        }
        self.assets.insert(id, asset);
    }

    fn remove_asset(&mut self, id: AssetId) {
        let Some(asset) = self.assets.remove(&id) else {
            return;
        };
        if let Some(endpoints) = asset.connections() {
            self.topology.detach(id, endpoints);
        }
        if !asset.label().is_empty() {
            self.labels.remove(asset.label(), asset.asset_type(), id);
        }
        if asset.asset_type() == AssetType::Junction {
            self.demands.remove(&id);
        }
    }
}
