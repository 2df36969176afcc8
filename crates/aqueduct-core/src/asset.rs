// SPDX-License-Identifier: Apache-2.0
//! Network asset value types.
//!
//! Assets are plain values with copy-on-write discipline: operations clone
//! the snapshot's asset, mutate the clone, and emit it through a
//! [`crate::moment::Moment`]. Nothing in this module mutates shared state.

use core::fmt;

use aqueduct_geom::{polyline_length, LonLat};

use crate::ident::{AssetId, CurveId};

/// The six asset variants of a hydraulic network.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssetType {
    /// Demand node.
    Junction,
    /// Infinite source node (fixed head).
    Reservoir,
    /// Storage node with levels.
    Tank,
    /// Conveyance link.
    Pipe,
    /// Head-adding link.
    Pump,
    /// Controlled link.
    Valve,
}

impl AssetType {
    /// Label prefix used by the label allocator ("P3", "J12", ...).
    #[must_use]
    pub fn label_prefix(self) -> &'static str {
        match self {
            Self::Junction => "J",
            Self::Reservoir => "R",
            Self::Tank => "T",
            Self::Pipe => "P",
            Self::Pump => "PU",
            Self::Valve => "V",
        }
    }

    /// Returns `true` for link variants (Pipe, Pump, Valve).
    #[must_use]
    pub fn is_link(self) -> bool {
        matches!(self, Self::Pipe | Self::Pump | Self::Valve)
    }

    /// Returns `true` for node variants (Junction, Reservoir, Tank).
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_link()
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Junction => "junction",
            Self::Reservoir => "reservoir",
            Self::Tank => "tank",
            Self::Pipe => "pipe",
            Self::Pump => "pump",
            Self::Valve => "valve",
        };
        f.write_str(name)
    }
}

/// Initial operational status of a link.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkStatus {
    /// Link conveys flow.
    #[default]
    Open,
    /// Link is shut.
    Closed,
}

/// Demand node.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Junction {
    /// Process-unique id.
    pub id: AssetId,
    /// Human-readable label; empty until assigned.
    pub label: String,
    /// Whether the node participates in the active topology.
    pub is_active: bool,
    /// Node position.
    pub coordinates: LonLat,
    /// Elevation in meters.
    pub elevation: f64,
}

/// Fixed-head source node.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reservoir {
    /// Process-unique id.
    pub id: AssetId,
    /// Human-readable label; empty until assigned.
    pub label: String,
    /// Whether the node participates in the active topology.
    pub is_active: bool,
    /// Node position.
    pub coordinates: LonLat,
    /// Total head in meters.
    pub head: f64,
}

/// Storage node.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tank {
    /// Process-unique id.
    pub id: AssetId,
    /// Human-readable label; empty until assigned.
    pub label: String,
    /// Whether the node participates in the active topology.
    pub is_active: bool,
    /// Node position.
    pub coordinates: LonLat,
    /// Bottom elevation in meters.
    pub elevation: f64,
    /// Initial water level above the bottom, meters.
    pub init_level: f64,
    /// Minimum water level, meters.
    pub min_level: f64,
    /// Maximum water level, meters.
    pub max_level: f64,
    /// Tank diameter in meters.
    pub diameter: f64,
}

/// Conveyance link.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pipe {
    /// Process-unique id.
    pub id: AssetId,
    /// Human-readable label; empty until assigned.
    pub label: String,
    /// Whether the link participates in the active topology.
    pub is_active: bool,
    /// Ordered endpoint node ids.
    pub connections: [AssetId; 2],
    /// Polyline geometry. The first/last vertex must equal the endpoint
    /// node coordinates.
    pub vertices: Vec<LonLat>,
    /// Diameter in millimeters.
    pub diameter: f64,
    /// Roughness coefficient (Hazen-Williams C).
    pub roughness: f64,
    /// Minor loss coefficient.
    pub minor_loss: f64,
    /// Initial operational status.
    pub initial_status: LinkStatus,
    /// Length in meters, derived from the geometry.
    pub length: f64,
}

impl Pipe {
    /// Replaces the geometry and recomputes `length` from it.
    pub fn set_vertices(&mut self, vertices: Vec<LonLat>) {
        self.length = polyline_length(&vertices);
        self.vertices = vertices;
    }

    /// Copies the copyable hydraulic properties (diameter, roughness, minor
    /// loss, initial status) from another pipe. Geometry and length are
    /// untouched.
    pub fn copy_hydraulics_from(&mut self, other: &Pipe) {
        self.diameter = other.diameter;
        self.roughness = other.roughness;
        self.minor_loss = other.minor_loss;
        self.initial_status = other.initial_status;
    }
}

/// Head-adding link.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pump {
    /// Process-unique id.
    pub id: AssetId,
    /// Human-readable label; empty until assigned.
    pub label: String,
    /// Whether the link participates in the active topology.
    pub is_active: bool,
    /// Ordered endpoint node ids.
    pub connections: [AssetId; 2],
    /// Polyline geometry.
    pub vertices: Vec<LonLat>,
    /// Initial operational status.
    pub initial_status: LinkStatus,
    /// Performance curve, if one has been attached.
    pub curve: Option<CurveId>,
}

/// Kind of control valve.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValveKind {
    /// Pressure reducing valve.
    #[default]
    Prv,
    /// Pressure sustaining valve.
    Psv,
    /// Flow control valve.
    Fcv,
    /// Throttle control valve.
    Tcv,
}

/// Controlled link.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Valve {
    /// Process-unique id.
    pub id: AssetId,
    /// Human-readable label; empty until assigned.
    pub label: String,
    /// Whether the link participates in the active topology.
    pub is_active: bool,
    /// Ordered endpoint node ids.
    pub connections: [AssetId; 2],
    /// Polyline geometry.
    pub vertices: Vec<LonLat>,
    /// Diameter in millimeters.
    pub diameter: f64,
    /// Minor loss coefficient.
    pub minor_loss: f64,
    /// Control kind.
    pub kind: ValveKind,
    /// Control setting (meaning depends on `kind`).
    pub setting: f64,
    /// Initial operational status.
    pub initial_status: LinkStatus,
}

/// A network asset: any node or link variant.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Asset {
    /// Demand node.
    Junction(Junction),
    /// Fixed-head source node.
    Reservoir(Reservoir),
    /// Storage node.
    Tank(Tank),
    /// Conveyance link.
    Pipe(Pipe),
    /// Head-adding link.
    Pump(Pump),
    /// Controlled link.
    Valve(Valve),
}

impl Asset {
    /// Process-unique id of the asset.
    #[must_use]
    pub fn id(&self) -> AssetId {
        match self {
            Self::Junction(a) => a.id,
            Self::Reservoir(a) => a.id,
            Self::Tank(a) => a.id,
            Self::Pipe(a) => a.id,
            Self::Pump(a) => a.id,
            Self::Valve(a) => a.id,
        }
    }

    /// Variant discriminant.
    #[must_use]
    pub fn asset_type(&self) -> AssetType {
        match self {
            Self::Junction(_) => AssetType::Junction,
            Self::Reservoir(_) => AssetType::Reservoir,
            Self::Tank(_) => AssetType::Tank,
            Self::Pipe(_) => AssetType::Pipe,
            Self::Pump(_) => AssetType::Pump,
            Self::Valve(_) => AssetType::Valve,
        }
    }

    /// Human-readable label (may be empty before assignment).
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Junction(a) => &a.label,
            Self::Reservoir(a) => &a.label,
            Self::Tank(a) => &a.label,
            Self::Pipe(a) => &a.label,
            Self::Pump(a) => &a.label,
            Self::Valve(a) => &a.label,
        }
    }

    /// Replaces the label.
    pub fn set_label(&mut self, label: String) {
        match self {
            Self::Junction(a) => a.label = label,
            Self::Reservoir(a) => a.label = label,
            Self::Tank(a) => a.label = label,
            Self::Pipe(a) => a.label = label,
            Self::Pump(a) => a.label = label,
            Self::Valve(a) => a.label = label,
        }
    }

    /// Whether the asset participates in the active topology.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Junction(a) => a.is_active,
            Self::Reservoir(a) => a.is_active,
            Self::Tank(a) => a.is_active,
            Self::Pipe(a) => a.is_active,
            Self::Pump(a) => a.is_active,
            Self::Valve(a) => a.is_active,
        }
    }

    /// Sets the active flag.
    pub fn set_active(&mut self, active: bool) {
        match self {
            Self::Junction(a) => a.is_active = active,
            Self::Reservoir(a) => a.is_active = active,
            Self::Tank(a) => a.is_active = active,
            Self::Pipe(a) => a.is_active = active,
            Self::Pump(a) => a.is_active = active,
            Self::Valve(a) => a.is_active = active,
        }
    }

    /// Returns `true` for link variants.
    #[must_use]
    pub fn is_link(&self) -> bool {
        self.asset_type().is_link()
    }

    /// Returns `true` for node variants.
    #[must_use]
    pub fn is_node(&self) -> bool {
        self.asset_type().is_node()
    }

    /// Ordered endpoint pair for links; `None` for nodes.
    #[must_use]
    pub fn connections(&self) -> Option<[AssetId; 2]> {
        match self {
            Self::Pipe(a) => Some(a.connections),
            Self::Pump(a) => Some(a.connections),
            Self::Valve(a) => Some(a.connections),
            _ => None,
        }
    }

    /// Replaces the endpoint pair. No-op for nodes.
    pub fn set_connections(&mut self, connections: [AssetId; 2]) {
        match self {
            Self::Pipe(a) => a.connections = connections,
            Self::Pump(a) => a.connections = connections,
            Self::Valve(a) => a.connections = connections,
            _ => {}
        }
    }

    /// Polyline geometry for links; `None` for nodes.
    #[must_use]
    pub fn vertices(&self) -> Option<&[LonLat]> {
        match self {
            Self::Pipe(a) => Some(&a.vertices),
            Self::Pump(a) => Some(&a.vertices),
            Self::Valve(a) => Some(&a.vertices),
            _ => None,
        }
    }

    /// Replaces the geometry. Pipes recompute their length. No-op for nodes.
    pub fn set_vertices(&mut self, vertices: Vec<LonLat>) {
        match self {
            Self::Pipe(a) => a.set_vertices(vertices),
            Self::Pump(a) => a.vertices = vertices,
            Self::Valve(a) => a.vertices = vertices,
            _ => {}
        }
    }

    /// Position for nodes; `None` for links.
    #[must_use]
    pub fn coordinates(&self) -> Option<LonLat> {
        match self {
            Self::Junction(a) => Some(a.coordinates),
            Self::Reservoir(a) => Some(a.coordinates),
            Self::Tank(a) => Some(a.coordinates),
            _ => None,
        }
    }

    /// Returns `true` when this asset is a link with `node` as an endpoint.
    #[must_use]
    pub fn connects_to(&self, node: AssetId) -> bool {
        self.connections()
            .is_some_and(|[a, b]| a == node || b == node)
    }

    /// Borrow as a pipe, when it is one.
    #[must_use]
    pub fn as_pipe(&self) -> Option<&Pipe> {
        match self {
            Self::Pipe(a) => Some(a),
            _ => None,
        }
    }

    /// Borrow as a junction, when it is one.
    #[must_use]
    pub fn as_junction(&self) -> Option<&Junction> {
        match self {
            Self::Junction(a) => Some(a),
            _ => None,
        }
    }

    /// Swaps the endpoint pair and reverses the vertex order. No-op for
    /// nodes; hydraulic properties are untouched.
    pub fn reverse(&mut self) {
        if let Some([a, b]) = self.connections() {
            self.set_connections([b, a]);
        }
        match self {
            Self::Pipe(p) => p.vertices.reverse(),
            Self::Pump(p) => p.vertices.reverse(),
            Self::Valve(p) => p.vertices.reverse(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_swaps_connections_and_vertices() {
        let mut asset = Asset::Pipe(Pipe {
            id: AssetId(1),
            label: "P1".into(),
            is_active: true,
            connections: [AssetId(2), AssetId(3)],
            vertices: vec![
                LonLat::new(0.0, 0.0),
                LonLat::new(0.5, 0.1),
                LonLat::new(1.0, 0.0),
            ],
            diameter: 300.0,
            roughness: 130.0,
            minor_loss: 0.0,
            initial_status: LinkStatus::Open,
            length: 0.0,
        });
        asset.reverse();
        assert_eq!(asset.connections(), Some([AssetId(3), AssetId(2)]));
        let verts = asset.vertices().map(<[LonLat]>::to_vec);
        assert_eq!(
            verts,
            Some(vec![
                LonLat::new(1.0, 0.0),
                LonLat::new(0.5, 0.1),
                LonLat::new(0.0, 0.0),
            ])
        );
    }

    #[test]
    fn pipe_set_vertices_recomputes_length() {
        let mut pipe = Pipe {
            id: AssetId(1),
            label: String::new(),
            is_active: true,
            connections: [AssetId(2), AssetId(3)],
            vertices: vec![],
            diameter: 300.0,
            roughness: 130.0,
            minor_loss: 0.0,
            initial_status: LinkStatus::Open,
            length: 0.0,
        };
        pipe.set_vertices(vec![LonLat::new(0.0, 0.0), LonLat::new(1.0, 0.0)]);
        assert!(pipe.length > 100_000.0, "one degree at the equator");
    }
}
