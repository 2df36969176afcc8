// SPDX-License-Identifier: Apache-2.0
//! aqueduct-core: topology and mutation engine for hydraulic network models.
//!
//! A [`Network`] holds the current snapshot of an EPANET-style water
//! distribution model: node assets (junctions, reservoirs, tanks), link
//! assets (pipes, pumps, valves), customer demand points, and the derived
//! adjacency index. Mutation operations are methods on the network that
//! leave the snapshot untouched and return a [`Moment`], a self-contained
//! diff of upserts and deletions; [`Network::apply`] folds a moment back in.
//! This keeps every edit undoable and the snapshot deterministic.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

mod asset;
mod constants;
mod curve;
mod customer;
mod ident;
mod label;
mod moment;
mod network;
mod ops;
mod topology;

/// Asset variants and their shared accessor surface.
pub use asset::{
    Asset, AssetType, Junction, LinkStatus, Pipe, Pump, Reservoir, Tank, Valve, ValveKind,
};
/// Engine-wide defaults and limits.
pub use constants::{
    DEFAULT_PIPE_DIAMETER_MM, DEFAULT_PIPE_ROUGHNESS, DEFAULT_PUMP_CURVE_POINT,
    DEFAULT_VALVE_DIAMETER_MM, DUPLICATE_VERTEX_SPACING_M, MAX_LABEL_LEN,
};
/// Pump curves, junction demands, and extended-period timing.
pub use curve::{Curve, CurvePoint, Demand, EpsTiming};
/// Customer demand points and their pipe connections.
pub use customer::{CustomerConnection, CustomerPoint};
/// Identifier newtypes and the shared allocator.
pub use ident::{AssetId, CurveId, CustomerPointId, IdAllocator};
/// Label bookkeeping: uniqueness per asset type, gap-filling generation.
pub use label::{LabelError, LabelManager};
/// The change diff produced by every operation.
pub use moment::{Moment, MomentStats};
/// The network container and its query/build/apply surface.
pub use network::Network;
/// Operation inputs, errors, and the shared predicates.
pub use ops::{
    infer_node_is_active, junction_for_customer_point, AddLink, ConnectCustomers, LinkEndpoint,
    OpError, ReplaceLink, SplitPipe,
};
/// Derived link-at-node adjacency.
pub use topology::Topology;

/// Spatial primitives re-exported from the geometry crate.
pub use aqueduct_geom::{
    collapse_near_vertices, distance, nearest_point_on_polyline, nearest_point_on_segment,
    polyline_length, LonLat, NearestPoint,
};
