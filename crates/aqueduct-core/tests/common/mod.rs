// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

use aqueduct_core::{
    Asset, AssetId, CustomerPoint, CustomerPointId, LonLat, Network,
};

/// West endpoint of the fixture pipe.
pub const J1_AT: LonLat = LonLat::new(0.0, 0.0);
/// East endpoint, roughly 111 m away along the equator.
pub const J2_AT: LonLat = LonLat::new(0.001, 0.0);
/// Midpoint of the fixture pipe.
pub const MID_AT: LonLat = LonLat::new(0.0005, 0.0);

/// A network with junctions `J1`/`J2` and pipe `P1` between them.
/// Returns `(network, j1, j2, p1)`.
pub fn net_with_pipe() -> (Network, AssetId, AssetId, AssetId) {
    let mut net = Network::new();
    let mut j1 = net.build_junction(J1_AT);
    j1.label = "J1".into();
    let mut j2 = net.build_junction(J2_AT);
    j2.label = "J2".into();
    let (a, b) = (j1.id, j2.id);
    net.insert(Asset::Junction(j1));
    net.insert(Asset::Junction(j2));
    let mut pipe = net.build_pipe(a, b, vec![J1_AT, J2_AT]);
    pipe.label = "P1".into();
    let p = pipe.id;
    net.insert(Asset::Pipe(pipe));
    (net, a, b, p)
}

/// Seeds a disconnected customer point with the given raw id.
pub fn seed_customer(net: &mut Network, id: u64, at: LonLat) -> CustomerPointId {
    let point = CustomerPoint {
        id: CustomerPointId(id),
        coordinates: at,
        base_demand: 0.4,
        connection: None,
    };
    net.insert_customer_point(point);
    CustomerPointId(id)
}

/// Seeds a customer point already attached to `pipe` at `snap`, served by
/// `junction`.
pub fn seed_connected_customer(
    net: &mut Network,
    id: u64,
    at: LonLat,
    pipe: AssetId,
    snap: LonLat,
    junction: AssetId,
) -> CustomerPointId {
    let point = CustomerPoint {
        id: CustomerPointId(id),
        coordinates: at,
        base_demand: 0.4,
        connection: None,
    }
    .connected(pipe, snap, junction);
    net.insert_customer_point(point);
    CustomerPointId(id)
}

/// Label of the asset with the given id, panicking when absent.
pub fn label_of(net: &Network, id: AssetId) -> String {
    net.asset(id).map(|a| a.label().to_owned()).unwrap_or_default()
}
