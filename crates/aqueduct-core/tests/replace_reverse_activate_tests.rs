// SPDX-License-Identifier: Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Replace-link, reverse-link, and activation cascades.

mod common;

use aqueduct_core::{
    Asset, AssetId, LinkEndpoint, LonLat, Network, OpError, ReplaceLink,
};
use common::{net_with_pipe, seed_connected_customer, J1_AT, J2_AT, MID_AT};

#[test]
fn reverse_swaps_endpoints_and_vertex_run() {
    let (mut net, j1, j2, p1) = net_with_pipe();

    let moment = net.reverse_link(p1).unwrap();
    // The snapshot is untouched until the moment is applied.
    assert_eq!(net.require_pipe(p1).unwrap().connections, [j1, j2]);
    net.apply(&moment);

    let pipe = net.require_pipe(p1).unwrap();
    assert_eq!(pipe.connections, [j2, j1]);
    assert_eq!(pipe.vertices, vec![J2_AT, J1_AT]);
}

#[test]
fn reverse_of_a_node_is_rejected() {
    let (net, j1, _, _) = net_with_pipe();
    let err = net.reverse_link(j1).unwrap_err();
    assert!(matches!(err, OpError::NotALink { .. }));
}

#[test]
fn replacement_must_match_source_kind() {
    let (mut net, j1, j2, p1) = net_with_pipe();
    let start = net.asset(j1).unwrap().clone();
    let end = net.asset(j2).unwrap().clone();
    let pump = Asset::Pump(net.build_pump(j1, j2, Vec::new()));

    let err = net
        .replace_link(ReplaceLink {
            source: p1,
            link: pump,
            start: LinkEndpoint::new(start),
            end: LinkEndpoint::new(end),
        })
        .unwrap_err();
    assert!(matches!(err, OpError::LinkKindMismatch { .. }));
}

#[test]
fn replace_moves_customers_onto_the_new_pipe() {
    let (mut net, j1, j2, p1) = net_with_pipe();
    let cp = seed_connected_customer(
        &mut net,
        1,
        LonLat::new(0.0002, 0.0001),
        p1,
        LonLat::new(0.0002, 0.0),
        j1,
    );
    let start = net.asset(j1).unwrap().clone();
    let end = net.asset(j2).unwrap().clone();
    // Replacement takes a northern detour through MID but keeps the ends.
    let detour = net.build_pipe(
        j1,
        j2,
        vec![J1_AT, LonLat::new(0.0005, 0.0003), J2_AT],
    );

    let moment = net
        .replace_link(ReplaceLink {
            source: p1,
            link: Asset::Pipe(detour),
            start: LinkEndpoint::new(start),
            end: LinkEndpoint::new(end),
        })
        .unwrap();
    net.apply(&moment);

    assert!(net.asset(p1).is_none());
    let replacement = net.asset_by_label("P2").unwrap().id();
    let conn = net.customer_point(cp).unwrap().connection.unwrap();
    assert_eq!(conn.pipe, replacement);
    assert_eq!(conn.junction, j1);
}

#[test]
fn replace_preserves_source_activation() {
    let (mut net, j1, j2, p1) = net_with_pipe();
    let Some(mut inactive) = net.asset(p1).cloned() else {
        panic!("pipe missing");
    };
    inactive.set_active(false);
    net.insert(inactive);
    let start = net.asset(j1).unwrap().clone();
    let end = net.asset(j2).unwrap().clone();
    let mut fresh = net.build_pipe(j1, j2, Vec::new());
    fresh.is_active = true;

    let moment = net
        .replace_link(ReplaceLink {
            source: p1,
            link: Asset::Pipe(fresh),
            start: LinkEndpoint::new(start),
            end: LinkEndpoint::new(end),
        })
        .unwrap();
    net.apply(&moment);

    let replacement = net.asset_by_label("P2").unwrap();
    assert!(!replacement.is_active());
}

#[test]
fn activating_a_link_reactivates_its_endpoints() {
    let (mut net, j1, j2, p1) = net_with_pipe();
    for id in [p1, j1, j2] {
        let Some(mut asset) = net.asset(id).cloned() else {
            panic!("asset missing");
        };
        asset.set_active(false);
        net.insert(asset);
    }

    let moment = net.activate_assets(&[p1]).unwrap();
    net.apply(&moment);

    assert_eq!(moment.put_assets.len(), 3);
    for id in [p1, j1, j2] {
        assert!(net.asset(id).unwrap().is_active());
    }
}

#[test]
fn node_ids_in_activation_input_are_skipped() {
    let (net, j1, _, _) = net_with_pipe();
    let moment = net.activate_assets(&[j1]).unwrap();
    assert!(moment.is_empty());
}

#[test]
fn activation_with_unknown_id_is_fatal() {
    let (net, _, _, p1) = net_with_pipe();
    let err = net.activate_assets(&[p1, AssetId(404)]).unwrap_err();
    assert_eq!(err, OpError::InvalidAssetId(AssetId(404)));
}

#[test]
fn already_active_link_produces_no_updates() {
    let (net, _, _, p1) = net_with_pipe();
    let moment = net.activate_assets(&[p1]).unwrap();
    assert!(moment.is_empty());
}

#[test]
fn add_node_assigns_label_and_orphan_activation() {
    let mut net = Network::new();
    let mut junction = net.build_junction(MID_AT);
    junction.is_active = false;
    let moment = net.add_node(Asset::Junction(junction)).unwrap();
    net.apply(&moment);

    let node = net.asset_by_label("J1").unwrap();
    // Orphans come out active regardless of the caller's flag.
    assert!(node.is_active());
}
