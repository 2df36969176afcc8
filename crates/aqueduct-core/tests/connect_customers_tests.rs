// SPDX-License-Identifier: Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Batch customer connection: junction assignment and soft failures.

mod common;

use aqueduct_core::{Asset, ConnectCustomers, CustomerPointId, LonLat, Network, OpError};
use common::{net_with_pipe, seed_customer, J1_AT, J2_AT};

#[test]
fn each_point_gets_the_nearest_junction() {
    let (mut net, j1, j2, p1) = net_with_pipe();
    let west = seed_customer(&mut net, 1, LonLat::new(0.0002, 0.0001));
    let east = seed_customer(&mut net, 2, LonLat::new(0.0008, 0.0001));

    let moment = net
        .connect_customers(&ConnectCustomers {
            customer_points: vec![west, east],
            pipe: p1,
            snap_points: vec![LonLat::new(0.0002, 0.0), LonLat::new(0.0008, 0.0)],
        })
        .unwrap();
    assert_eq!(moment.note, "Connect customers");
    net.apply(&moment);

    let west_conn = net.customer_point(west).unwrap().connection.unwrap();
    let east_conn = net.customer_point(east).unwrap().connection.unwrap();
    assert_eq!(west_conn.pipe, p1);
    assert_eq!(west_conn.junction, j1);
    assert_eq!(east_conn.junction, j2);
    assert_eq!(west_conn.snap, LonLat::new(0.0002, 0.0));
}

#[test]
fn mismatched_array_lengths_are_rejected() {
    let (mut net, _, _, p1) = net_with_pipe();
    let cp = seed_customer(&mut net, 1, J1_AT);

    let err = net
        .connect_customers(&ConnectCustomers {
            customer_points: vec![cp],
            pipe: p1,
            snap_points: Vec::new(),
        })
        .unwrap_err();
    assert_eq!(err, OpError::ShapeMismatch { points: 1, snaps: 0 });
}

#[test]
fn pipe_without_junction_endpoints_leaves_points_disconnected() {
    let mut net = Network::new();
    let mut r1 = net.build_reservoir(J1_AT);
    r1.label = "R1".into();
    let mut r2 = net.build_reservoir(J2_AT);
    r2.label = "R2".into();
    let (a, b) = (r1.id, r2.id);
    net.insert(Asset::Reservoir(r1));
    net.insert(Asset::Reservoir(r2));
    let pipe = net.build_pipe(a, b, vec![J1_AT, J2_AT]);
    let p = pipe.id;
    net.insert(Asset::Pipe(pipe));
    let cp = seed_customer(&mut net, 1, LonLat::new(0.0005, 0.0001));

    // Soft failure: the call succeeds, the point stays unallocated.
    let moment = net
        .connect_customers(&ConnectCustomers {
            customer_points: vec![cp],
            pipe: p,
            snap_points: vec![LonLat::new(0.0005, 0.0)],
        })
        .unwrap();
    net.apply(&moment);

    assert!(net.customer_point(cp).unwrap().connection.is_none());
}

#[test]
fn unknown_customer_point_is_fatal() {
    let (net, _, _, p1) = net_with_pipe();
    let err = net
        .connect_customers(&ConnectCustomers {
            customer_points: vec![CustomerPointId(42)],
            pipe: p1,
            snap_points: vec![J1_AT],
        })
        .unwrap_err();
    assert_eq!(err, OpError::InvalidCustomerPointId(CustomerPointId(42)));
}
