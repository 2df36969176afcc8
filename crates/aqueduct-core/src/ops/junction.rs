// SPDX-License-Identifier: Apache-2.0
//! Junction assignment for customer points.

use aqueduct_geom::{distance, LonLat};

use crate::asset::Asset;
use crate::ident::AssetId;

/// Picks which of a link's two endpoints should serve a customer point
/// snapped at `snap`.
///
/// Only junction nodes are eligible (reservoirs and tanks cannot serve
/// demand). With no junction endpoint the result is `None` and the point
/// stays disconnected; with one, that one wins unconditionally; with two,
/// the closer to `snap` wins. Exact ties keep the start node — current
/// behavior to preserve, not a guaranteed contract.
#[must_use]
pub fn junction_for_customer_point(start: &Asset, end: &Asset, snap: LonLat) -> Option<AssetId> {
    match (start.as_junction(), end.as_junction()) {
        (None, None) => None,
        (Some(j), None) => Some(j.id),
        (None, Some(j)) => Some(j.id),
        (Some(s), Some(e)) => {
            let to_start = distance(snap, s.coordinates);
            let to_end = distance(snap, e.coordinates);
            Some(if to_end < to_start { e.id } else { s.id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Junction, Reservoir};

    fn junction(id: u64, lon: f64) -> Asset {
        Asset::Junction(Junction {
            id: AssetId(id),
            label: String::new(),
            is_active: true,
            coordinates: LonLat::new(lon, 0.0),
            elevation: 0.0,
        })
    }

    fn reservoir(id: u64, lon: f64) -> Asset {
        Asset::Reservoir(Reservoir {
            id: AssetId(id),
            label: String::new(),
            is_active: true,
            coordinates: LonLat::new(lon, 0.0),
            head: 0.0,
        })
    }

    #[test]
    fn closer_junction_wins() {
        let a = junction(1, 0.0);
        let b = junction(2, 10.0);
        assert_eq!(
            junction_for_customer_point(&a, &b, LonLat::new(1.0, 0.0)),
            Some(AssetId(1))
        );
        assert_eq!(
            junction_for_customer_point(&a, &b, LonLat::new(9.0, 0.0)),
            Some(AssetId(2))
        );
    }

    #[test]
    fn exact_tie_keeps_start_node() {
        let a = junction(1, 0.0);
        let b = junction(2, 10.0);
        assert_eq!(
            junction_for_customer_point(&a, &b, LonLat::new(5.0, 0.0)),
            Some(AssetId(1))
        );
    }

    #[test]
    fn sole_junction_wins_regardless_of_distance() {
        let r = reservoir(1, 0.0);
        let j = junction(2, 10.0);
        assert_eq!(
            junction_for_customer_point(&r, &j, LonLat::new(0.1, 0.0)),
            Some(AssetId(2))
        );
    }

    #[test]
    fn no_junction_endpoint_yields_none() {
        let r = reservoir(1, 0.0);
        let t = reservoir(2, 10.0);
        assert_eq!(junction_for_customer_point(&r, &t, LonLat::new(5.0, 0.0)), None);
    }
}
