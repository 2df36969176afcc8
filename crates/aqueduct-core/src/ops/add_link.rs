// SPDX-License-Identifier: Apache-2.0
//! Add-link: insert a new link between two endpoint nodes, optionally
//! splicing either endpoint into an existing pipe, replacing a duplicated
//! short pipe, and emitting a default pump curve.

use aqueduct_geom::{collapse_near_vertices, nearest_point_on_polyline, LonLat};
use tracing::debug;

use crate::asset::{Asset, AssetType, Pipe};
use crate::constants::{DEFAULT_PUMP_CURVE_POINT, DUPLICATE_VERTEX_SPACING_M};
use crate::curve::Curve;
use crate::ident::AssetId;
use crate::moment::Moment;
use crate::network::Network;
use crate::ops::active::infer_node_is_active;
use crate::ops::junction::junction_for_customer_point;
use crate::ops::OpError;

/// One endpoint of a new link: the node asset, and optionally the id of an
/// existing pipe the node should be spliced into.
#[derive(Clone, Debug)]
pub struct LinkEndpoint {
    /// Endpoint node (may be brand new or an existing node's copy).
    pub node: Asset,
    /// Existing pipe this endpoint falls on, to be split there.
    pub splice_pipe: Option<AssetId>,
}

impl LinkEndpoint {
    /// Endpoint with no splice.
    #[must_use]
    pub fn new(node: Asset) -> Self {
        Self {
            node,
            splice_pipe: None,
        }
    }

    /// Endpoint spliced into `pipe`.
    #[must_use]
    pub fn spliced(node: Asset, pipe: AssetId) -> Self {
        Self {
            node,
            splice_pipe: Some(pipe),
        }
    }
}

/// Input for [`Network::add_link`].
#[derive(Clone, Debug)]
pub struct AddLink {
    /// The link to insert (label may be empty).
    pub link: Asset,
    /// Start endpoint.
    pub start: LinkEndpoint,
    /// End endpoint.
    pub end: LinkEndpoint,
}

impl Network {
    /// Inserts a new link between two endpoint nodes.
    ///
    /// Labels are assigned where missing; the link's geometry is snapped to
    /// the endpoint coordinates and consecutive vertices within one meter
    /// are collapsed. Activation of the endpoints goes through
    /// [`infer_node_is_active`] (plus the activity of any spliced pipe).
    /// Endpoints tagged with a splice pipe split that pipe in place; both
    /// endpoints on the same pipe split it once at both points. A ≤2-vertex
    /// link duplicating an existing pipe between the same endpoints inherits
    /// that pipe's hydraulics and replaces it. A pump gets a default
    /// single-point performance curve.
    ///
    /// # Errors
    ///
    /// Invalid references, wrong asset variants, or label overflow.
    pub fn add_link(&mut self, input: AddLink) -> Result<Moment, OpError> {
        let mut moment = Moment::new("Add link");
        let link_id = self.insert_link(&mut moment, input, true)?;
        let stats = moment.stats();
        debug!(
            link = %link_id,
            puts = stats.put_assets,
            deletes = stats.delete_assets,
            "add link"
        );
        Ok(moment)
    }

    /// Shared insertion pipeline for add-link and replace-link. Returns the
    /// inserted link's id. `replace_overlap` enables the duplicate-pipe
    /// replacement rule (add-link only).
    pub(crate) fn insert_link(
        &mut self,
        moment: &mut Moment,
        input: AddLink,
        replace_overlap: bool,
    ) -> Result<AssetId, OpError> {
        let AddLink { mut link, start, end } = input;
        if !link.is_link() {
            return Err(OpError::NotALink {
                id: link.id(),
                found: link.asset_type(),
            });
        }
        let LinkEndpoint {
            node: mut start_node,
            splice_pipe: start_splice,
        } = start;
        let LinkEndpoint {
            node: mut end_node,
            splice_pipe: end_splice,
        } = end;
        for node in [&start_node, &end_node] {
            if !node.is_node() {
                return Err(OpError::NotANode {
                    id: node.id(),
                    found: node.asset_type(),
                });
            }
        }
        // Fail fast on dangling splice references.
        for splice in [start_splice, end_splice].into_iter().flatten() {
            self.require_pipe(splice)?;
        }

        self.assign_label(&mut link);
        self.assign_label(&mut start_node);
        self.assign_label(&mut end_node);

        let start_id = start_node.id();
        let end_id = end_node.id();
        link.set_connections([start_id, end_id]);

        // Snap the geometry to the endpoints, then thin near-duplicates.
        let start_at = start_node.coordinates().unwrap_or_default();
        let end_at = end_node.coordinates().unwrap_or_default();
        let mut verts: Vec<LonLat> = link.vertices().map(<[LonLat]>::to_vec).unwrap_or_default();
        if verts.len() < 2 {
            verts = vec![start_at, end_at];
        } else {
            verts[0] = start_at;
            let last = verts.len() - 1;
            verts[last] = end_at;
        }
        link.set_vertices(collapse_near_vertices(&verts, DUPLICATE_VERTEX_SPACING_M));

        // Endpoint activation: the single inference predicate, plus the
        // activity of the pipe an endpoint splices into.
        let proposed = core::slice::from_ref(&link);
        let start_active = self.splice_is_active(start_splice)
            || infer_node_is_active(self, start_id, &[], proposed);
        let end_active =
            self.splice_is_active(end_splice) || infer_node_is_active(self, end_id, &[], proposed);
        start_node.set_active(start_active);
        end_node.set_active(end_active);

        // Endpoints must be visible to the splice machinery's customer
        // re-homing before the splits run.
        moment.put_asset(start_node.clone());
        moment.put_asset(end_node.clone());

        if replace_overlap && link.vertices().map_or(0, <[LonLat]>::len) <= 2 {
            self.replace_overlapping_pipe(
                moment,
                &mut link,
                &start_node,
                &end_node,
                [start_splice, end_splice],
            );
        }

        if let Asset::Pump(pump) = &mut link {
            if pump.curve.is_none() {
                let curve = Curve {
                    id: self.ids.next_curve(),
                    points: vec![DEFAULT_PUMP_CURVE_POINT],
                };
                pump.curve = Some(curve.id);
                moment.put_curve(curve);
            }
        }

        match (start_splice, end_splice) {
            (Some(a), Some(b)) if a == b => {
                // Both endpoints fall on the same pipe: one pass, two splits.
                self.split_existing_pipe(
                    moment,
                    a,
                    &[(start_id, start_at), (end_id, end_at)],
                )?;
            }
            (start_splice, end_splice) => {
                if let Some(a) = start_splice {
                    self.split_existing_pipe(moment, a, &[(start_id, start_at)])?;
                }
                if let Some(b) = end_splice {
                    self.split_existing_pipe(moment, b, &[(end_id, end_at)])?;
                }
            }
        }

        let link_id = link.id();
        moment.put_asset(link);
        Ok(link_id)
    }

    fn splice_is_active(&self, splice: Option<AssetId>) -> bool {
        splice
            .and_then(|id| self.asset(id))
            .is_some_and(Asset::is_active)
    }

    /// A short new link duplicating an existing pipe between the same two
    /// endpoints inherits its hydraulics and replaces it; customer points on
    /// the replaced pipe move to the new link (or go disconnected when the
    /// new link is not a pipe).
    fn replace_overlapping_pipe(
        &mut self,
        moment: &mut Moment,
        link: &mut Asset,
        start_node: &Asset,
        end_node: &Asset,
        splices: [Option<AssetId>; 2],
    ) {
        let [a, b] = [start_node.id(), end_node.id()];
        let duplicate: Option<Pipe> = self
            .iter_assets()
            .filter_map(Asset::as_pipe)
            .find(|p| {
                p.id != link.id()
                    && !splices.contains(&Some(p.id))
                    && (p.connections == [a, b] || p.connections == [b, a])
            })
            .cloned();
        let Some(duplicate) = duplicate else {
            return;
        };

        if let Asset::Pipe(new_pipe) = link {
            new_pipe.copy_hydraulics_from(&duplicate);
        }
        self.labels
            .remove(&duplicate.label, AssetType::Pipe, duplicate.id);
        moment.delete_asset(duplicate.id);

        let link_is_pipe = link.asset_type() == AssetType::Pipe;
        for point in self.customer_points_on_pipe(duplicate.id) {
            if !link_is_pipe {
                moment.put_customer_point(point.disconnected());
                continue;
            }
            let hit = link
                .vertices()
                .and_then(|verts| nearest_point_on_polyline(verts, point.coordinates));
            let updated = match hit {
                Some(hit) => match junction_for_customer_point(start_node, end_node, hit.point) {
                    Some(j) => point.connected(link.id(), hit.point, j),
                    None => point.disconnected(),
                },
                None => point.disconnected(),
            };
            moment.put_customer_point(updated);
        }
    }
}
