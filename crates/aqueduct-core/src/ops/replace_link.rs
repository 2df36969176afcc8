// SPDX-License-Identifier: Apache-2.0
//! Replace-link: swap an existing link for a new one of the same kind.

use aqueduct_geom::nearest_point_on_polyline;
use tracing::debug;

use crate::asset::{Asset, AssetType};
use crate::ident::AssetId;
use crate::moment::Moment;
use crate::network::Network;
use crate::ops::active::infer_node_is_active;
use crate::ops::add_link::{AddLink, LinkEndpoint};
use crate::ops::junction::junction_for_customer_point;
use crate::ops::OpError;

/// Input for [`Network::replace_link`].
#[derive(Clone, Debug)]
pub struct ReplaceLink {
    /// The link being replaced.
    pub source: AssetId,
    /// Its replacement; must be the same link variant as `source`.
    pub link: Asset,
    /// Start endpoint of the replacement.
    pub start: LinkEndpoint,
    /// End endpoint of the replacement.
    pub end: LinkEndpoint,
}

impl Network {
    /// Replaces a link with a new one of the same variant.
    ///
    /// The replacement goes through the same insertion pipeline as add-link
    /// (snapping, splices, labels) minus the duplicate-overlap rule, and
    /// inherits the source's activation. Customer points on the source pipe
    /// are reprojected onto the replacement's geometry; the source's old
    /// endpoints get their activation re-inferred with the source gone.
    ///
    /// # Errors
    ///
    /// Invalid references, [`OpError::LinkKindMismatch`] when the variant
    /// differs from the source's, or label overflow.
    pub fn replace_link(&mut self, input: ReplaceLink) -> Result<Moment, OpError> {
        let ReplaceLink {
            source,
            mut link,
            start,
            end,
        } = input;
        let old = self.require_link(source)?.clone();
        if link.asset_type() != old.asset_type() {
            return Err(OpError::LinkKindMismatch {
                expected: old.asset_type(),
                found: link.asset_type(),
            });
        }
        link.set_active(old.is_active());

        let mut moment = Moment::new("Replace link");
        let link_id = self.insert_link(&mut moment, AddLink { link, start, end }, false)?;

        self.rehome_customers_after_replace(&mut moment, &old, link_id);

        // Endpoints of the removed link that the insertion did not already
        // touch may lose their last active connection.
        let old_endpoints = old.connections().unwrap_or([source, source]);
        for endpoint in old_endpoints {
            if moment.contains_asset(endpoint) {
                continue;
            }
            let Some(node) = self.asset(endpoint) else {
                continue;
            };
            let active =
                infer_node_is_active(self, endpoint, &[source], &moment.put_assets);
            if active != node.is_active() {
                let mut node = node.clone();
                node.set_active(active);
                moment.put_asset(node);
            }
        }

        self.labels.remove(old.label(), old.asset_type(), old.id());
        moment.delete_asset(source);
        debug!(source = %source, replacement = %link_id, "replace link");
        Ok(moment)
    }

    /// Moves the source pipe's customer points onto the replacement link, or
    /// disconnects them when the replacement is not a pipe.
    fn rehome_customers_after_replace(
        &self,
        moment: &mut Moment,
        old: &Asset,
        link_id: AssetId,
    ) {
        let replacement = moment.asset(link_id).cloned();
        let Some(replacement) = replacement else {
            return;
        };
        let replacement_is_pipe = replacement.asset_type() == AssetType::Pipe;
        let Some(endpoints) = replacement.connections() else {
            return;
        };
        let start = self.asset_in_flight(moment, endpoints[0]).cloned();
        let end = self.asset_in_flight(moment, endpoints[1]).cloned();

        for point in self.customer_points_on_pipe(old.id()) {
            let updated = if replacement_is_pipe {
                let hit = replacement
                    .vertices()
                    .and_then(|verts| nearest_point_on_polyline(verts, point.coordinates));
                match (hit, &start, &end) {
                    (Some(hit), Some(s), Some(e)) => {
                        match junction_for_customer_point(s, e, hit.point) {
                            Some(j) => point.connected(link_id, hit.point, j),
                            None => point.disconnected(),
                        }
                    }
                    _ => point.disconnected(),
                }
            } else {
                point.disconnected()
            };
            moment.put_customer_point(updated);
        }
    }
}
