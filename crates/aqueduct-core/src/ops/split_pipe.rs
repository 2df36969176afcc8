// SPDX-License-Identifier: Apache-2.0
//! Split-pipe: divide one pipe into a chain of fragments at one or more
//! points, relabel the fragments, and re-home customer points.

use aqueduct_geom::{nearest_point_on_polyline, LonLat, NearestPoint};
use tracing::debug;

use crate::asset::{Asset, AssetType, Pipe};
use crate::ident::AssetId;
use crate::moment::Moment;
use crate::network::Network;
use crate::ops::junction::junction_for_customer_point;
use crate::ops::OpError;

/// Input for [`Network::split_pipe`]: one pipe and the ordered split nodes.
#[derive(Clone, Debug)]
pub struct SplitPipe {
    /// The pipe to divide.
    pub pipe: AssetId,
    /// Split nodes in caller order. Each must be a node variant; labels are
    /// assigned when empty.
    pub splits: Vec<Asset>,
}

/// One piece of the growing fragment chain during an iterative split.
struct Fragment {
    start: AssetId,
    end: AssetId,
    verts: Vec<LonLat>,
}

impl Network {
    /// Splits a pipe at each of the given nodes.
    ///
    /// Splits are processed one at a time against the growing fragment
    /// chain: each split node lands on whichever fragment is currently
    /// nearest, so two splits on the same pipe work in a single call. The
    /// first fragment keeps the original label; each later fragment
    /// continues the previous fragment's label (`P1`, `P1_1`, `P1_2`, ...).
    /// The original pipe is scheduled for deletion and its customer points
    /// are re-homed onto the nearest fragment.
    ///
    /// # Errors
    ///
    /// Invalid pipe reference, a link passed as a split node, or label
    /// overflow.
    pub fn split_pipe(&mut self, input: SplitPipe) -> Result<Moment, OpError> {
        let pipe = self.require_pipe(input.pipe)?.clone();
        let mut moment = Moment::new("Split pipe");

        let mut split_points = Vec::with_capacity(input.splits.len());
        for node in input.splits {
            if !node.is_node() {
                return Err(OpError::NotANode {
                    id: node.id(),
                    found: node.asset_type(),
                });
            }
            let mut node = node;
            self.assign_label(&mut node);
            // A split node hangs off the fragments only; it inherits the
            // pipe's activity unless the caller already marked it inactive.
            node.set_active(pipe.is_active && node.is_active());
            if let Some(at) = node.coordinates() {
                split_points.push((node.id(), at));
            }
            moment.put_asset(node);
        }

        let fragments = self.split_existing_pipe(&mut moment, input.pipe, &split_points)?;
        debug!(pipe = %input.pipe, fragments, "split pipe");
        Ok(moment)
    }

    /// Shared splitting machinery, also used by add-link/replace-link
    /// splices. The split nodes must already be present in `moment` (or the
    /// snapshot) so customer re-homing can see them. Returns the number of
    /// fragments emitted.
    pub(crate) fn split_existing_pipe(
        &mut self,
        moment: &mut Moment,
        pipe_id: AssetId,
        splits: &[(AssetId, LonLat)],
    ) -> Result<usize, OpError> {
        let pipe = self.require_pipe(pipe_id)?.clone();
        if splits.is_empty() {
            return Ok(0);
        }

        let mut fragments = vec![Fragment {
            start: pipe.connections[0],
            end: pipe.connections[1],
            verts: pipe.vertices.clone(),
        }];

        for (node_id, at) in splits {
            let Some((index, hit)) = nearest_fragment(&fragments, *at) else {
                continue;
            };
            let frag = fragments.remove(index);
            let (left, right) = divide_at(&frag.verts, *at, hit.segment);
            fragments.insert(
                index,
                Fragment {
                    start: frag.start,
                    end: *node_id,
                    verts: left,
                },
            );
            fragments.insert(
                index + 1,
                Fragment {
                    start: *node_id,
                    end: frag.end,
                    verts: right,
                },
            );
        }

        // Build the fragment pipes in original order; relabel sequentially.
        let mut new_pipes: Vec<Pipe> = Vec::with_capacity(fragments.len());
        let mut prev_label = pipe.label.clone();
        for (i, frag) in fragments.iter().enumerate() {
            let mut fragment = self.build_pipe(frag.start, frag.end, frag.verts.clone());
            fragment.copy_hydraulics_from(&pipe);
            fragment.is_active = pipe.is_active;
            let label = if i == 0 {
                // The original label moves to the first fragment.
                self.labels.remove(&pipe.label, AssetType::Pipe, pipe.id);
                self.labels
                    .register(&pipe.label, AssetType::Pipe, fragment.id);
                pipe.label.clone()
            } else {
                let next = self.labels.generate_next_label(&prev_label)?;
                self.labels.register(&next, AssetType::Pipe, fragment.id);
                next
            };
            fragment.label.clone_from(&label);
            prev_label = label;
            new_pipes.push(fragment);
        }

        moment.delete_asset(pipe.id);
        for fragment in &new_pipes {
            moment.put_asset(Asset::Pipe(fragment.clone()));
        }

        // Re-home customer points that were attached to the original pipe.
        for point in self.customer_points_on_pipe(pipe.id) {
            let nearest = new_pipes
                .iter()
                .filter_map(|p| {
                    nearest_point_on_polyline(&p.vertices, point.coordinates).map(|hit| (p, hit))
                })
                .reduce(|best, cand| if cand.1.distance < best.1.distance { cand } else { best });
            let updated = match nearest {
                Some((fragment, hit)) => {
                    let junction = {
                        let start = self.asset_in_flight(moment, fragment.connections[0]);
                        let end = self.asset_in_flight(moment, fragment.connections[1]);
                        match (start, end) {
                            (Some(s), Some(e)) => junction_for_customer_point(s, e, hit.point),
                            _ => None,
                        }
                    };
                    match junction {
                        Some(j) => point.connected(fragment.id, hit.point, j),
                        None => point.disconnected(),
                    }
                }
                None => point.disconnected(),
            };
            moment.put_customer_point(updated);
        }

        Ok(new_pipes.len())
    }
}

/// Finds the fragment whose polyline is nearest to `at`. Strict comparison
/// keeps the earliest fragment on exact ties.
fn nearest_fragment(fragments: &[Fragment], at: LonLat) -> Option<(usize, NearestPoint)> {
    let mut best: Option<(usize, NearestPoint)> = None;
    for (i, frag) in fragments.iter().enumerate() {
        if let Some(hit) = nearest_point_on_polyline(&frag.verts, at) {
            let better = match &best {
                Some((_, b)) => hit.distance < b.distance,
                None => true,
            };
            if better {
                best = Some((i, hit));
            }
        }
    }
    best
}

/// Divides a polyline at `at`. When `at` exactly matches an interior vertex
/// the polyline splits at that vertex with no new vertex created (the two
/// halves share it as their boundary endpoint); otherwise `at` is inserted
/// into the nearest segment `segment`.
fn divide_at(verts: &[LonLat], at: LonLat, segment: usize) -> (Vec<LonLat>, Vec<LonLat>) {
    let interior = verts
        .len()
        .checked_sub(1)
        .filter(|last| *last > 1)
        .and_then(|last| verts[1..last].iter().position(|v| *v == at).map(|p| p + 1));

    if let Some(vi) = interior {
        (verts[..=vi].to_vec(), verts[vi..].to_vec())
    } else {
        let cut = segment.min(verts.len().saturating_sub(2));
        let mut left = verts[..=cut].to_vec();
        left.push(at);
        let mut right = vec![at];
        right.extend_from_slice(&verts[cut + 1..]);
        (left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_inserts_new_vertex_on_segment() {
        let verts = [LonLat::new(0.0, 0.0), LonLat::new(10.0, 0.0)];
        let (left, right) = divide_at(&verts, LonLat::new(5.0, 0.0), 0);
        assert_eq!(left, vec![LonLat::new(0.0, 0.0), LonLat::new(5.0, 0.0)]);
        assert_eq!(right, vec![LonLat::new(5.0, 0.0), LonLat::new(10.0, 0.0)]);
    }

    #[test]
    fn divide_at_interior_vertex_does_not_duplicate_it() {
        let verts = [
            LonLat::new(0.0, 0.0),
            LonLat::new(5.0, 0.0),
            LonLat::new(10.0, 0.0),
        ];
        let (left, right) = divide_at(&verts, LonLat::new(5.0, 0.0), 0);
        assert_eq!(left, vec![LonLat::new(0.0, 0.0), LonLat::new(5.0, 0.0)]);
        assert_eq!(right, vec![LonLat::new(5.0, 0.0), LonLat::new(10.0, 0.0)]);
        // The shared boundary vertex appears once per half, not twice.
        assert_ne!(right[0], right[1]);
    }
}
