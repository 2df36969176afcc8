// SPDX-License-Identifier: Apache-2.0
//! Active-topology inference.

use crate::asset::Asset;
use crate::ident::AssetId;
use crate::network::Network;

/// Decides whether `node` should be active given a proposed set of link
/// deletions and insertions/updates.
///
/// In order:
/// 1. any active proposed link touching the node makes it active;
/// 2. a node with no remaining connections and no proposed link touching it
///    is an orphan, and orphans are active by convention (freshly placed
///    isolated nodes stay usable);
/// 3. otherwise the node is active iff at least one remaining connected
///    link is active. A proposed update of a remaining link shadows the
///    snapshot's copy.
///
/// Called whenever a link's activation changes or a link is deleted or
/// replaced, to decide whether its endpoints must flip.
#[must_use]
pub fn infer_node_is_active(
    net: &Network,
    node: AssetId,
    deleted_links: &[AssetId],
    proposed: &[Asset],
) -> bool {
    if proposed
        .iter()
        .any(|a| a.is_link() && a.is_active() && a.connects_to(node))
    {
        return true;
    }

    let remaining: Vec<AssetId> = net
        .topology()
        .links_at(node)
        .iter()
        .copied()
        .filter(|link| !deleted_links.contains(link))
        .collect();

    let proposed_connects = proposed.iter().any(|a| a.connects_to(node));
    if remaining.is_empty() && !proposed_connects {
        return true;
    }

    remaining.iter().any(|link| {
        proposed.iter().find(|a| a.id() == *link).map_or_else(
            || net.asset(*link).is_some_and(Asset::is_active),
            Asset::is_active,
        )
    })
}
