// SPDX-License-Identifier: Apache-2.0
//! Activate-assets: flip inactive links active, cascading to endpoints.

use std::collections::BTreeMap;

use tracing::debug;

use crate::asset::Asset;
use crate::ident::AssetId;
use crate::moment::Moment;
use crate::network::Network;
use crate::ops::OpError;

impl Network {
    /// Activates the given link assets and any of their endpoint nodes that
    /// were inactive. Node ids in the input are skipped (nodes follow their
    /// links, they are never activated directly); links that are already
    /// active contribute nothing. Unknown ids fail the whole call.
    ///
    /// Updates are emitted in ascending id order.
    ///
    /// # Errors
    ///
    /// [`OpError::InvalidAssetId`] when any id is unknown.
    pub fn activate_assets(&self, ids: &[AssetId]) -> Result<Moment, OpError> {
        // Validate every reference before producing any output.
        for id in ids {
            self.require_asset(*id)?;
        }

        let mut updated: BTreeMap<AssetId, Asset> = BTreeMap::new();
        for id in ids {
            let Ok(link) = self.require_link(*id) else {
                continue;
            };
            if link.is_active() {
                continue;
            }
            let mut link = link.clone();
            link.set_active(true);
            let Some(endpoints) = link.connections() else {
                continue;
            };
            updated.insert(*id, link);

            for endpoint in endpoints {
                let inactive_node = updated
                    .get(&endpoint)
                    .or_else(|| self.asset(endpoint))
                    .filter(|node| !node.is_active())
                    .cloned();
                if let Some(mut node) = inactive_node {
                    node.set_active(true);
                    updated.insert(endpoint, node);
                }
            }
        }

        let mut moment = Moment::new("Activate assets");
        debug!(requested = ids.len(), updated = updated.len(), "activate assets");
        for asset in updated.into_values() {
            moment.put_asset(asset);
        }
        Ok(moment)
    }
}
