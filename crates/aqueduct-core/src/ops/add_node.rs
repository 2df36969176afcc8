// SPDX-License-Identifier: Apache-2.0
//! Add-node: place a single node asset.

use tracing::debug;

use crate::asset::Asset;
use crate::moment::Moment;
use crate::network::Network;
use crate::ops::active::infer_node_is_active;
use crate::ops::OpError;

impl Network {
    /// Places a node asset (junction, reservoir, or tank).
    ///
    /// A label is assigned when the caller left it empty. Activation runs
    /// through [`infer_node_is_active`]: a freshly placed node with no
    /// connections is an orphan and comes out active.
    ///
    /// # Errors
    ///
    /// [`OpError::NotANode`] when a link variant is passed.
    pub fn add_node(&mut self, node: Asset) -> Result<Moment, OpError> {
        if !node.is_node() {
            return Err(OpError::NotANode {
                id: node.id(),
                found: node.asset_type(),
            });
        }
        let mut node = node;
        self.assign_label(&mut node);
        node.set_active(infer_node_is_active(self, node.id(), &[], &[]));

        let mut moment = Moment::new("Add node");
        debug!(node = %node.id(), label = node.label(), "add node");
        moment.put_asset(node);
        Ok(moment)
    }
}
