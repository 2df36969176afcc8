// SPDX-License-Identifier: Apache-2.0
//! Reverse-link: flip a link's flow direction.

use tracing::debug;

use crate::ident::AssetId;
use crate::moment::Moment;
use crate::network::Network;
use crate::ops::OpError;

impl Network {
    /// Reverses a link: swaps its endpoint pair and reverses its vertex run,
    /// so the geometry still reads start-to-end.
    ///
    /// # Errors
    ///
    /// [`OpError::InvalidAssetId`] when the id is unknown,
    /// [`OpError::NotALink`] when it names a node.
    pub fn reverse_link(&self, link: AssetId) -> Result<Moment, OpError> {
        let mut reversed = self.require_link(link)?.clone();
        reversed.reverse();

        let mut moment = Moment::new("Reverse link");
        debug!(link = %link, "reverse link");
        moment.put_asset(reversed);
        Ok(moment)
    }
}
