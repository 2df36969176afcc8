// SPDX-License-Identifier: Apache-2.0
//! Connect-customers: attach customer points to a pipe at given snap points.

use aqueduct_geom::LonLat;
use tracing::debug;

use crate::ident::{AssetId, CustomerPointId};
use crate::moment::Moment;
use crate::network::Network;
use crate::ops::junction::junction_for_customer_point;
use crate::ops::OpError;

/// Input for [`Network::connect_customers`]: parallel arrays of customer
/// point ids and the snap points on the pipe they connect at.
#[derive(Clone, Debug)]
pub struct ConnectCustomers {
    /// Customer points to connect.
    pub customer_points: Vec<CustomerPointId>,
    /// The pipe they connect to.
    pub pipe: AssetId,
    /// Snap point on the pipe per customer point, same order.
    pub snap_points: Vec<LonLat>,
}

impl Network {
    /// Connects each customer point to the pipe at its snap point, assigning
    /// the serving junction via [`junction_for_customer_point`].
    ///
    /// A point whose pipe has no junction endpoint cannot be served; that is
    /// a soft per-point failure, the point is emitted disconnected and the
    /// operation continues.
    ///
    /// # Errors
    ///
    /// [`OpError::ShapeMismatch`] when the arrays differ in length; invalid
    /// pipe, endpoint, or customer point references are fatal.
    pub fn connect_customers(&self, input: &ConnectCustomers) -> Result<Moment, OpError> {
        if input.customer_points.len() != input.snap_points.len() {
            return Err(OpError::ShapeMismatch {
                points: input.customer_points.len(),
                snaps: input.snap_points.len(),
            });
        }
        let pipe = self.require_pipe(input.pipe)?;
        let start = self.require_asset(pipe.connections[0])?;
        let end = self.require_asset(pipe.connections[1])?;

        let mut moment = Moment::new("Connect customers");
        for (point_id, snap) in input.customer_points.iter().zip(&input.snap_points) {
            let point = self.require_customer_point(*point_id)?;
            let updated = match junction_for_customer_point(start, end, *snap) {
                Some(junction) => point.connected(input.pipe, *snap, junction),
                None => {
                    debug!(
                        point = %point_id,
                        pipe = %input.pipe,
                        "no junction found to connect customer point"
                    );
                    point.disconnected()
                }
            };
            moment.put_customer_point(updated);
        }
        Ok(moment)
    }
}
