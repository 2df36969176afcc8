// SPDX-License-Identifier: Apache-2.0
//! Customer (demand) points and their pipe attachments.

use aqueduct_geom::LonLat;

use crate::ident::{AssetId, CustomerPointId};

/// Attachment of a customer point to the hydraulic graph.
///
/// Invariant: `junction` must be a junction-variant node that is one of
/// `pipe`'s two endpoints, and `snap` must lie on or near that pipe's
/// polyline. Mutation operations are the only producers of this value.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomerConnection {
    /// Pipe the point snaps onto.
    pub pipe: AssetId,
    /// Projection of the point onto the pipe's polyline.
    pub snap: LonLat,
    /// Junction endpoint that serves the demand.
    pub junction: AssetId,
}

/// A demand point outside the hydraulic graph proper.
///
/// Disconnected (`connection == None`) is a valid state meaning
/// "unallocated".
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomerPoint {
    /// Process-unique id.
    pub id: CustomerPointId,
    /// Point position.
    pub coordinates: LonLat,
    /// Base demand in liters per second.
    pub base_demand: f64,
    /// Current attachment, if any.
    pub connection: Option<CustomerConnection>,
}

impl CustomerPoint {
    /// Returns a copy of this point with its attachment cleared.
    #[must_use]
    pub fn disconnected(&self) -> Self {
        Self {
            connection: None,
            ..self.clone()
        }
    }

    /// Returns a copy of this point attached to `pipe` at `snap`, served by
    /// `junction`.
    #[must_use]
    pub fn connected(&self, pipe: AssetId, snap: LonLat, junction: AssetId) -> Self {
        Self {
            connection: Some(CustomerConnection {
                pipe,
                snap,
                junction,
            }),
            ..self.clone()
        }
    }

    /// Returns `true` when the point is attached to `pipe`.
    #[must_use]
    pub fn is_on_pipe(&self, pipe: AssetId) -> bool {
        self.connection.is_some_and(|c| c.pipe == pipe)
    }
}
