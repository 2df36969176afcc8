// SPDX-License-Identifier: Apache-2.0
//! Mutation operations: the orchestration layer of the engine.
//!
//! Each operation is a method on [`Network`] that reads the snapshot,
//! mutates nothing but the container-owned label/id services, and returns a
//! [`crate::moment::Moment`] describing the change. Failure policy is
//! fail-fast with no partial mutation: an operation either returns a
//! complete moment or an [`OpError`] before any output exists.

use thiserror::Error;

use crate::asset::{Asset, AssetType};
use crate::ident::{AssetId, CustomerPointId};
use crate::label::LabelError;
use crate::moment::Moment;
use crate::network::Network;

mod activate;
mod active;
mod add_link;
mod add_node;
mod connect_customers;
mod junction;
mod replace_link;
mod reverse_link;
mod split_pipe;

pub use active::infer_node_is_active;
pub use add_link::{AddLink, LinkEndpoint};
pub use connect_customers::ConnectCustomers;
pub use junction::junction_for_customer_point;
pub use replace_link::ReplaceLink;
pub use split_pipe::SplitPipe;

/// Errors raised by mutation operations. All are fatal to the operation
/// call; soft per-item failures (a customer point with no junction to
/// attach to) are represented in the moment instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    /// An id argument does not resolve to any asset.
    #[error("Invalid asset id: {0}")]
    InvalidAssetId(AssetId),
    /// An id argument does not resolve to any customer point.
    #[error("Invalid customer point id: {0}")]
    InvalidCustomerPointId(CustomerPointId),
    /// A pipe id argument does not resolve at all.
    #[error("Invalid pipe ID: not found")]
    PipeNotFound(AssetId),
    /// A pipe id argument resolves to a different asset variant.
    #[error("Invalid pipe ID: found {found} instead of pipe")]
    NotAPipe {
        /// The offending id.
        id: AssetId,
        /// Variant actually found.
        found: AssetType,
    },
    /// A link id argument resolves to a node.
    #[error("invalid link id {id}: found {found} instead of a link")]
    NotALink {
        /// The offending id.
        id: AssetId,
        /// Variant actually found.
        found: AssetType,
    },
    /// A node argument is actually a link.
    #[error("invalid node id {id}: found {found} instead of a node")]
    NotANode {
        /// The offending id.
        id: AssetId,
        /// Variant actually found.
        found: AssetType,
    },
    /// Replace-link got a replacement of a different variant than the
    /// source link.
    #[error("replacement link must be a {expected}, found {found}")]
    LinkKindMismatch {
        /// Variant of the source link.
        expected: AssetType,
        /// Variant of the offered replacement.
        found: AssetType,
    },
    /// Parallel array arguments of different lengths.
    #[error("customer point and snap point counts differ: {points} vs {snaps}")]
    ShapeMismatch {
        /// Number of customer point ids.
        points: usize,
        /// Number of snap points.
        snaps: usize,
    },
    /// Label generation could not satisfy the length cap.
    #[error(transparent)]
    Label(#[from] LabelError),
}

impl Network {
    /// Gives `asset` a label: generates one when empty, registers the
    /// caller-supplied one otherwise.
    pub(crate) fn assign_label(&mut self, asset: &mut Asset) {
        if asset.label().is_empty() {
            let label = self.labels.generate_for(asset.asset_type(), asset.id());
            asset.set_label(label);
        } else {
            self.labels
                .register(asset.label(), asset.asset_type(), asset.id());
        }
    }

    /// Resolves an asset that may have been emitted into `moment` earlier in
    /// the same operation (split nodes, fresh endpoints) or may already live
    /// in the snapshot.
    pub(crate) fn asset_in_flight<'a>(
        &'a self,
        moment: &'a Moment,
        id: AssetId,
    ) -> Option<&'a Asset> {
        moment.asset(id).or_else(|| self.asset(id))
    }
}
