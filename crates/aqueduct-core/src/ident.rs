// SPDX-License-Identifier: Apache-2.0
//! Identifier types and the container-owned id allocator.

use core::fmt;

/// Strongly typed identifier for a network asset (node or link).
///
/// Ids are process-unique plain integers, assigned monotonically by the
/// [`IdAllocator`] owned by the network container. They carry no meaning
/// beyond identity; human-readable naming lives in the label layer.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetId(pub u64);

impl AssetId {
    /// Returns the raw integer value of this id.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed identifier for a customer (demand) point.
///
/// Customer points live outside the hydraulic graph proper; a dedicated
/// wrapper prevents accidental mixing with [`AssetId`].
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomerPointId(pub u64);

impl CustomerPointId {
    /// Returns the raw integer value of this id.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CustomerPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed identifier for a performance curve.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveId(pub u64);

impl CurveId {
    /// Returns the raw integer value of this id.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id source for everything the container constructs.
///
/// One shared counter backs assets, customer points, and curves so every id
/// in a process is unique regardless of kind.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Creates an allocator starting at id 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Creates an allocator that resumes after `highest` (used when loading
    /// an existing network snapshot).
    #[must_use]
    pub fn resuming_after(highest: u64) -> Self {
        Self {
            next: highest.saturating_add(1),
        }
    }

    /// Allocates the next asset id.
    pub fn next_asset(&mut self) -> AssetId {
        AssetId(self.bump())
    }

    /// Allocates the next customer point id.
    pub fn next_customer_point(&mut self) -> CustomerPointId {
        CustomerPointId(self.bump())
    }

    /// Allocates the next curve id.
    pub fn next_curve(&mut self) -> CurveId {
        CurveId(self.bump())
    }

    fn bump(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_is_monotonic_across_kinds() {
        let mut ids = IdAllocator::new();
        let a = ids.next_asset().value();
        let c = ids.next_customer_point().value();
        let k = ids.next_curve().value();
        assert!(a < c && c < k);
    }

    #[test]
    fn resuming_allocator_skips_used_range() {
        let mut ids = IdAllocator::resuming_after(41);
        assert_eq!(ids.next_asset(), AssetId(42));
    }
}
