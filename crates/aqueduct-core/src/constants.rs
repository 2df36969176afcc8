// SPDX-License-Identifier: Apache-2.0
//! Shared constants for labels, geometry cleanup, and asset defaults.

use crate::curve::CurvePoint;

/// Hard cap on label length, inherited from the INP format's 31-character
/// identifier limit. `generate_next_label` truncates the base, never the
/// numeric suffix, to stay under this.
pub const MAX_LABEL_LEN: usize = 31;

/// Consecutive link vertices closer than this (meters) are collapsed when a
/// link is inserted. The true first and last vertex are always kept.
pub const DUPLICATE_VERTEX_SPACING_M: f64 = 1.0;

/// Default pipe diameter in millimeters.
pub const DEFAULT_PIPE_DIAMETER_MM: f64 = 300.0;

/// Default pipe roughness (Hazen-Williams C).
pub const DEFAULT_PIPE_ROUGHNESS: f64 = 130.0;

/// Default valve diameter in millimeters.
pub const DEFAULT_VALVE_DIAMETER_MM: f64 = 300.0;

/// Single design point emitted for a freshly placed pump. The solver scales
/// a one-point curve into a full characteristic, so one point is enough.
pub const DEFAULT_PUMP_CURVE_POINT: CurvePoint = CurvePoint {
    flow: 50.0,
    head: 30.0,
};
