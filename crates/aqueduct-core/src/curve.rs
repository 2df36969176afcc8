// SPDX-License-Identifier: Apache-2.0
//! Simulation support payloads carried by moments: pump curves, demands,
//! and extended-period timing. The core only ever emits curves (a default
//! pump curve on add-link); demands and timing exist so the diff contract
//! covers the import pipeline that shares it.

use crate::ident::{AssetId, CurveId};

/// One point of a pump performance curve.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// Flow in liters per second.
    pub flow: f64,
    /// Head in meters.
    pub head: f64,
}

/// A pump performance curve.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve {
    /// Process-unique id.
    pub id: CurveId,
    /// Curve points in increasing flow order.
    pub points: Vec<CurvePoint>,
}

/// A junction base demand entry.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Demand {
    /// Junction carrying the demand.
    pub junction: AssetId,
    /// Base demand in liters per second.
    pub base_demand: f64,
    /// Optional time pattern label.
    pub pattern: Option<String>,
}

/// Extended-period simulation timing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpsTiming {
    /// Total duration in seconds.
    pub duration_s: u64,
    /// Hydraulic time step in seconds.
    pub hydraulic_step_s: u64,
    /// Demand pattern time step in seconds.
    pub pattern_step_s: u64,
    /// Reporting time step in seconds.
    pub report_step_s: u64,
}
