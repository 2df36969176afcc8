// SPDX-License-Identifier: Apache-2.0
//! Label allocation: short type-prefixed identifiers ("P3", "J12") with
//! gap-filling reuse, plus suffix continuation for arbitrary custom names
//! ("MainPipe_1") under the 31-character cap.
//!
//! The manager is the one piece of in-place mutable state in the core. It is
//! owned by the network container and only ever touched synchronously from
//! inside a single operation call.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::asset::AssetType;
use crate::constants::MAX_LABEL_LEN;
use crate::ident::AssetId;

/// Error from label generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// No label derived from this base fits the length cap: the numeric
    /// suffix alone fills all 31 characters.
    #[error("cannot derive a label from {0:?} within {MAX_LABEL_LEN} characters")]
    Unsatisfiable(String),
}

/// One registered holder of a label.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Occupant {
    ty: AssetType,
    id: AssetId,
}

/// Allocates and tracks asset labels.
///
/// Labels may have multiple simultaneous occupants when registered
/// explicitly (intentional duplicates from imports); generated labels are
/// unique within their asset type.
#[derive(Clone, Debug, Default)]
pub struct LabelManager {
    occupants: FxHashMap<String, Vec<Occupant>>,
    next: FxHashMap<AssetType, u64>,
}

impl LabelManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates and registers the next free `{prefix}{n}` label for `ty`,
    /// binding it to `id`.
    ///
    /// `n` is the smallest positive integer whose label is not already held
    /// by an asset of the same type, starting from the per-type counter
    /// (which `remove` lowers so freed numbers are reused).
    pub fn generate_for(&mut self, ty: AssetType, id: AssetId) -> String {
        let prefix = ty.label_prefix();
        let mut n = self.next.get(&ty).copied().unwrap_or(1);
        let mut label = format!("{prefix}{n}");
        while self.occupied_by_type(&label, ty) {
            n += 1;
            label = format!("{prefix}{n}");
        }
        self.register(&label, ty, id);
        self.next.insert(ty, n + 1);
        label
    }

    /// Registers `label` as held by `(ty, id)`.
    ///
    /// Re-registering an identical pair is a no-op. If the label matches the
    /// type's own numeric pattern, the per-type counter is lowered to that
    /// number so `generate_for` keeps filling gaps correctly after manual
    /// registration.
    pub fn register(&mut self, label: &str, ty: AssetType, id: AssetId) {
        let holders = self.occupants.entry(label.to_owned()).or_default();
        let occ = Occupant { ty, id };
        if holders.contains(&occ) {
            return;
        }
        holders.push(occ);
        self.lower_counter(label, ty);
    }

    /// Unregisters one `(ty, id)` occupant of `label`.
    ///
    /// If the label matches the type's numeric pattern, the per-type counter
    /// is lowered so the freed number becomes available again. Removing an
    /// occupant that is not registered is a no-op.
    pub fn remove(&mut self, label: &str, ty: AssetType, id: AssetId) {
        let Some(holders) = self.occupants.get_mut(label) else {
            return;
        };
        let occ = Occupant { ty, id };
        let Some(pos) = holders.iter().position(|h| *h == occ) else {
            return;
        };
        holders.remove(pos);
        if holders.is_empty() {
            self.occupants.remove(label);
        }
        self.lower_counter(label, ty);
    }

    /// Number of occupants currently holding `label` (any type).
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.occupants.get(label).map_or(0, Vec::len)
    }

    /// Derives a collision-free continuation of an arbitrary label.
    ///
    /// A trailing `_<digits>` suffix continues from digits+1; otherwise the
    /// counter starts at 1. The composed `{base}_{counter}` must fit in
    /// [`MAX_LABEL_LEN`] characters: the base is truncated to make room, the
    /// suffix digits never are. Truncation is re-applied whenever the
    /// counter grows a digit.
    ///
    /// The result is not registered; callers register it once the asset
    /// holding it exists.
    ///
    /// # Errors
    ///
    /// [`LabelError::Unsatisfiable`] when the suffix alone exhausts the cap.
    pub fn generate_next_label(&self, input: &str) -> Result<String, LabelError> {
        let (base, mut counter) = split_numeric_suffix(input);
        loop {
            let suffix = format!("_{counter}");
            let Some(max_base) = MAX_LABEL_LEN.checked_sub(suffix.len()).filter(|n| *n > 0) else {
                return Err(LabelError::Unsatisfiable(input.to_owned()));
            };
            let mut candidate: String = base.chars().take(max_base).collect();
            candidate.push_str(&suffix);
            if self.count(&candidate) == 0 {
                return Ok(candidate);
            }
            counter += 1;
        }
    }

    fn occupied_by_type(&self, label: &str, ty: AssetType) -> bool {
        self.occupants
            .get(label)
            .is_some_and(|holders| holders.iter().any(|h| h.ty == ty))
    }

    /// Lowers the per-type counter when `label` is `{prefix}{n}` for `ty`.
    fn lower_counter(&mut self, label: &str, ty: AssetType) {
        if let Some(n) = numeric_suffix(label, ty) {
            let entry = self.next.entry(ty).or_insert(1);
            if n < *entry {
                *entry = n;
            }
        }
    }
}

/// Parses `label` as `{prefix}{digits}` for `ty`.
fn numeric_suffix(label: &str, ty: AssetType) -> Option<u64> {
    let rest = label.strip_prefix(ty.label_prefix())?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

/// Splits a trailing `_<digits>` suffix, returning the base and the next
/// counter value. Labels without a parseable suffix start at 1.
fn split_numeric_suffix(input: &str) -> (&str, u64) {
    if let Some(pos) = input.rfind('_') {
        let digits = &input[pos + 1..];
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = digits.parse::<u64>() {
                return (&input[..pos], n + 1);
            }
        }
    }
    (input, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: AssetType = AssetType::Pipe;

    #[test]
    fn generation_fills_gaps_after_removal() {
        let mut labels = LabelManager::new();
        assert_eq!(labels.generate_for(P, AssetId(1)), "P1");
        assert_eq!(labels.generate_for(P, AssetId(2)), "P2");
        assert_eq!(labels.generate_for(P, AssetId(3)), "P3");
        labels.remove("P2", P, AssetId(2));
        assert_eq!(labels.generate_for(P, AssetId(4)), "P2");
        assert_eq!(labels.generate_for(P, AssetId(5)), "P4");
    }

    #[test]
    fn types_do_not_contend_for_numbers() {
        let mut labels = LabelManager::new();
        assert_eq!(labels.generate_for(AssetType::Junction, AssetId(1)), "J1");
        assert_eq!(labels.generate_for(P, AssetId(2)), "P1");
        assert_eq!(labels.generate_for(AssetType::Pump, AssetId(3)), "PU1");
    }

    #[test]
    fn register_is_idempotent_for_same_pair() {
        let mut labels = LabelManager::new();
        labels.register("P7", P, AssetId(1));
        labels.register("P7", P, AssetId(1));
        assert_eq!(labels.count("P7"), 1);
        labels.register("P7", P, AssetId(2));
        assert_eq!(labels.count("P7"), 2);
    }

    #[test]
    fn manual_registration_keeps_gap_filling_correct() {
        let mut labels = LabelManager::new();
        labels.register("P5", P, AssetId(1));
        // Counter was lowered to 5; generation skips the occupied number.
        assert_eq!(labels.generate_for(P, AssetId(2)), "P1");
    }

    #[test]
    fn next_label_starts_at_one_for_plain_names() {
        let labels = LabelManager::new();
        assert_eq!(
            labels.generate_next_label("MainPipe").as_deref(),
            Ok("MainPipe_1")
        );
    }

    #[test]
    fn next_label_continues_numeric_suffix() {
        let labels = LabelManager::new();
        assert_eq!(labels.generate_next_label("P1_1").as_deref(), Ok("P1_2"));
    }

    #[test]
    fn next_label_skips_occupied_candidates() {
        let mut labels = LabelManager::new();
        labels.register("Main_1", P, AssetId(1));
        labels.register("Main_2", P, AssetId(2));
        assert_eq!(labels.generate_next_label("Main").as_deref(), Ok("Main_3"));
    }

    #[test]
    fn next_label_truncates_base_not_suffix() {
        let labels = LabelManager::new();
        let base = "x".repeat(40);
        let out = labels.generate_next_label(&base);
        assert!(out.is_ok());
        if let Ok(label) = out {
            assert_eq!(label.chars().count(), MAX_LABEL_LEN);
            assert!(label.ends_with("_1"));
        }
    }

    #[test]
    fn suffix_parse_treats_oversized_digits_as_plain_base() {
        // 25 digits overflow u64; the whole input becomes the base.
        let labels = LabelManager::new();
        let input = "M_1111111111111111111111111";
        let out = labels.generate_next_label(input);
        assert!(out.is_ok());
        if let Ok(label) = out {
            assert!(label.ends_with("_1"));
        }
    }
}
