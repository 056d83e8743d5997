//! Selects the target address for a product and derives its display fields.

use crate::errors::{AppError, AppResult};
use crate::models::address::{AddressRecord, ResolvedAddress};
use crate::models::destination::Destination;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
/// Single-letter prefix followed by digits, e.g. `M205`, `m70`.
static LETTER_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]\d+$").unwrap());

/// How the oversized "large number" is extracted from an address path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LargeNumStrategy {
    /// Final dot-separated segment, verbatim (`PG06.001.019.934` → `934`).
    LastSegment,
    /// Digits of the first segment, zero-padded to 3 (`M205.001` → `205`, `m70.2` → `070`).
    PrefixDigits,
    /// `PrefixDigits` when the first segment is a letter followed by digits,
    /// `LastSegment` otherwise.
    #[default]
    Auto,
}

impl LargeNumStrategy {
    pub fn large_num(&self, endereco: &str) -> String {
        match self {
            LargeNumStrategy::LastSegment => last_segment(endereco),
            LargeNumStrategy::PrefixDigits => prefix_digits(endereco),
            LargeNumStrategy::Auto => {
                let first = endereco.split('.').next().unwrap_or("");
                if LETTER_DIGITS.is_match(first) {
                    prefix_digits(endereco)
                } else {
                    last_segment(endereco)
                }
            }
        }
    }
}

fn last_segment(endereco: &str) -> String {
    endereco.rsplit('.').next().unwrap_or("").to_string()
}

fn prefix_digits(endereco: &str) -> String {
    let first = endereco.split('.').next().unwrap_or("");
    match DIGITS.find(first) {
        Some(m) => format!("{:0>3}", m.as_str()),
        None => "000".to_string(),
    }
}

/// Per-mode large-number strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverPolicy {
    pub buffer: LargeNumStrategy,
    pub picking: LargeNumStrategy,
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self {
            buffer: LargeNumStrategy::LastSegment,
            picking: LargeNumStrategy::Auto,
        }
    }
}

impl ResolverPolicy {
    pub fn with_picking(picking: LargeNumStrategy) -> Self {
        Self {
            picking,
            ..Self::default()
        }
    }

    /// Pick and format the address for `mode`.
    ///
    /// Buffer stock takes the last matching record and drops the final segment
    /// from the short address. Picking takes the first matching record and keeps
    /// a single-segment address whole.
    pub fn resolve(
        &self,
        addresses: &[AddressRecord],
        mode: Destination,
    ) -> AppResult<ResolvedAddress> {
        let category = mode.category();
        let mut matching = addresses.iter().filter(|a| a.tipo == category);

        let (record, strategy) = match mode {
            Destination::Buffer => (matching.last(), self.buffer),
            Destination::Picking => (matching.next(), self.picking),
        };
        let record = record.ok_or(AppError::NoAddressOfType(mode))?;

        let mut parts = record.segments();
        if mode == Destination::Buffer || parts.len() > 1 {
            parts.pop();
        }

        Ok(ResolvedAddress {
            large_num: strategy.large_num(&record.endereco),
            short_addr: parts.join("."),
            source_record: record.clone(),
        })
    }
}

/// Resolve with the default policy.
pub fn resolve(addresses: &[AddressRecord], mode: Destination) -> AppResult<ResolvedAddress> {
    ResolverPolicy::default().resolve(addresses, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(e: &str) -> AddressRecord {
        AddressRecord::new("621412", "PULMÃO", e)
    }

    fn picking(e: &str) -> AddressRecord {
        AddressRecord::new("621412", "SEPARACAO", e)
    }

    #[test]
    fn buffer_picks_last_matching_record() {
        let list = vec![buffer("PG06.001.019.100"), buffer("PG06.001.019.934")];
        let r = resolve(&list, Destination::Buffer).unwrap();

        assert_eq!(r.large_num, "934");
        assert_eq!(r.short_addr, "PG06.001.019");
        assert_eq!(r.source_record.endereco, "PG06.001.019.934");
    }

    #[test]
    fn picking_picks_first_matching_record() {
        let list = vec![picking("M205.001"), picking("M999.002")];
        let r = resolve(&list, Destination::Picking).unwrap();

        assert_eq!(r.source_record.endereco, "M205.001");
        assert_eq!(r.large_num, "205");
        assert_eq!(r.short_addr, "M205");
    }

    #[test]
    fn missing_category_fails_even_with_other_categories() {
        let list = vec![picking("M205.001"), picking("M999.002")];
        let err = resolve(&list, Destination::Buffer).unwrap_err();
        assert!(matches!(err, AppError::NoAddressOfType(Destination::Buffer)));

        let list = vec![buffer("PG06.001.019.934")];
        let err = resolve(&list, Destination::Picking).unwrap_err();
        assert!(matches!(err, AppError::NoAddressOfType(Destination::Picking)));

        assert!(resolve(&[], Destination::Picking).is_err());
    }

    #[test]
    fn picking_single_segment_is_kept_whole() {
        let r = resolve(&[picking("PK12")], Destination::Picking).unwrap();
        assert_eq!(r.short_addr, "PK12");
        assert_eq!(r.large_num, "PK12");
    }

    #[test]
    fn buffer_single_segment_drops_it() {
        let r = resolve(&[buffer("934")], Destination::Buffer).unwrap();
        assert_eq!(r.short_addr, "");
        assert_eq!(r.large_num, "934");
    }

    #[test]
    fn picking_with_multi_letter_prefix_uses_last_segment() {
        let r = resolve(&[picking("PG06.001.019.934")], Destination::Picking).unwrap();
        assert_eq!(r.large_num, "934");
        assert_eq!(r.short_addr, "PG06.001.019");
    }

    #[test]
    fn prefix_digits_pads_and_defaults() {
        assert_eq!(LargeNumStrategy::PrefixDigits.large_num("m70.001"), "070");
        assert_eq!(LargeNumStrategy::PrefixDigits.large_num("M205.001"), "205");
        assert_eq!(LargeNumStrategy::PrefixDigits.large_num("ABC.001"), "000");
        assert_eq!(LargeNumStrategy::PrefixDigits.large_num("M1234.1"), "1234");
    }

    #[test]
    fn forced_last_segment_policy_for_picking() {
        let policy = ResolverPolicy::with_picking(LargeNumStrategy::LastSegment);
        let r = policy
            .resolve(&[picking("M205.001")], Destination::Picking)
            .unwrap();
        assert_eq!(r.large_num, "001");
    }
}
