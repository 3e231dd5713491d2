//! Multi-key group-by shared by the aggregation and trend engines
//!
//! Groups live in a `BTreeMap`, so iteration order depends only on the keys
//! and never on the order claims arrived in.

use super::measure::Measure;
use super::records::Claim;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Running sums for one group of claims
///
/// Each sum becomes `None` once it overflows and stays that way, so every
/// value derived from it is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimTotals {
    total_cost: Option<Decimal>,
    claims_count: Option<i64>,
}

impl Default for ClaimTotals {
    fn default() -> Self {
        Self {
            total_cost: Some(Decimal::ZERO),
            claims_count: Some(0),
        }
    }
}

impl ClaimTotals {
    pub fn add(&mut self, claim: &Claim) {
        self.total_cost = self
            .total_cost
            .and_then(|sum| sum.checked_add(claim.total_cost));
        self.claims_count = self
            .claims_count
            .and_then(|sum| sum.checked_add(claim.claims_count));
    }

    pub fn total_cost(&self) -> Measure {
        Measure::from(self.total_cost)
    }

    /// `None` if the count overflowed
    pub fn claims_count(&self) -> Option<i64> {
        self.claims_count
    }

    pub fn claims_count_measure(&self) -> Measure {
        Measure::from(self.claims_count.map(Decimal::from))
    }

    pub fn avg_cost_per_claim(&self) -> Measure {
        self.total_cost().checked_div(self.claims_count_measure())
    }
}

/// Fold `items` into groups keyed by `key_of`
///
/// `key_of` may fail (e.g. a dangling join); the first failure aborts the
/// whole grouping and no partial map is returned.
pub fn group_by<'a, T, K, A, E, FK, FA>(
    items: &'a [T],
    mut key_of: FK,
    mut fold: FA,
) -> Result<BTreeMap<K, A>, E>
where
    K: Ord,
    A: Default,
    FK: FnMut(usize, &'a T) -> Result<K, E>,
    FA: FnMut(&mut A, &'a T),
{
    let mut groups: BTreeMap<K, A> = BTreeMap::new();
    for (index, item) in items.iter().enumerate() {
        let key = key_of(index, item)?;
        fold(groups.entry(key).or_default(), item);
    }
    Ok(groups)
}

/// Sum cost and claim counts per key
pub fn sum_claims_by<'a, K, E, FK>(
    claims: &'a [Claim],
    key_of: FK,
) -> Result<BTreeMap<K, ClaimTotals>, E>
where
    K: Ord,
    FK: FnMut(usize, &'a Claim) -> Result<K, E>,
{
    group_by(claims, key_of, |totals: &mut ClaimTotals, claim| totals.add(claim))
}
