//! Brand-to-generic substitution savings
//!
//! For every (generic_name, brand_name) pair with a brand name, estimate what
//! the brand claims would have cost at the average cost per claim of the whole
//! generic family, and report the difference as potential savings.

use super::catalog::{Catalog, SchemaError};
use super::group::sum_claims_by;
use super::measure::Measure;
use super::records::{Claim, Drug};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct SavingsRow {
    pub generic_name: String,
    pub brand_name: String,
    /// `None` if the claim count overflowed
    pub brand_total_claims: Option<i64>,
    pub brand_total_cost: Measure,
    pub generic_avg_cost_per_claim: Measure,
    pub hypothetical_generic_cost: Measure,
    pub potential_savings: Measure,
}

/// Compute the savings report, sorted by `potential_savings` descending with
/// undefined savings last
///
/// Fails with `SchemaError` if any claim references an unknown drug.
pub fn compute_brand_generic_savings(
    claims: &[Claim],
    drugs: &[Drug],
) -> Result<Vec<SavingsRow>, SchemaError> {
    let catalog = Catalog::with_drugs(drugs)?;

    // (generic, brand) totals; generic-only products group under brand None
    let by_variant = sum_claims_by(claims, |index, claim| {
        let drug = catalog.drug_for(index, claim)?;
        Ok::<_, SchemaError>((drug.generic_name.as_str(), drug.brand_name.as_deref()))
    })?;

    // Family-wide average across every variant sharing the generic name
    let by_generic = sum_claims_by(claims, |index, claim| {
        Ok::<_, SchemaError>(catalog.drug_for(index, claim)?.generic_name.as_str())
    })?;
    let generic_avg: BTreeMap<&str, Measure> = by_generic
        .iter()
        .map(|(generic, totals)| (*generic, totals.avg_cost_per_claim()))
        .collect();

    let mut rows: Vec<SavingsRow> = by_variant
        .into_iter()
        .filter_map(|((generic, brand), totals)| {
            let brand = brand?;
            let generic_avg_cost_per_claim = *generic_avg.get(generic)?;

            let hypothetical_generic_cost =
                totals.claims_count_measure() * generic_avg_cost_per_claim;
            let potential_savings = totals.total_cost() - hypothetical_generic_cost;

            Some(SavingsRow {
                generic_name: generic.to_string(),
                brand_name: brand.to_string(),
                brand_total_claims: totals.claims_count(),
                brand_total_cost: totals.total_cost(),
                generic_avg_cost_per_claim,
                hypothetical_generic_cost,
                potential_savings,
            })
        })
        .collect();

    // Stable sort keeps (generic, brand) key order among ties
    rows.sort_by(|a, b| a.potential_savings.cmp_desc_nulls_last(&b.potential_savings));

    log::debug!(
        "💊 Savings: {} branded variants across {} generic families",
        rows.len(),
        generic_avg.len()
    );

    Ok(rows)
}
