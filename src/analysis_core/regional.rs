//! Per-state, per-generic cost variance

use super::catalog::{Catalog, SchemaError};
use super::group::sum_claims_by;
use super::measure::Measure;
use super::records::{Claim, Drug, Provider};

#[derive(Debug, Clone, PartialEq)]
pub struct RegionalRow {
    pub state: String,
    pub generic_name: String,
    pub total_cost: Measure,
    /// `None` if the claim count overflowed
    pub total_claims: Option<i64>,
    pub avg_cost_per_claim: Measure,
}

/// Sum cost and claims per (state, generic_name), ordered by generic_name
/// then state
pub fn compute_regional_variance(
    claims: &[Claim],
    drugs: &[Drug],
    providers: &[Provider],
) -> Result<Vec<RegionalRow>, SchemaError> {
    let catalog = Catalog::with_drugs_and_providers(drugs, providers)?;

    // Keyed generic-first so the map already iterates in output order
    let groups = sum_claims_by(claims, |index, claim| {
        let drug = catalog.drug_for(index, claim)?;
        let provider = catalog.provider_for(index, claim)?;
        Ok::<_, SchemaError>((drug.generic_name.as_str(), provider.state.as_str()))
    })?;

    let rows: Vec<RegionalRow> = groups
        .into_iter()
        .map(|((generic, state), totals)| RegionalRow {
            state: state.to_string(),
            generic_name: generic.to_string(),
            total_cost: totals.total_cost(),
            total_claims: totals.claims_count(),
            avg_cost_per_claim: totals.avg_cost_per_claim(),
        })
        .collect();

    log::debug!("🗺️  Regional variance: {} (state, generic) groups", rows.len());

    Ok(rows)
}
