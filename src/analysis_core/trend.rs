//! Year-over-year cost-per-claim trend
//!
//! ```text
//! claims → (generic, brand, year) totals → avg_cost_per_claim
//!     ↓
//! partition by (generic, brand), years ascending
//!     ↓
//! pairwise scan: prev = preceding present year in the partition
//!     ↓
//! drop first entry of each partition, sort by yoy_change desc
//! ```
//!
//! "Previous" is the preceding year that has data, not `year - 1`. A gap in
//! the data is skipped silently and the change is measured across it.

use super::catalog::{Catalog, SchemaError};
use super::group::sum_claims_by;
use super::measure::Measure;
use super::records::{Claim, Drug};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    pub generic_name: String,
    pub brand_name: Option<String>,
    pub year: i64,
    pub avg_cost_per_claim: Measure,
    pub prev_avg_cost_per_claim: Measure,
    pub yoy_change: Measure,
}

/// One year of one partition, before lagging
#[derive(Debug, Clone, Copy)]
struct YearPoint {
    year: i64,
    avg_cost_per_claim: Measure,
}

type PartitionKey<'a> = (&'a str, Option<&'a str>);

/// `(current - previous) / previous`, undefined if either side is undefined or
/// the previous average is zero
pub fn yoy_change(current: Measure, previous: Measure) -> Measure {
    (current - previous).checked_div(previous)
}

/// Compute the trend report, sorted by `yoy_change` descending with undefined
/// changes last
///
/// Rows whose predecessor average is undefined are excluded along with the
/// first year of every partition.
pub fn compute_yoy_trend(claims: &[Claim], drugs: &[Drug]) -> Result<Vec<TrendRow>, SchemaError> {
    let catalog = Catalog::with_drugs(drugs)?;

    let yearly = sum_claims_by(claims, |index, claim| {
        let drug = catalog.drug_for(index, claim)?;
        Ok::<_, SchemaError>((
            drug.generic_name.as_str(),
            drug.brand_name.as_deref(),
            claim.year,
        ))
    })?;

    // BTreeMap order is (generic, brand, year), so each partition's points
    // arrive already sorted by year
    let mut partitions: BTreeMap<PartitionKey<'_>, Vec<YearPoint>> = BTreeMap::new();
    for ((generic, brand, year), totals) in yearly {
        partitions.entry((generic, brand)).or_default().push(YearPoint {
            year,
            avg_cost_per_claim: totals.avg_cost_per_claim(),
        });
    }

    let partition_count = partitions.len();
    let mut rows = Vec::new();
    for ((generic, brand), points) in partitions {
        rows.extend(lag_partition(generic, brand, &points));
    }

    rows.sort_by(|a, b| a.yoy_change.cmp_desc_nulls_last(&b.yoy_change));

    log::debug!(
        "📈 YoY trend: {} rows from {} (generic, brand) partitions",
        rows.len(),
        partition_count
    );

    Ok(rows)
}

/// Pair every point with the one before it; `points` must be sorted by year
fn lag_partition(generic: &str, brand: Option<&str>, points: &[YearPoint]) -> Vec<TrendRow> {
    points
        .windows(2)
        .filter_map(|pair| {
            let (prev, current) = (pair[0], pair[1]);
            if prev.avg_cost_per_claim.is_undefined() {
                return None;
            }
            Some(TrendRow {
                generic_name: generic.to_string(),
                brand_name: brand.map(str::to_string),
                year: current.year,
                avg_cost_per_claim: current.avg_cost_per_claim,
                prev_avg_cost_per_claim: prev.avg_cost_per_claim,
                yoy_change: yoy_change(current.avg_cost_per_claim, prev.avg_cost_per_claim),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn drug(id: i64, brand: Option<&str>, generic: &str) -> Drug {
        Drug {
            drug_id: id,
            brand_name: brand.map(str::to_string),
            generic_name: generic.to_string(),
        }
    }

    fn claim(drug_ref: i64, year: i64, cost: &str, count: i64) -> Claim {
        Claim {
            drug_ref,
            provider_ref: 1,
            year,
            total_cost: d(cost),
            claims_count: count,
        }
    }

    #[test]
    fn test_two_year_change() {
        let drugs = vec![drug(1, Some("A"), "X")];
        let claims = vec![claim(1, 2020, "100", 10), claim(1, 2021, "240", 20)];

        let rows = compute_yoy_trend(&claims, &drugs).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.generic_name, "X");
        assert_eq!(row.brand_name.as_deref(), Some("A"));
        assert_eq!(row.year, 2021);
        assert_eq!(row.avg_cost_per_claim.value(), Some(d("12")));
        assert_eq!(row.prev_avg_cost_per_claim.value(), Some(d("10")));
        assert_eq!(row.yoy_change.value(), Some(d("0.2")));
    }

    #[test]
    fn test_first_year_of_each_partition_is_excluded() {
        let drugs = vec![drug(1, Some("A"), "X"), drug(2, None, "X"), drug(3, None, "Solo")];
        let claims = vec![
            claim(1, 2019, "10", 1),
            claim(1, 2020, "20", 1),
            claim(1, 2021, "30", 1),
            claim(2, 2020, "5", 1),
            claim(2, 2021, "4", 1),
            claim(3, 2021, "8", 1),
        ];

        let rows = compute_yoy_trend(&claims, &drugs).unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.prev_avg_cost_per_claim.is_defined()));
        assert!(rows.iter().all(|r| r.generic_name != "Solo"));
        assert!(!rows.iter().any(|r| r.brand_name.as_deref() == Some("A") && r.year == 2019));
        // Generic-only products form their own partition
        assert!(rows.iter().any(|r| r.brand_name.is_none() && r.year == 2021));
    }

    #[test]
    fn test_gap_year_compares_against_preceding_present_year() {
        let drugs = vec![drug(1, Some("A"), "X")];
        let claims = vec![claim(1, 2018, "100", 10), claim(1, 2021, "150", 10)];

        let rows = compute_yoy_trend(&claims, &drugs).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2021);
        assert_eq!(rows[0].prev_avg_cost_per_claim.value(), Some(d("10")));
        assert_eq!(rows[0].yoy_change.value(), Some(d("0.5")));
    }

    #[test]
    fn test_zero_previous_average_gives_undefined_change() {
        let drugs = vec![drug(1, Some("A"), "X"), drug(2, Some("B"), "X")];
        let claims = vec![
            claim(1, 2020, "0", 5),
            claim(1, 2021, "50", 5),
            claim(2, 2020, "10", 10),
            claim(2, 2021, "5", 10),
        ];

        let rows = compute_yoy_trend(&claims, &drugs).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].brand_name.as_deref(), Some("B"));
        assert_eq!(rows[0].yoy_change.value(), Some(d("-0.5")));
        assert_eq!(rows[1].prev_avg_cost_per_claim.value(), Some(Decimal::ZERO));
        assert!(rows[1].yoy_change.is_undefined());
    }

    #[test]
    fn test_undefined_previous_average_drops_row() {
        let drugs = vec![drug(1, Some("A"), "X")];
        let claims = vec![
            claim(1, 2020, "10", 0),
            claim(1, 2021, "20", 2),
            claim(1, 2022, "33", 3),
        ];

        let rows = compute_yoy_trend(&claims, &drugs).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2022);
        assert_eq!(rows[0].yoy_change.value(), Some(d("0.1")));
    }

    #[test]
    fn test_undefined_current_average_sorts_last() {
        let drugs = vec![drug(1, Some("A"), "X"), drug(2, Some("B"), "Y")];
        let claims = vec![
            claim(1, 2020, "10", 1),
            claim(1, 2021, "10", 0),
            claim(2, 2020, "10", 1),
            claim(2, 2021, "9", 1),
        ];

        let rows = compute_yoy_trend(&claims, &drugs).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].generic_name, "Y");
        assert!(rows[1].avg_cost_per_claim.is_undefined());
        assert!(rows[1].yoy_change.is_undefined());
    }

    #[test]
    fn test_sorted_by_change_descending_and_order_independent() {
        let drugs = vec![drug(1, Some("A"), "X"), drug(2, Some("B"), "Y"), drug(3, None, "Z")];
        let claims = vec![
            claim(1, 2020, "10", 1),
            claim(1, 2021, "11", 1),
            claim(2, 2020, "10", 1),
            claim(2, 2021, "30", 1),
            claim(3, 2020, "10", 1),
            claim(3, 2021, "8", 1),
        ];
        let mut reversed = claims.clone();
        reversed.reverse();

        let rows = compute_yoy_trend(&claims, &drugs).unwrap();

        let names: Vec<&str> = rows.iter().map(|r| r.generic_name.as_str()).collect();
        assert_eq!(names, vec!["Y", "X", "Z"]);
        assert_eq!(rows, compute_yoy_trend(&reversed, &drugs).unwrap());
    }

    #[test]
    fn test_overflowing_claim_count_is_undefined_average() {
        let drugs = vec![drug(1, Some("A"), "X")];
        let claims = vec![
            claim(1, 2020, "10", i64::MAX),
            claim(1, 2020, "10", i64::MAX),
            claim(1, 2021, "20", 2),
            claim(1, 2022, "30", 2),
        ];

        let rows = compute_yoy_trend(&claims, &drugs).unwrap();

        // 2021 lags an overflowed 2020 and is dropped like any undefined predecessor
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2022);
        assert_eq!(rows[0].yoy_change.value(), Some(d("0.5")));
    }

    #[test]
    fn test_dangling_drug_ref() {
        let drugs = vec![drug(1, Some("A"), "X")];
        let claims = vec![claim(5, 2020, "1", 1)];

        assert_eq!(
            compute_yoy_trend(&claims, &drugs).unwrap_err(),
            SchemaError::MissingDrug { claim_index: 0, drug_ref: 5 }
        );
    }
}
