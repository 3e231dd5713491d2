//! Dimension lookup for claim joins
//!
//! Built fresh for every report call and dropped with it.

use super::records::{Claim, Drug, Provider};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Claim at `claim_index` points at a drug id that is not in the drug table
    MissingDrug { claim_index: usize, drug_ref: i64 },
    MissingProvider { claim_index: usize, provider_ref: i64 },
    DuplicateDrug(i64),
    DuplicateProvider(i64),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::MissingDrug { claim_index, drug_ref } => {
                write!(f, "Claim #{} references unknown drug_id {}", claim_index, drug_ref)
            }
            SchemaError::MissingProvider { claim_index, provider_ref } => write!(
                f,
                "Claim #{} references unknown provider_id {}",
                claim_index, provider_ref
            ),
            SchemaError::DuplicateDrug(id) => write!(f, "Duplicate drug_id {}", id),
            SchemaError::DuplicateProvider(id) => write!(f, "Duplicate provider_id {}", id),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Id-indexed view over the drug and provider dimensions
pub struct Catalog<'a> {
    drugs: HashMap<i64, &'a Drug>,
    providers: HashMap<i64, &'a Provider>,
}

impl<'a> Catalog<'a> {
    /// Index drugs only, for reports that never join providers
    pub fn with_drugs(drugs: &'a [Drug]) -> Result<Self, SchemaError> {
        let mut index = HashMap::with_capacity(drugs.len());
        for drug in drugs {
            if index.insert(drug.drug_id, drug).is_some() {
                return Err(SchemaError::DuplicateDrug(drug.drug_id));
            }
        }

        Ok(Self {
            drugs: index,
            providers: HashMap::new(),
        })
    }

    pub fn with_drugs_and_providers(
        drugs: &'a [Drug],
        providers: &'a [Provider],
    ) -> Result<Self, SchemaError> {
        let mut catalog = Self::with_drugs(drugs)?;
        catalog.providers.reserve(providers.len());
        for provider in providers {
            if catalog.providers.insert(provider.provider_id, provider).is_some() {
                return Err(SchemaError::DuplicateProvider(provider.provider_id));
            }
        }
        Ok(catalog)
    }

    pub fn drug_for(&self, claim_index: usize, claim: &Claim) -> Result<&'a Drug, SchemaError> {
        self.drugs
            .get(&claim.drug_ref)
            .copied()
            .ok_or(SchemaError::MissingDrug {
                claim_index,
                drug_ref: claim.drug_ref,
            })
    }

    pub fn provider_for(
        &self,
        claim_index: usize,
        claim: &Claim,
    ) -> Result<&'a Provider, SchemaError> {
        self.providers
            .get(&claim.provider_ref)
            .copied()
            .ok_or(SchemaError::MissingProvider {
                claim_index,
                provider_ref: claim.provider_ref,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn drug(id: i64, brand: Option<&str>, generic: &str) -> Drug {
        Drug {
            drug_id: id,
            brand_name: brand.map(str::to_string),
            generic_name: generic.to_string(),
        }
    }

    fn claim(drug_ref: i64, provider_ref: i64) -> Claim {
        Claim {
            drug_ref,
            provider_ref,
            year: 2020,
            total_cost: Decimal::ONE,
            claims_count: 1,
        }
    }

    #[test]
    fn test_resolves_drug() {
        let drugs = vec![drug(1, Some("Lipitor"), "atorvastatin"), drug(2, None, "atorvastatin")];
        let catalog = Catalog::with_drugs(&drugs).unwrap();

        let resolved = catalog.drug_for(0, &claim(2, 9)).unwrap();
        assert_eq!(resolved.generic_name, "atorvastatin");
        assert!(resolved.brand_name.is_none());
    }

    #[test]
    fn test_missing_drug() {
        let drugs = vec![drug(1, None, "x")];
        let catalog = Catalog::with_drugs(&drugs).unwrap();

        let err = catalog.drug_for(4, &claim(99, 1)).unwrap_err();
        assert_eq!(err, SchemaError::MissingDrug { claim_index: 4, drug_ref: 99 });
    }

    #[test]
    fn test_missing_provider() {
        let drugs = vec![drug(1, None, "x")];
        let providers = vec![Provider { provider_id: 1, state: "CA".to_string() }];
        let catalog = Catalog::with_drugs_and_providers(&drugs, &providers).unwrap();

        assert!(catalog.provider_for(0, &claim(1, 1)).is_ok());
        assert_eq!(
            catalog.provider_for(1, &claim(1, 2)).unwrap_err(),
            SchemaError::MissingProvider { claim_index: 1, provider_ref: 2 }
        );
    }

    #[test]
    fn test_duplicate_dimension_ids_rejected() {
        let drugs = vec![drug(1, None, "x"), drug(1, Some("X"), "x")];
        assert_eq!(Catalog::with_drugs(&drugs).err(), Some(SchemaError::DuplicateDrug(1)));

        let drugs = vec![drug(1, None, "x")];
        let providers = vec![
            Provider { provider_id: 5, state: "CA".to_string() },
            Provider { provider_id: 5, state: "TX".to_string() },
        ];
        assert_eq!(
            Catalog::with_drugs_and_providers(&drugs, &providers).err(),
            Some(SchemaError::DuplicateProvider(5))
        );
    }
}
