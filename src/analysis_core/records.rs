//! Claim, drug and provider records as read from the schema accessor

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One aggregated prescription-fill record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub drug_ref: i64,
    pub provider_ref: i64,
    pub year: i64,
    pub total_cost: Decimal,
    pub claims_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    pub drug_id: i64,
    /// `None` for generic-only products
    pub brand_name: Option<String>,
    pub generic_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: i64,
    pub state: String,
}

/// Read-only snapshot shared by every report of one run
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub claims: Vec<Claim>,
    pub drugs: Vec<Drug>,
    pub providers: Vec<Provider>,
}

impl Dataset {
    pub fn new(claims: Vec<Claim>, drugs: Vec<Drug>, providers: Vec<Provider>) -> Self {
        Self {
            claims,
            drugs,
            providers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
