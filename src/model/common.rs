use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-assigned (or, for nested options, client-generated) identifier.
pub type Id = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: Currency,
}

impl Money {
    pub fn usd(amount: f64) -> Self {
        Self {
            amount,
            currency: Currency::Usd,
        }
    }
}

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}
