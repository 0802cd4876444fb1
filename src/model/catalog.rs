use serde::{Deserialize, Serialize};

use crate::model::{Id, Money};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub location_ids: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub location_ids: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
    pub id: Id,
    pub name: String,
    /// Percentage, e.g. `25.0` for 25%.
    pub value: f64,
    /// `true` when the tax is added on top of the listed price, `false` when
    /// it is already included in it.
    pub apply_to_price: bool,
    pub location_ids: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTaxRate {
    pub name: String,
    pub value: f64,
    pub apply_to_price: bool,
    pub location_ids: Vec<Id>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierSetType {
    Addon,
    Hold,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierOption {
    /// Client-generated; must be unique across every option ever submitted.
    pub id: Id,
    pub name: String,
    pub position: u32,
    pub active: bool,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierSet {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ModifierSetType,
    pub single_choice: bool,
    pub force: bool,
    pub options: Vec<ModifierOption>,
    pub location_ids: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewModifierSet {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ModifierSetType,
    pub single_choice: bool,
    pub force: bool,
    pub options: Vec<ModifierOption>,
    pub location_ids: Vec<Id>,
}
