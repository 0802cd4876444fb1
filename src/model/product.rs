use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{Id, Money};

/// Per-location price, cost and tax configuration of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationOverride {
    pub price: Money,
    pub cost: Money,
    pub margin: String,
    pub unit: String,
    pub active: bool,
    pub tax_rate_ids: Vec<Id>,
}

/// Creation payload shared by standalone products and bundles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category_ids: Vec<Id>,
    pub price: Money,
    pub cost: Money,
    pub location_overrides: BTreeMap<Id, LocationOverride>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleOption {
    pub id: Id,
    /// Id of a previously created product offered by this option.
    pub article_id: Id,
    pub price_adjustment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleSet {
    pub id: Id,
    pub name: String,
    pub position: u32,
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub options: Vec<BundleOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id,
    pub name: String,
    pub category_ids: Vec<Id>,
    pub price: Money,
    pub cost: Money,
    pub location_overrides: BTreeMap<Id, LocationOverride>,
    #[serde(default)]
    pub modifier_set_ids: Vec<Id>,
    #[serde(default)]
    pub bundle_sets: Vec<BundleSet>,
}

impl Product {
    pub fn from_new(id: Id, new: NewProduct, bundle_sets: Vec<BundleSet>) -> Self {
        Self {
            id,
            name: new.name,
            category_ids: new.category_ids,
            price: new.price,
            cost: new.cost,
            location_overrides: new.location_overrides,
            modifier_set_ids: Vec::new(),
            bundle_sets,
        }
    }

    pub fn is_bundle(&self) -> bool {
        !self.bundle_sets.is_empty()
    }

    /// Ids of every product offered by this bundle's sets, in set/option order.
    pub fn article_ids(&self) -> Vec<&Id> {
        self.bundle_sets
            .iter()
            .flat_map(|set| set.options.iter().map(|option| &option.article_id))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCard {
    pub id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_without_modifiers_or_bundle_sets_deserializes() {
        let json = serde_json::json!({
            "id": "p-1",
            "name": "Scenario [A]",
            "category_ids": ["c-1"],
            "price": {"amount": 1.0, "currency": "USD"},
            "cost": {"amount": 0.5, "currency": "USD"},
            "location_overrides": {}
        });

        let product: Product = serde_json::from_value(json).unwrap();
        assert!(product.modifier_set_ids.is_empty());
        assert!(!product.is_bundle());
        assert!(product.article_ids().is_empty());
    }
}
