use std::collections::BTreeMap;

use crate::client::ProductApi;
use crate::error::SeedError;
use crate::model::{
    Category, Id, Location, LocationOverride, ModifierSet, Money, NewProduct, Product, TaxRate,
};

pub const DEFAULT_MARGIN: &str = "50.0";
pub const DEFAULT_UNIT: &str = "unit";

/// Inputs for a product creation. Every referenced record must already have
/// been returned by the API.
#[derive(Debug, Clone)]
pub struct ProductDraft<'a> {
    pub name: &'a str,
    pub price: f64,
    pub cost: f64,
    pub category: &'a Category,
    pub location: &'a Location,
    pub tax_rates: Vec<&'a TaxRate>,
    pub modifier_sets: Vec<&'a ModifierSet>,
}

impl<'a> ProductDraft<'a> {
    /// The creation payload. The location override repeats the top-level
    /// price and cost; the API requires both.
    pub fn to_request(&self) -> NewProduct {
        let price = Money::usd(self.price);
        let cost = Money::usd(self.cost);

        let mut location_overrides = BTreeMap::new();
        location_overrides.insert(
            self.location.id.clone(),
            LocationOverride {
                price: price.clone(),
                cost: cost.clone(),
                margin: DEFAULT_MARGIN.to_string(),
                unit: DEFAULT_UNIT.to_string(),
                active: true,
                tax_rate_ids: self.tax_rates.iter().map(|t| t.id.clone()).collect(),
            },
        );

        NewProduct {
            name: self.name.to_string(),
            category_ids: vec![self.category.id.clone()],
            price,
            cost,
            location_overrides,
        }
    }

    pub fn modifier_set_ids(&self) -> Vec<Id> {
        self.modifier_sets.iter().map(|m| m.id.clone()).collect()
    }
}

/// A product that exists remotely but whose modifier sets have not been
/// assigned yet. Dropping it leaves the product without modifiers.
#[must_use = "modifier sets are only attached by assign_modifier_sets"]
#[derive(Debug, Clone, PartialEq)]
pub struct UnassignedProduct {
    product: Product,
    modifier_set_ids: Vec<Id>,
}

impl UnassignedProduct {
    pub fn new(product: Product, modifier_set_ids: Vec<Id>) -> Self {
        Self {
            product,
            modifier_set_ids,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn pending_modifier_set_ids(&self) -> &[Id] {
        &self.modifier_set_ids
    }

    /// Second phase: attach the modifier sets. An empty set is still sent.
    pub async fn assign_modifier_sets<A>(self, api: &A) -> Result<Product, SeedError>
    where
        A: ProductApi + ?Sized,
    {
        let mut product = self.product;
        api.assign_modifier_sets(&product.id, &self.modifier_set_ids)
            .await?;
        product.modifier_set_ids = self.modifier_set_ids;
        Ok(product)
    }
}

/// First phase: create the product with its category, price and tax setup.
pub async fn insert_product<A>(api: &A, draft: &ProductDraft<'_>) -> Result<UnassignedProduct, SeedError>
where
    A: ProductApi + ?Sized,
{
    let product = api
        .create_product(&draft.location.id, &draft.to_request())
        .await?;
    Ok(UnassignedProduct::new(product, draft.modifier_set_ids()))
}

/// Both phases. Not atomic: a failure in the assignment leaves the product
/// created without modifier sets.
pub async fn create_product<A>(api: &A, draft: &ProductDraft<'_>) -> Result<Product, SeedError>
where
    A: ProductApi + ?Sized,
{
    insert_product(api, draft).await?.assign_modifier_sets(api).await
}
