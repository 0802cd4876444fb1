use itertools::Itertools;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use crate::client::error::ClientError;
use crate::client::traits::*;
use crate::model::{
    generate_id, BundleSet, Category, Credentials, GiftCard, Id, Identity, Location,
    LocationUpdate, ModifierSet, NewCategory, NewModifierSet, NewProduct, NewTaxRate,
    OpeningHours, Product, TaxRate,
};

#[derive(Debug, Clone, PartialEq)]
pub struct MerchantRecord {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub location_ids: Vec<Id>,
}

/// Everything the in-memory backend has accepted, in creation order.
#[derive(Debug, Clone, Default)]
pub struct BackendState {
    pub merchants: Vec<MerchantRecord>,
    pub locations: Vec<Location>,
    pub categories: Vec<Category>,
    pub tax_rates: Vec<TaxRate>,
    pub modifier_sets: Vec<ModifierSet>,
    /// Standalone products and bundles.
    pub products: Vec<Product>,
    pub gift_cards: Vec<GiftCard>,
    /// Every call received, including rejected ones.
    pub calls: Vec<ApiOperation>,
    session: Option<usize>,
}

impl BackendState {
    pub fn product(&self, id: &Id) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn standalone_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| !p.is_bundle()).collect()
    }

    pub fn bundles(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_bundle()).collect()
    }

    pub fn calls_to(&self, operation: ApiOperation) -> usize {
        self.calls.iter().filter(|op| **op == operation).count()
    }

    fn merchant(&self, operation: ApiOperation) -> Result<&MerchantRecord, ClientError> {
        self.session
            .and_then(|index| self.merchants.get(index))
            .ok_or_else(|| ClientError::Unauthenticated(operation.to_string()))
    }

    fn merchant_index(&self, credentials: &Credentials) -> Option<usize> {
        self.merchants
            .iter()
            .position(|m| m.email == credentials.username && m.password == credentials.password)
    }

    fn check_locations(&self, operation: ApiOperation, ids: &[Id]) -> Result<(), ClientError> {
        let merchant = self.merchant(operation)?;
        if ids.is_empty() {
            return Err(ClientError::validation("at least one location is required"));
        }
        match ids.iter().find(|id| !merchant.location_ids.contains(id)) {
            Some(id) => Err(ClientError::validation(format!("unknown location {}", id))),
            None => Ok(()),
        }
    }

    fn check_product(
        &self,
        operation: ApiOperation,
        location_id: &Id,
        product: &NewProduct,
    ) -> Result<(), ClientError> {
        self.check_locations(operation, std::slice::from_ref(location_id))?;
        let override_locations = product.location_overrides.keys().cloned().collect_vec();
        self.check_locations(operation, &override_locations)?;

        for id in &product.category_ids {
            match self.categories.iter().find(|c| &c.id == id) {
                Some(category) if category.location_ids.contains(location_id) => {}
                Some(_) => return Err(not_at_location("category", id, location_id)),
                None => return Err(ClientError::validation(format!("unknown category {}", id))),
            }
        }

        for (override_location, o) in &product.location_overrides {
            for id in &o.tax_rate_ids {
                match self.tax_rates.iter().find(|t| &t.id == id) {
                    Some(rate) if rate.location_ids.contains(override_location) => {}
                    Some(_) => return Err(not_at_location("tax rate", id, override_location)),
                    None => return Err(ClientError::validation(format!("unknown tax rate {}", id))),
                }
            }
        }
        Ok(())
    }
}

fn not_at_location(kind: &str, id: &Id, location_id: &Id) -> ClientError {
    ClientError::validation(format!("{} {} is not available at location {}", kind, id, location_id))
}

/// A validating, in-process implementation of the management API.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<BackendState>,
    rejections: Mutex<HashMap<ApiOperation, usize>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `occurrence`-th (1-based) call to `operation` with a 500.
    pub fn reject_at(&self, operation: ApiOperation, occurrence: usize) {
        self.rejections.lock().insert(operation, occurrence);
    }

    pub fn snapshot(&self) -> BackendState {
        self.state.lock().clone()
    }

    fn call<T>(
        &self,
        operation: ApiOperation,
        f: impl FnOnce(&mut BackendState) -> Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        let mut state = self.state.lock();
        state.calls.push(operation);
        let occurrence = state.calls_to(operation);
        if self.rejections.lock().get(&operation) == Some(&occurrence) {
            return Err(ClientError::Api {
                status_code: 500,
                message: format!("{} call #{} rejected", operation, occurrence),
            });
        }
        f(&mut *state)
    }
}

#[async_trait::async_trait]
impl MerchantApi for InMemoryBackend {
    async fn create_merchant(
        &self,
        admin: &Credentials,
        location_name: &str,
        identity: &Identity,
    ) -> ClientResult<Credentials> {
        self.call(ApiOperation::CreateMerchant, |state| {
            if admin.username.is_empty() {
                return Err(ClientError::Api {
                    status_code: 401,
                    message: "administrator credentials required".to_string(),
                });
            }
            if state.merchants.iter().any(|m| m.email == identity.email) {
                return Err(ClientError::validation(format!(
                    "email {} has already been taken",
                    identity.email
                )));
            }

            let location = Location {
                id: generate_id(),
                name: location_name.to_string(),
                address: None,
                opening_hours: OpeningHours::new(),
            };
            state.merchants.push(MerchantRecord {
                email: identity.email.clone(),
                first_name: identity.first_name.clone(),
                last_name: identity.last_name.clone(),
                password: identity.password.clone(),
                location_ids: vec![location.id.clone()],
            });
            state.locations.push(location);
            Ok(Credentials::from(identity))
        })
    }

    async fn open_session(&self, credentials: &Credentials) -> ClientResult<()> {
        self.call(ApiOperation::OpenSession, |state| {
            let index = state.merchant_index(credentials).ok_or_else(|| ClientError::Api {
                status_code: 401,
                message: format!("invalid credentials for {}", credentials.username),
            })?;
            state.session = Some(index);
            Ok(())
        })
    }
}

#[async_trait::async_trait]
impl LocationApi for InMemoryBackend {
    async fn find_location_by_name(&self, name: &str) -> ClientResult<Option<Location>> {
        self.call(ApiOperation::FindLocation, |state| {
            let merchant = state.merchant(ApiOperation::FindLocation)?;
            Ok(state
                .locations
                .iter()
                .find(|l| l.name == name && merchant.location_ids.contains(&l.id))
                .cloned())
        })
    }

    async fn update_location(&self, id: &Id, update: &LocationUpdate) -> ClientResult<Location> {
        self.call(ApiOperation::UpdateLocation, |state| {
            let owned = state
                .merchant(ApiOperation::UpdateLocation)?
                .location_ids
                .contains(id);
            let location = state
                .locations
                .iter_mut()
                .find(|l| &l.id == id && owned)
                .ok_or_else(|| ClientError::not_found(format!("location {} not found", id)))?;

            location.name = update.name.clone();
            location.address = Some(update.address.clone());
            location.opening_hours = update.opening_hours.clone();
            Ok(location.clone())
        })
    }
}

#[async_trait::async_trait]
impl CategoryApi for InMemoryBackend {
    async fn create_category(&self, category: &NewCategory) -> ClientResult<Category> {
        self.call(ApiOperation::CreateCategory, |state| {
            state.check_locations(ApiOperation::CreateCategory, &category.location_ids)?;
            let created = Category {
                id: generate_id(),
                name: category.name.clone(),
                location_ids: category.location_ids.clone(),
            };
            state.categories.push(created.clone());
            Ok(created)
        })
    }
}

#[async_trait::async_trait]
impl TaxRateApi for InMemoryBackend {
    async fn create_tax_rate(&self, tax_rate: &NewTaxRate) -> ClientResult<TaxRate> {
        self.call(ApiOperation::CreateTaxRate, |state| {
            state.check_locations(ApiOperation::CreateTaxRate, &tax_rate.location_ids)?;
            let created = TaxRate {
                id: generate_id(),
                name: tax_rate.name.clone(),
                value: tax_rate.value,
                apply_to_price: tax_rate.apply_to_price,
                location_ids: tax_rate.location_ids.clone(),
            };
            state.tax_rates.push(created.clone());
            Ok(created)
        })
    }
}

#[async_trait::async_trait]
impl ModifierApi for InMemoryBackend {
    async fn create_modifier_set(&self, modifier_set: &NewModifierSet) -> ClientResult<ModifierSet> {
        self.call(ApiOperation::CreateModifierSet, |state| {
            state.check_locations(ApiOperation::CreateModifierSet, &modifier_set.location_ids)?;

            let existing: HashSet<&Id> = state
                .modifier_sets
                .iter()
                .flat_map(|s| s.options.iter().map(|o| &o.id))
                .collect();
            let fresh = modifier_set.options.iter().map(|o| &o.id).all_unique();
            if !fresh || modifier_set.options.iter().any(|o| existing.contains(&o.id)) {
                return Err(ClientError::validation("modifier option ids must be unique"));
            }

            let created = ModifierSet {
                id: generate_id(),
                name: modifier_set.name.clone(),
                kind: modifier_set.kind,
                single_choice: modifier_set.single_choice,
                force: modifier_set.force,
                options: modifier_set.options.clone(),
                location_ids: modifier_set.location_ids.clone(),
            };
            state.modifier_sets.push(created.clone());
            Ok(created)
        })
    }
}

#[async_trait::async_trait]
impl ProductApi for InMemoryBackend {
    async fn create_product(&self, location_id: &Id, product: &NewProduct) -> ClientResult<Product> {
        self.call(ApiOperation::CreateProduct, |state| {
            state.check_product(ApiOperation::CreateProduct, location_id, product)?;
            let created = Product::from_new(generate_id(), product.clone(), Vec::new());
            state.products.push(created.clone());
            Ok(created)
        })
    }

    async fn assign_modifier_sets(&self, product_id: &Id, modifier_set_ids: &[Id]) -> ClientResult<()> {
        self.call(ApiOperation::AssignModifierSets, |state| {
            let merchant = state.merchant(ApiOperation::AssignModifierSets)?;
            let product_locations = state
                .product(product_id)
                .filter(|p| p.location_overrides.keys().all(|id| merchant.location_ids.contains(id)))
                .map(|p| p.location_overrides.keys().cloned().collect_vec())
                .ok_or_else(|| ClientError::not_found(format!("product {} not found", product_id)))?;

            for id in modifier_set_ids {
                let modifier_set = state
                    .modifier_sets
                    .iter()
                    .find(|s| &s.id == id)
                    .ok_or_else(|| ClientError::validation(format!("unknown modifier set {}", id)))?;
                if let Some(location_id) = product_locations
                    .iter()
                    .find(|l| !modifier_set.location_ids.contains(l))
                {
                    return Err(not_at_location("modifier set", id, location_id));
                }
            }

            if let Some(product) = state.products.iter_mut().find(|p| &p.id == product_id) {
                product.modifier_set_ids = modifier_set_ids.to_vec();
            }
            Ok(())
        })
    }
}

#[async_trait::async_trait]
impl BundleApi for InMemoryBackend {
    async fn create_bundle(
        &self,
        location_id: &Id,
        bundle_sets: &[BundleSet],
        product: &NewProduct,
    ) -> ClientResult<Product> {
        self.call(ApiOperation::CreateBundle, |state| {
            state.check_product(ApiOperation::CreateBundle, location_id, product)?;
            if bundle_sets.is_empty() {
                return Err(ClientError::validation("a bundle needs at least one bundle set"));
            }
            for set in bundle_sets {
                if set.min_quantity > set.max_quantity {
                    return Err(ClientError::validation(format!(
                        "bundle set {} has min_quantity above max_quantity",
                        set.name
                    )));
                }
                for option in &set.options {
                    let offered = state
                        .product(&option.article_id)
                        .map(|article| article.location_overrides.contains_key(location_id));
                    match offered {
                        Some(true) => {}
                        Some(false) => {
                            return Err(ClientError::validation(format!(
                                "article {} is not offered at location {}",
                                option.article_id, location_id
                            )))
                        }
                        None => {
                            return Err(ClientError::validation(format!(
                                "unknown article {}",
                                option.article_id
                            )))
                        }
                    }
                }
            }

            let created = Product::from_new(generate_id(), product.clone(), bundle_sets.to_vec());
            state.products.push(created.clone());
            Ok(created)
        })
    }
}

#[async_trait::async_trait]
impl GiftCardApi for InMemoryBackend {
    async fn create_gift_card(&self) -> ClientResult<GiftCard> {
        self.call(ApiOperation::CreateGiftCard, |state| {
            state.merchant(ApiOperation::CreateGiftCard)?;
            let created = GiftCard { id: generate_id() };
            state.gift_cards.push(created.clone());
            Ok(created)
        })
    }
}

impl CommerceApi for InMemoryBackend {}
