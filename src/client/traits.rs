use crate::client::ClientError;
use crate::model::{
    BundleSet, Category, Credentials, GiftCard, Id, Identity, Location, LocationUpdate,
    ModifierSet, NewCategory, NewModifierSet, NewProduct, NewTaxRate, Product, TaxRate,
};

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Every remote call the seeder issues, used for logging and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    CreateMerchant,
    OpenSession,
    FindLocation,
    UpdateLocation,
    CreateCategory,
    CreateTaxRate,
    CreateModifierSet,
    CreateProduct,
    AssignModifierSets,
    CreateBundle,
    CreateGiftCard,
}

impl ApiOperation {
    /// RPC-style endpoint name on the management API.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ApiOperation::CreateMerchant => "merchants.create",
            ApiOperation::OpenSession => "users.auth",
            ApiOperation::FindLocation => "locations.list",
            ApiOperation::UpdateLocation => "locations.update",
            ApiOperation::CreateCategory => "categories.create",
            ApiOperation::CreateTaxRate => "tax_rates.create",
            ApiOperation::CreateModifierSet => "modifier_sets.create",
            ApiOperation::CreateProduct => "products.create",
            ApiOperation::AssignModifierSets => "products.assign_modifier_sets",
            ApiOperation::CreateBundle => "bundles.create",
            ApiOperation::CreateGiftCard => "gift_cards.create",
        }
    }
}

impl std::fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.endpoint())
    }
}

#[async_trait::async_trait]
pub trait MerchantApi: Send + Sync {
    /// Create a merchant (and its default location named `location_name`)
    /// as the administrator.
    async fn create_merchant(
        &self,
        admin: &Credentials,
        location_name: &str,
        identity: &Identity,
    ) -> ClientResult<Credentials>;

    /// Log in as the merchant; every later call is issued in that session.
    async fn open_session(&self, credentials: &Credentials) -> ClientResult<()>;
}

#[async_trait::async_trait]
pub trait LocationApi: Send + Sync {
    async fn find_location_by_name(&self, name: &str) -> ClientResult<Option<Location>>;
    /// Full replacement of the location document.
    async fn update_location(&self, id: &Id, update: &LocationUpdate) -> ClientResult<Location>;
}

#[async_trait::async_trait]
pub trait CategoryApi: Send + Sync {
    async fn create_category(&self, category: &NewCategory) -> ClientResult<Category>;
}

#[async_trait::async_trait]
pub trait TaxRateApi: Send + Sync {
    async fn create_tax_rate(&self, tax_rate: &NewTaxRate) -> ClientResult<TaxRate>;
}

#[async_trait::async_trait]
pub trait ModifierApi: Send + Sync {
    async fn create_modifier_set(&self, modifier_set: &NewModifierSet) -> ClientResult<ModifierSet>;
}

#[async_trait::async_trait]
pub trait ProductApi: Send + Sync {
    async fn create_product(&self, location_id: &Id, product: &NewProduct) -> ClientResult<Product>;
    /// Replace the product's modifier sets. An empty slice is a valid no-op assignment.
    async fn assign_modifier_sets(&self, product_id: &Id, modifier_set_ids: &[Id]) -> ClientResult<()>;
}

#[async_trait::async_trait]
pub trait BundleApi: Send + Sync {
    async fn create_bundle(
        &self,
        location_id: &Id,
        bundle_sets: &[BundleSet],
        product: &NewProduct,
    ) -> ClientResult<Product>;
}

#[async_trait::async_trait]
pub trait GiftCardApi: Send + Sync {
    async fn create_gift_card(&self) -> ClientResult<GiftCard>;
}

pub trait CommerceApi:
    MerchantApi
    + LocationApi
    + CategoryApi
    + TaxRateApi
    + ModifierApi
    + ProductApi
    + BundleApi
    + GiftCardApi
    + Send
    + Sync
{
}
