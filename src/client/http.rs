use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::client::error::{ClientError, ResponseExt};
use crate::client::traits::*;
use crate::client::wire::{
    AssignModifierSetsRequest, AuthRequest, AuthToken, CreateBundleRequest, CreateMerchantRequest,
    Envelope,
};
use crate::model::{
    BundleSet, Category, Credentials, GiftCard, Id, Identity, Location, LocationUpdate,
    ModifierSet, NewCategory, NewModifierSet, NewProduct, NewTaxRate, Product, TaxRate,
};

/// reqwest-backed client for the management API.
///
/// Merchant creation authenticates as the administrator for that one call.
/// `open_session` then keeps a session token for the new merchant; every
/// later call is issued as that merchant.
#[derive(Debug)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
    session: RwLock<Option<String>>,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            session: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/v1/{}", self.base_url, endpoint)
    }

    fn session_token(&self, operation: ApiOperation) -> ClientResult<String> {
        self.session
            .read()
            .clone()
            .ok_or_else(|| ClientError::Unauthenticated(operation.to_string()))
    }

    async fn authenticate(&self, credentials: &Credentials) -> ClientResult<String> {
        let endpoint = ApiOperation::OpenSession.endpoint();
        log::debug!("POST {} as {}", endpoint, credentials.username);
        let body = AuthRequest {
            email: credentials.username.clone(),
            password: credentials.password.clone(),
        };
        let response = self
            .client
            .post(self.url(endpoint))
            .json(&body)
            .send()
            .await
            .map_client_error()
            .await?;
        let token: AuthToken = decode(response, endpoint).await?;
        Ok(token.token)
    }

    async fn post<B, T>(
        &self,
        operation: ApiOperation,
        query: &[(&str, &str)],
        body: &B,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let token = self.session_token(operation)?;
        log::debug!("POST {}", operation);
        let response = self
            .client
            .post(self.url(operation.endpoint()))
            .bearer_auth(token)
            .query(query)
            .json(body)
            .send()
            .await
            .map_client_error()
            .await?;
        decode(response, operation.endpoint()).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: ApiOperation,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let token = self.session_token(operation)?;
        log::debug!("GET {}", operation);
        let response = self
            .client
            .get(self.url(operation.endpoint()))
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_client_error()
            .await?;
        decode(response, operation.endpoint()).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, operation: &str) -> ClientResult<T> {
    response
        .json::<Envelope<T>>()
        .await
        .map(|envelope| envelope.data)
        .map_err(|e| ClientError::Decode {
            operation: operation.to_string(),
            message: e.to_string(),
        })
}

#[async_trait::async_trait]
impl MerchantApi for HttpClient {
    async fn create_merchant(
        &self,
        admin: &Credentials,
        location_name: &str,
        identity: &Identity,
    ) -> ClientResult<Credentials> {
        let admin_token = self.authenticate(admin).await?;

        let operation = ApiOperation::CreateMerchant;
        log::debug!("POST {}", operation);
        self.client
            .post(self.url(operation.endpoint()))
            .bearer_auth(admin_token)
            .json(&CreateMerchantRequest::new(identity, location_name))
            .send()
            .await
            .map_client_error()
            .await?;
        Ok(Credentials::from(identity))
    }

    async fn open_session(&self, credentials: &Credentials) -> ClientResult<()> {
        let token = self.authenticate(credentials).await?;
        *self.session.write() = Some(token);
        Ok(())
    }
}

#[async_trait::async_trait]
impl LocationApi for HttpClient {
    async fn find_location_by_name(&self, name: &str) -> ClientResult<Option<Location>> {
        let locations: Vec<Location> = self.get(ApiOperation::FindLocation, &[("q", name)]).await?;
        // the listing is a fuzzy search; only an exact name is a match
        Ok(locations.into_iter().find(|location| location.name == name))
    }

    async fn update_location(&self, id: &Id, update: &LocationUpdate) -> ClientResult<Location> {
        self.post(ApiOperation::UpdateLocation, &[("location_id", id.as_str())], update)
            .await
    }
}

#[async_trait::async_trait]
impl CategoryApi for HttpClient {
    async fn create_category(&self, category: &NewCategory) -> ClientResult<Category> {
        self.post(ApiOperation::CreateCategory, &[], category).await
    }
}

#[async_trait::async_trait]
impl TaxRateApi for HttpClient {
    async fn create_tax_rate(&self, tax_rate: &NewTaxRate) -> ClientResult<TaxRate> {
        self.post(ApiOperation::CreateTaxRate, &[], tax_rate).await
    }
}

#[async_trait::async_trait]
impl ModifierApi for HttpClient {
    async fn create_modifier_set(&self, modifier_set: &NewModifierSet) -> ClientResult<ModifierSet> {
        self.post(ApiOperation::CreateModifierSet, &[], modifier_set)
            .await
    }
}

#[async_trait::async_trait]
impl ProductApi for HttpClient {
    async fn create_product(&self, location_id: &Id, product: &NewProduct) -> ClientResult<Product> {
        self.post(ApiOperation::CreateProduct, &[("location_id", location_id.as_str())], product)
            .await
    }

    async fn assign_modifier_sets(&self, product_id: &Id, modifier_set_ids: &[Id]) -> ClientResult<()> {
        let body = AssignModifierSetsRequest {
            product_id: product_id.clone(),
            modifier_set_ids: modifier_set_ids.to_vec(),
        };
        let _: serde_json::Value = self
            .post(ApiOperation::AssignModifierSets, &[], &body)
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl BundleApi for HttpClient {
    async fn create_bundle(
        &self,
        location_id: &Id,
        bundle_sets: &[BundleSet],
        product: &NewProduct,
    ) -> ClientResult<Product> {
        let body = CreateBundleRequest {
            product: product.clone(),
            bundle_sets: bundle_sets.to_vec(),
        };
        self.post(ApiOperation::CreateBundle, &[("location_id", location_id.as_str())], &body)
            .await
    }
}

#[async_trait::async_trait]
impl GiftCardApi for HttpClient {
    async fn create_gift_card(&self) -> ClientResult<GiftCard> {
        self.post(ApiOperation::CreateGiftCard, &[], &serde_json::json!({}))
            .await
    }
}

impl CommerceApi for HttpClient {}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_entity_calls_require_a_merchant_session() {
        let client = HttpClient::new("http://127.0.0.1:9/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9");

        let err = client.create_gift_card().await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthenticated(ref op) if op == "gift_cards.create"));
    }
}
