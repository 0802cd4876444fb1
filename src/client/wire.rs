//! Request and response bodies of the management API.

use serde::{Deserialize, Serialize};

use crate::model::{BundleSet, Id, Identity, NewProduct};

/// Every successful response wraps its payload in `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMerchantRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub location_name: String,
}

impl CreateMerchantRequest {
    pub fn new(identity: &Identity, location_name: &str) -> Self {
        Self {
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            email: identity.email.clone(),
            password: identity.password.clone(),
            location_name: location_name.to_string(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationQuery {
    pub q: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationIdQuery {
    pub location_id: Id,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignModifierSetsRequest {
    pub product_id: Id,
    pub modifier_set_ids: Vec<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBundleRequest {
    #[serde(flatten)]
    pub product: NewProduct,
    pub bundle_sets: Vec<BundleSet>,
}
