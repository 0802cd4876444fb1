use crate::client::{LocationApi, MerchantApi};
use crate::error::SeedError;
use crate::model::{Credentials, Identity, Location};

/// Create the merchant; the API also creates its default location named
/// `location_name`. Returns the credentials of the merchant's test user.
pub async fn create_merchant<A>(
    api: &A,
    admin: &Credentials,
    location_name: &str,
    identity: &Identity,
) -> Result<Credentials, SeedError>
where
    A: MerchantApi + ?Sized,
{
    log::info!("creating merchant {} with location {:?}", identity.email, location_name);
    let credentials = api.create_merchant(admin, location_name, identity).await?;
    Ok(credentials)
}

/// Log in as the new merchant so that later calls act on its tenant.
pub async fn open_session<A>(api: &A, credentials: &Credentials) -> Result<(), SeedError>
where
    A: MerchantApi + ?Sized,
{
    log::info!("opening a session as {}", credentials.username);
    api.open_session(credentials).await?;
    Ok(())
}

/// Resolve a location by exact name. Merchant creation does not return the
/// default location's id, so this is how the seeder learns it.
pub async fn find_location_by_name<A>(api: &A, name: &str) -> Result<Location, SeedError>
where
    A: LocationApi + ?Sized,
{
    api.find_location_by_name(name)
        .await?
        .ok_or_else(|| SeedError::LocationNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryBackend;

    #[tokio::test]
    async fn test_bootstrap_creates_one_merchant_and_one_location() {
        let backend = InMemoryBackend::new();
        let identity = Identity::new("Ada".to_string(), "Lovelace".to_string(), "o".to_string());

        let credentials = create_merchant(&backend, &Credentials::new("admin", "pw"), "12 Elm Way", &identity)
            .await
            .unwrap();
        assert_eq!(credentials.username, "ordering.ada-lovelace@example.com");
        assert_eq!(credentials.password, "o");
        open_session(&backend, &credentials).await.unwrap();

        let location = find_location_by_name(&backend, "12 Elm Way").await.unwrap();
        assert_eq!(location.name, "12 Elm Way");

        let state = backend.snapshot();
        assert_eq!(state.merchants.len(), 1);
        assert_eq!(state.locations.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_location_name_is_not_found() {
        let backend = InMemoryBackend::new();
        let identity = Identity::new("Ada".to_string(), "Lovelace".to_string(), "o".to_string());
        let credentials = create_merchant(&backend, &Credentials::new("admin", "pw"), "12 Elm Way", &identity)
            .await
            .unwrap();
        open_session(&backend, &credentials).await.unwrap();

        let err = find_location_by_name(&backend, "Location 1").await.unwrap_err();
        assert!(matches!(err, SeedError::LocationNotFound(ref name) if name == "Location 1"));
    }
}
