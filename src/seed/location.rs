use crate::client::LocationApi;
use crate::error::SeedError;
use crate::model::{Address, Interval, Location, LocationUpdate, OpeningHours, Weekday};

/// One `00:00`–`23:59` interval on every day of the week.
pub fn always_open() -> OpeningHours {
    Weekday::ALL
        .iter()
        .map(|day| (*day, vec![Interval::new("00:00", "23:59")]))
        .collect()
}

/// Replace the location's address and opening hours. The update is a full
/// overwrite, so the current name is re-sent unchanged.
pub async fn configure_location<A>(
    api: &A,
    location: &Location,
    address: Address,
    opening_hours: OpeningHours,
) -> Result<Location, SeedError>
where
    A: LocationApi + ?Sized,
{
    let update = LocationUpdate {
        name: location.name.clone(),
        address,
        opening_hours,
    };
    let updated = api.update_location(&location.id, &update).await?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{InMemoryBackend, MerchantApi};
    use crate::model::{Credentials, Identity};
    use crate::seed::data::seed_address;

    #[test]
    fn test_always_open_covers_every_day_once() {
        let hours = always_open();
        assert_eq!(hours.len(), 7);
        for day in Weekday::ALL {
            assert_eq!(hours[&day], vec![Interval::new("00:00", "23:59")]);
        }
    }

    #[tokio::test]
    async fn test_configure_location_keeps_name_and_replaces_fields() {
        let backend = InMemoryBackend::new();
        let identity = Identity::new("Ada".to_string(), "Lovelace".to_string(), "o".to_string());
        let credentials = backend
            .create_merchant(&Credentials::new("admin", "pw"), "12 Elm Way", &identity)
            .await
            .unwrap();
        backend.open_session(&credentials).await.unwrap();
        let location = backend.find_location_by_name("12 Elm Way").await.unwrap().unwrap();

        let updated = configure_location(&backend, &location, seed_address(), always_open())
            .await
            .unwrap();

        assert_eq!(updated.id, location.id);
        assert_eq!(updated.name, "12 Elm Way");
        let address = updated.address.unwrap();
        assert_eq!(address.line1, "2200 Central Drive");
        assert_eq!(address.city, "Bedford");
        assert_eq!(updated.opening_hours[&Weekday::Monday], vec![Interval::new("00:00", "23:59")]);
    }

    #[tokio::test]
    async fn test_update_of_unknown_location_is_an_api_error() {
        let backend = InMemoryBackend::new();
        let identity = Identity::new("Ada".to_string(), "Lovelace".to_string(), "o".to_string());
        let credentials = backend
            .create_merchant(&Credentials::new("admin", "pw"), "12 Elm Way", &identity)
            .await
            .unwrap();
        backend.open_session(&credentials).await.unwrap();
        let ghost = Location {
            id: "missing".to_string(),
            name: "Ghost".to_string(),
            address: None,
            opening_hours: OpeningHours::new(),
        };

        let err = configure_location(&backend, &ghost, seed_address(), always_open())
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Client(ref e) if e.status_code() == Some(404)));
    }
}
