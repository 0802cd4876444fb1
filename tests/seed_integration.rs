use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pt_seed::client::wire::{
    AssignModifierSetsRequest, AuthRequest, AuthToken, CreateBundleRequest, CreateMerchantRequest,
    Envelope, LocationIdQuery, LocationQuery,
};
use pt_seed::client::{
    ApiOperation, BundleApi, CategoryApi, ClientError, GiftCardApi, HttpClient, InMemoryBackend,
    LocationApi, MerchantApi, ModifierApi, ProductApi, TaxRateApi,
};
use pt_seed::model::{
    Category, Credentials, GiftCard, Location, LocationUpdate, ModifierSet, NewCategory,
    NewModifierSet, NewProduct, NewTaxRate, Product, TaxRate,
};
use pt_seed::seed::{seed, EntityKind, Stage};
use pt_seed::{SeedError, SeedOptions};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

// Stub of the management API: HTTP in front of the in-memory backend
struct StubApi {
    backend: InMemoryBackend,
    admin: Credentials,
}

type StubState = Arc<StubApi>;

struct ApiError(ClientError);

impl From<ClientError> for ApiError {
    fn from(e: ClientError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self
            .0
            .status_code()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::UNAUTHORIZED);
        (status, self.0.to_string()).into_response()
    }
}

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(Envelope::new(data)))
}

fn token_for(email: &str) -> String {
    format!("token:{}", email)
}

fn forbidden(message: &str) -> ApiError {
    ApiError(ClientError::Api {
        status_code: 403,
        message: message.to_string(),
    })
}

fn bearer(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
        .ok_or_else(|| ApiError(ClientError::Unauthenticated("stub".to_string())))
}

fn require_merchant(state: &StubApi, headers: &HeaderMap) -> Result<(), ApiError> {
    let token = bearer(headers)?;
    let known = state
        .backend
        .snapshot()
        .merchants
        .iter()
        .any(|m| token_for(&m.email) == token);
    if known {
        Ok(())
    } else {
        Err(forbidden("not a merchant session"))
    }
}

async fn auth(
    State(state): State<StubState>,
    Json(request): Json<AuthRequest>,
) -> ApiResult<AuthToken> {
    let credentials = Credentials::new(request.email.as_str(), request.password.as_str());
    if credentials != state.admin {
        state.backend.open_session(&credentials).await?;
    }
    ok(AuthToken {
        token: token_for(&credentials.username),
    })
}

async fn create_merchant(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(request): Json<CreateMerchantRequest>,
) -> ApiResult<Value> {
    if bearer(&headers)? != token_for(&state.admin.username) {
        return Err(forbidden("administrator session required"));
    }
    state
        .backend
        .create_merchant(&state.admin, &request.location_name, &request.identity())
        .await?;
    ok(serde_json::json!({ "email": request.email }))
}

async fn list_locations(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<LocationQuery>,
) -> ApiResult<Vec<Location>> {
    require_merchant(&state, &headers)?;
    let found = state.backend.find_location_by_name(&query.q).await?;
    // the real listing is a fuzzy search, so answer with a near miss first
    let near_miss = Location {
        id: "near-miss".to_string(),
        name: format!("{} Annex", query.q),
        address: None,
        opening_hours: Default::default(),
    };
    ok(std::iter::once(near_miss).chain(found).collect())
}

async fn update_location(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<LocationIdQuery>,
    Json(update): Json<LocationUpdate>,
) -> ApiResult<Location> {
    require_merchant(&state, &headers)?;
    ok(state.backend.update_location(&query.location_id, &update).await?)
}

async fn create_category(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(category): Json<NewCategory>,
) -> ApiResult<Category> {
    require_merchant(&state, &headers)?;
    ok(state.backend.create_category(&category).await?)
}

async fn create_tax_rate(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(tax_rate): Json<NewTaxRate>,
) -> ApiResult<TaxRate> {
    require_merchant(&state, &headers)?;
    ok(state.backend.create_tax_rate(&tax_rate).await?)
}

async fn create_modifier_set(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(modifier_set): Json<NewModifierSet>,
) -> ApiResult<ModifierSet> {
    require_merchant(&state, &headers)?;
    ok(state.backend.create_modifier_set(&modifier_set).await?)
}

async fn create_product(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<LocationIdQuery>,
    Json(product): Json<NewProduct>,
) -> ApiResult<Product> {
    require_merchant(&state, &headers)?;
    ok(state.backend.create_product(&query.location_id, &product).await?)
}

async fn assign_modifier_sets(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(request): Json<AssignModifierSetsRequest>,
) -> ApiResult<Value> {
    require_merchant(&state, &headers)?;
    state
        .backend
        .assign_modifier_sets(&request.product_id, &request.modifier_set_ids)
        .await?;
    ok(Value::Null)
}

async fn create_bundle(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<LocationIdQuery>,
    Json(request): Json<CreateBundleRequest>,
) -> ApiResult<Product> {
    require_merchant(&state, &headers)?;
    ok(state
        .backend
        .create_bundle(&query.location_id, &request.bundle_sets, &request.product)
        .await?)
}

async fn create_gift_card(State(state): State<StubState>, headers: HeaderMap) -> ApiResult<GiftCard> {
    require_merchant(&state, &headers)?;
    ok(state.backend.create_gift_card().await?)
}

async fn spawn_stub(admin: Credentials) -> (String, StubState) {
    let state = Arc::new(StubApi {
        backend: InMemoryBackend::new(),
        admin,
    });

    let app = Router::new()
        .route("/v1/users.auth", post(auth))
        .route("/v1/merchants.create", post(create_merchant))
        .route("/v1/locations.list", get(list_locations))
        .route("/v1/locations.update", post(update_location))
        .route("/v1/categories.create", post(create_category))
        .route("/v1/tax_rates.create", post(create_tax_rate))
        .route("/v1/modifier_sets.create", post(create_modifier_set))
        .route("/v1/products.create", post(create_product))
        .route("/v1/products.assign_modifier_sets", post(assign_modifier_sets))
        .route("/v1/bundles.create", post(create_bundle))
        .route("/v1/gift_cards.create", post(create_gift_card))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub API");
    let address = listener.local_addr().expect("stub API has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub API crashed");
    });

    (format!("http://{}", address), state)
}

fn admin() -> Credentials {
    Credentials::new("admin@example.com", "secret")
}

#[tokio::test]
async fn test_full_seed_over_http() {
    let (base_url, stub) = spawn_stub(admin()).await;
    let client = HttpClient::new(base_url, Duration::from_secs(5)).unwrap();
    let options = SeedOptions {
        parallel_taxonomy: true,
        ..SeedOptions::default()
    };

    let outcome = seed(&client, &admin(), &options)
        .await
        .expect("seeding over HTTP failed");

    assert!(!outcome.credentials.username.is_empty());
    assert!(!outcome.credentials.password.is_empty());

    let state = stub.backend.snapshot();
    assert_eq!(state.merchants.len(), 1);
    assert_eq!(state.merchants[0].email, outcome.credentials.username);
    assert_eq!(state.locations.len(), 1);
    assert_eq!(
        state.locations[0].address.as_ref().map(|a| a.line1.as_str()),
        Some("2200 Central Drive")
    );
    assert_eq!(state.locations[0].opening_hours.len(), 7);
    assert_eq!(state.categories.len(), 1);
    assert_eq!(state.tax_rates.len(), 4);
    assert_eq!(state.modifier_sets.len(), 3);
    assert_eq!(state.standalone_products().len(), 7);
    assert_eq!(state.bundles().len(), 1);
    assert_eq!(state.gift_cards.len(), 1);

    let bundle = state.bundles()[0];
    for article_id in bundle.article_ids() {
        assert!(state.product(article_id).is_some());
    }
    assert_eq!(outcome.ledger.count(EntityKind::GiftCard), 1);
}

#[tokio::test]
async fn test_wrong_admin_login_aborts_at_merchant() {
    let (base_url, stub) = spawn_stub(admin()).await;
    let client = HttpClient::new(base_url, Duration::from_secs(5)).unwrap();
    let intruder = Credentials::new("someone@example.com", "guess");

    let err = seed(&client, &intruder, &SeedOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::Aborted { stage: Stage::Merchant, .. }));
    assert!(matches!(err.root(), SeedError::Client(e) if e.status_code() == Some(401)));
    assert!(err.created().unwrap().is_empty());
    assert!(stub.backend.snapshot().merchants.is_empty());
}

#[tokio::test]
async fn test_remote_failure_leaves_partial_tenant() {
    let (base_url, stub) = spawn_stub(admin()).await;
    stub.backend.reject_at(ApiOperation::CreateBundle, 1);
    let client = HttpClient::new(base_url, Duration::from_secs(5)).unwrap();

    let err = seed(&client, &admin(), &SeedOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::Aborted { stage: Stage::Bundle, .. }));
    assert!(matches!(err.root(), SeedError::Client(e) if e.status_code() == Some(500)));

    let state = stub.backend.snapshot();
    assert_eq!(state.standalone_products().len(), 7);
    assert!(state.bundles().is_empty());
    assert!(state.gift_cards.is_empty());
    assert_eq!(err.created().unwrap().count(EntityKind::Product), 7);
}

#[tokio::test]
async fn test_rejected_merchant_login_keeps_the_merchant_in_the_ledger() {
    let (base_url, stub) = spawn_stub(admin()).await;
    stub.backend.reject_at(ApiOperation::OpenSession, 1);
    let client = HttpClient::new(base_url, Duration::from_secs(5)).unwrap();

    let err = seed(&client, &admin(), &SeedOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::Aborted { stage: Stage::Session, .. }));
    assert!(matches!(err.root(), SeedError::Client(e) if e.status_code() == Some(500)));

    let state = stub.backend.snapshot();
    assert_eq!(state.merchants.len(), 1);
    let created = err.created().unwrap();
    assert_eq!(created.count(EntityKind::Merchant), 1);
    assert_eq!(created.entries()[0].id, state.merchants[0].email);
}
