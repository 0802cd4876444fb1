use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::CommerceApi;
use crate::config::SeedOptions;
use crate::error::SeedError;
use crate::model::{Credentials, Id, Location, Product};
use crate::seed::bundle::{self, bundle_set, BundleDraft};
use crate::seed::catalog::{self, ProductDraft, UnassignedProduct};
use crate::seed::data::{
    seed_address, ProductScenario, BUNDLE, BUNDLE_COMPONENTS, STANDALONE_PRODUCTS,
};
use crate::seed::identity::IdentityGenerator;
use crate::seed::ledger::{EntityKind, SeedLedger};
use crate::seed::location::{always_open, configure_location};
use crate::seed::taxonomy::{self, Taxonomy};
use crate::seed::tenant;

/// Steps of a seed run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Identity,
    Merchant,
    Session,
    LocationLookup,
    LocationUpdate,
    Category,
    TaxRates,
    ModifierSets,
    Products,
    BundleComponents,
    Bundle,
    GiftCard,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Stage::Identity => "identity",
            Stage::Merchant => "merchant",
            Stage::Session => "merchant session",
            Stage::LocationLookup => "location lookup",
            Stage::LocationUpdate => "location update",
            Stage::Category => "category",
            Stage::TaxRates => "tax rates",
            Stage::ModifierSets => "modifier sets",
            Stage::Products => "products",
            Stage::BundleComponents => "bundle components",
            Stage::Bundle => "bundle",
            Stage::GiftCard => "gift card",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedOutcome {
    pub credentials: Credentials,
    pub location_id: Id,
    pub ledger: SeedLedger,
    pub completed_at: DateTime<Utc>,
}

/// Resolve a scenario row against the created taxonomy.
pub fn scenario_draft<'a>(
    scenario: &'a ProductScenario,
    location: &'a Location,
    taxonomy: &'a Taxonomy,
) -> ProductDraft<'a> {
    ProductDraft {
        name: scenario.name,
        price: scenario.price,
        cost: scenario.cost,
        category: &taxonomy.category,
        location,
        tax_rates: taxonomy.tax_rates.select(scenario.tax_rates),
        modifier_sets: taxonomy.modifier_sets.select(scenario.modifier_sets),
    }
}

/// Runs the fixed seeding sequence once. Nothing is rolled back on failure:
/// the error carries the ledger of what was left on the remote system.
pub struct Seeder<'a, A: CommerceApi + ?Sized> {
    api: &'a A,
    admin: &'a Credentials,
    options: &'a SeedOptions,
    identities: IdentityGenerator,
    ledger: SeedLedger,
    stage: Stage,
}

impl<'a, A: CommerceApi + ?Sized> Seeder<'a, A> {
    pub fn new(api: &'a A, admin: &'a Credentials, options: &'a SeedOptions) -> Self {
        let identities = match options.rng_seed {
            Some(seed) => IdentityGenerator::with_seed(seed),
            None => IdentityGenerator::new(),
        };
        Self {
            api,
            admin,
            options,
            identities,
            ledger: SeedLedger::new(),
            stage: Stage::Identity,
        }
    }

    pub fn with_identity_generator(mut self, identities: IdentityGenerator) -> Self {
        self.identities = identities;
        self
    }

    pub async fn run(mut self) -> Result<SeedOutcome, SeedError> {
        match self.seed().await {
            Ok((credentials, location_id)) => {
                log::info!("seeding finished: {} entities created", self.ledger.len());
                Ok(SeedOutcome {
                    credentials,
                    location_id,
                    ledger: self.ledger,
                    completed_at: Utc::now(),
                })
            }
            Err(source) => {
                log::warn!(
                    "seeding failed during {}; {} entities remain on the remote system",
                    self.stage,
                    self.ledger.len()
                );
                for entry in self.ledger.incomplete() {
                    log::warn!("{} {:?} ({}) has no modifier sets attached", entry.kind, entry.name, entry.id);
                }
                Err(SeedError::Aborted {
                    stage: self.stage,
                    created: self.ledger,
                    source: Box::new(source),
                })
            }
        }
    }

    fn enter(&mut self, stage: Stage) {
        log::info!("seeding {}", stage);
        self.stage = stage;
    }

    async fn seed(&mut self) -> Result<(Credentials, Id), SeedError> {
        self.enter(Stage::Identity);
        let identity = self.identities.next_identity(&self.options.merchant_password);
        let location_name = self.identities.next_location_name();

        self.enter(Stage::Merchant);
        let credentials =
            tenant::create_merchant(self.api, self.admin, &location_name, &identity).await?;
        let full_name = format!("{} {}", identity.first_name, identity.last_name);
        self.ledger
            .record(EntityKind::Merchant, &credentials.username, &full_name);

        self.enter(Stage::Session);
        tenant::open_session(self.api, &credentials).await?;

        self.enter(Stage::LocationLookup);
        let location = tenant::find_location_by_name(self.api, &location_name).await?;
        self.ledger.record_resolved(&location);

        self.enter(Stage::LocationUpdate);
        let location = configure_location(self.api, &location, seed_address(), always_open()).await?;

        let parallel = self.options.parallel_taxonomy;
        self.enter(Stage::Category);
        let category = taxonomy::create_category(self.api, &location, &mut self.ledger).await?;
        self.enter(Stage::TaxRates);
        let tax_rates =
            taxonomy::create_tax_rates(self.api, &location, parallel, &mut self.ledger).await?;
        self.enter(Stage::ModifierSets);
        let modifier_sets =
            taxonomy::create_modifier_sets(self.api, &location, parallel, &mut self.ledger).await?;
        let taxonomy = Taxonomy {
            category,
            tax_rates,
            modifier_sets,
        };

        self.enter(Stage::Products);
        for scenario in &STANDALONE_PRODUCTS {
            let draft = scenario_draft(scenario, &location, &taxonomy);
            self.create_product(&draft).await?;
        }

        self.enter(Stage::BundleComponents);
        let mut components = Vec::with_capacity(BUNDLE_COMPONENTS.len());
        for scenario in &BUNDLE_COMPONENTS {
            let draft = scenario_draft(scenario, &location, &taxonomy);
            components.push(self.create_product(&draft).await?);
        }

        self.enter(Stage::Bundle);
        let bundle_scenario = BUNDLE.product;
        let articles: Vec<(&Product, f64)> = components
            .iter()
            .zip(BUNDLE.price_adjustments)
            .collect();
        let draft = BundleDraft {
            product: scenario_draft(&bundle_scenario, &location, &taxonomy),
            bundle_sets: vec![bundle_set(
                BUNDLE.set_name,
                BUNDLE.set_position,
                BUNDLE.min_quantity,
                BUNDLE.max_quantity,
                &articles,
            )],
        };
        let pending = bundle::insert_bundle(self.api, &draft).await?;
        self.finish(EntityKind::Bundle, pending).await?;

        self.enter(Stage::GiftCard);
        let gift_card = self.api.create_gift_card().await?;
        self.ledger.record_entity(&gift_card);

        Ok((credentials, location.id))
    }

    async fn create_product(&mut self, draft: &ProductDraft<'_>) -> Result<Product, SeedError> {
        let pending = catalog::insert_product(self.api, draft).await?;
        self.finish(EntityKind::Product, pending).await
    }

    async fn finish(&mut self, kind: EntityKind, pending: UnassignedProduct) -> Result<Product, SeedError> {
        self.ledger
            .record_pending(kind, &pending.product().id, &pending.product().name);
        let product = pending.assign_modifier_sets(self.api).await?;
        self.ledger.complete(&product.id);
        Ok(product)
    }
}

/// Seed one tenant through `api` with a fresh identity.
pub async fn seed<A>(api: &A, admin: &Credentials, options: &SeedOptions) -> Result<SeedOutcome, SeedError>
where
    A: CommerceApi + ?Sized,
{
    Seeder::new(api, admin, options).run().await
}
