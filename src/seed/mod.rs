pub mod bundle;
pub mod catalog;
pub mod data;
pub mod identity;
pub mod ledger;
pub mod location;
pub mod orchestrator;
pub mod taxonomy;
pub mod tenant;

pub use identity::IdentityGenerator;
pub use ledger::{CreatedEntity, EntityKind, SeedLedger};
pub use orchestrator::{seed, SeedOutcome, Seeder, Stage};
pub use taxonomy::{ModifierSets, TaxRates, Taxonomy};
