use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Category, GiftCard, Id, Location, ModifierSet, TaxRate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Merchant,
    Location,
    Category,
    TaxRate,
    ModifierSet,
    Product,
    Bundle,
    GiftCard,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            EntityKind::Merchant => write!(f, "merchant"),
            EntityKind::Location => write!(f, "location"),
            EntityKind::Category => write!(f, "category"),
            EntityKind::TaxRate => write!(f, "tax rate"),
            EntityKind::ModifierSet => write!(f, "modifier set"),
            EntityKind::Product => write!(f, "product"),
            EntityKind::Bundle => write!(f, "bundle"),
            EntityKind::GiftCard => write!(f, "gift card"),
        }
    }
}

/// A remote record the ledger can account for.
pub trait Seeded {
    const KIND: EntityKind;
    fn seeded_id(&self) -> &Id;
    fn seeded_name(&self) -> &str;
}

macro_rules! impl_seeded {
    ($ty:ty, $kind:expr) => {
        impl Seeded for $ty {
            const KIND: EntityKind = $kind;
            fn seeded_id(&self) -> &Id {
                &self.id
            }
            fn seeded_name(&self) -> &str {
                &self.name
            }
        }
    };
}

impl_seeded!(Location, EntityKind::Location);
impl_seeded!(Category, EntityKind::Category);
impl_seeded!(TaxRate, EntityKind::TaxRate);
impl_seeded!(ModifierSet, EntityKind::ModifierSet);

impl Seeded for GiftCard {
    const KIND: EntityKind = EntityKind::GiftCard;
    fn seeded_id(&self) -> &Id {
        &self.id
    }
    fn seeded_name(&self) -> &str {
        "gift card"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedEntity {
    pub kind: EntityKind,
    pub id: Id,
    pub name: String,
    /// `false` while a product still awaits its modifier-set assignment.
    pub complete: bool,
    /// Looked up by the run rather than created by one of its calls.
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

/// Ordered record of everything a run has created on the remote system.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedLedger {
    entries: Vec<CreatedEntity>,
}

impl SeedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: EntityKind, id: &Id, name: &str) {
        self.push(kind, id, name, true, false);
    }

    pub fn record_entity<T: Seeded>(&mut self, entity: &T) {
        self.record(T::KIND, entity.seeded_id(), entity.seeded_name());
    }

    /// Record an entity the remote system created as a side effect of
    /// another call, such as the merchant's default location.
    pub fn record_resolved<T: Seeded>(&mut self, entity: &T) {
        self.push(T::KIND, entity.seeded_id(), entity.seeded_name(), true, true);
    }

    /// Record an entity whose creation is only partially done.
    pub fn record_pending(&mut self, kind: EntityKind, id: &Id, name: &str) {
        self.push(kind, id, name, false, false);
    }

    pub fn complete(&mut self, id: &Id) {
        if let Some(entry) = self.entries.iter_mut().find(|e| &e.id == id) {
            entry.complete = true;
        }
    }

    fn push(&mut self, kind: EntityKind, id: &Id, name: &str, complete: bool, resolved: bool) {
        let verb = if resolved { "resolved" } else { "created" };
        log::info!("{} {} {:?} ({})", verb, kind, name, id);
        self.entries.push(CreatedEntity {
            kind,
            id: id.clone(),
            name: name.to_string(),
            complete,
            resolved,
            created_at: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[CreatedEntity] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn incomplete(&self) -> Vec<&CreatedEntity> {
        self.entries.iter().filter(|e| !e.complete).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_entries_until_completed() {
        let mut ledger = SeedLedger::new();
        ledger.record(EntityKind::Category, &"c-1".to_string(), "All");
        ledger.record_pending(EntityKind::Product, &"p-1".to_string(), "Scenario [A]");

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.incomplete().len(), 1);
        assert_eq!(ledger.incomplete()[0].id, "p-1");

        ledger.complete(&"p-1".to_string());
        assert!(ledger.incomplete().is_empty());
        assert_eq!(ledger.count(EntityKind::Product), 1);
        assert_eq!(ledger.count(EntityKind::Bundle), 0);
    }

    #[test]
    fn test_resolved_entries_are_told_apart_from_created_ones() {
        let mut ledger = SeedLedger::new();
        ledger.record(EntityKind::Merchant, &"m@example.com".to_string(), "Ada Lovelace");
        ledger.record_resolved(&Location {
            id: "l-1".to_string(),
            name: "12 Elm Way".to_string(),
            address: None,
            opening_hours: Default::default(),
        });

        let entries = ledger.entries();
        assert!(!entries[0].resolved);
        assert!(entries[1].resolved && entries[1].complete);
        assert_eq!(ledger.count(EntityKind::Location), 1);
    }
}
