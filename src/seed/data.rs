//! The fixed shape of a seeded tenant: address, taxonomy definitions and the
//! scenario products consumed by the orchestrator.

use crate::model::{Address, ModifierSetType};

pub const CATEGORY_NAME: &str = "All";

pub fn seed_address() -> Address {
    Address {
        line1: "2200 Central Drive".to_string(),
        line2: String::new(),
        city: "Bedford".to_string(),
        state: "TX".to_string(),
        postal_code: "76021".to_string(),
        country: "US".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxRateRole {
    ApplyA,
    ApplyB,
    IncludedA,
    IncludedB,
}

impl TaxRateRole {
    pub const ALL: [TaxRateRole; 4] = [
        TaxRateRole::ApplyA,
        TaxRateRole::ApplyB,
        TaxRateRole::IncludedA,
        TaxRateRole::IncludedB,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TaxRateRole::ApplyA => "ApplyA",
            TaxRateRole::ApplyB => "ApplyB",
            TaxRateRole::IncludedA => "IncludedA",
            TaxRateRole::IncludedB => "IncludedB",
        }
    }

    pub fn value(self) -> f64 {
        match self {
            TaxRateRole::ApplyA => 25.0,
            TaxRateRole::ApplyB => 12.0,
            TaxRateRole::IncludedA => 5.0,
            TaxRateRole::IncludedB => 10.0,
        }
    }

    pub fn apply_to_price(self) -> bool {
        matches!(self, TaxRateRole::ApplyA | TaxRateRole::ApplyB)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierSetRole {
    Add,
    Hold,
    Neutral,
}

impl ModifierSetRole {
    pub const ALL: [ModifierSetRole; 3] = [
        ModifierSetRole::Add,
        ModifierSetRole::Hold,
        ModifierSetRole::Neutral,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModifierSetRole::Add => "MyAdd",
            ModifierSetRole::Hold => "MyHold",
            ModifierSetRole::Neutral => "MyNeutral",
        }
    }

    pub fn kind(self) -> ModifierSetType {
        match self {
            ModifierSetRole::Add => ModifierSetType::Addon,
            ModifierSetRole::Hold => ModifierSetType::Hold,
            ModifierSetRole::Neutral => ModifierSetType::Neutral,
        }
    }

    /// Option names and USD prices, in display order.
    pub fn options(self) -> [(&'static str, f64); 2] {
        match self {
            ModifierSetRole::Add => [("MyAddA", 1.5), ("MyAddB", 1.25)],
            ModifierSetRole::Hold => [("MyHoldA", 0.25), ("MyHoldB", 0.35)],
            ModifierSetRole::Neutral => [("MyNeutralA", 0.0), ("MyNeutralB", 0.0)],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductScenario {
    pub name: &'static str,
    pub price: f64,
    pub cost: f64,
    pub tax_rates: &'static [TaxRateRole],
    pub modifier_sets: &'static [ModifierSetRole],
}

use ModifierSetRole::{Add, Hold, Neutral};
use TaxRateRole::{ApplyA, ApplyB, IncludedA, IncludedB};

pub const STANDALONE_PRODUCTS: [ProductScenario; 5] = [
    ProductScenario {
        name: "Scenario [A]",
        price: 1.0,
        cost: 0.5,
        tax_rates: &[ApplyA, ApplyB],
        modifier_sets: &[Add, Hold],
    },
    ProductScenario {
        name: "Scenario [B]",
        price: 1.0,
        cost: 0.5,
        tax_rates: &[ApplyA, ApplyB, IncludedA, IncludedB],
        modifier_sets: &[Add, Hold],
    },
    ProductScenario {
        name: "Scenario [C] - 1",
        price: 1.0,
        cost: 0.5,
        tax_rates: &[ApplyA, ApplyB],
        modifier_sets: &[Add, Hold],
    },
    ProductScenario {
        name: "Scenario [C] - 2",
        price: 1.0,
        cost: 0.5,
        tax_rates: &[ApplyA, ApplyB],
        modifier_sets: &[Add, Hold],
    },
    ProductScenario {
        name: "Scenario [D]",
        price: 1.0,
        cost: 0.5,
        tax_rates: &[ApplyA, ApplyB],
        modifier_sets: &[Neutral],
    },
];

/// Products offered by the bundle, in bundle-option order.
pub const BUNDLE_COMPONENTS: [ProductScenario; 2] = [
    ProductScenario {
        name: "Scenario [E] - product 1 for bundle",
        price: 1.0,
        cost: 0.5,
        tax_rates: &[ApplyA],
        modifier_sets: &[Add],
    },
    ProductScenario {
        name: "Scenario [E] - product 2 for bundle",
        price: 1.0,
        cost: 0.5,
        tax_rates: &[ApplyA],
        modifier_sets: &[],
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BundleScenario {
    pub product: ProductScenario,
    pub set_name: &'static str,
    pub set_position: u32,
    pub min_quantity: u32,
    pub max_quantity: u32,
    /// One per entry of `BUNDLE_COMPONENTS`.
    pub price_adjustments: [f64; 2],
}

pub const BUNDLE: BundleScenario = BundleScenario {
    product: ProductScenario {
        name: "Scenario [E] - bundle product",
        price: 2.0,
        cost: 1.0,
        tax_rates: &[ApplyA],
        modifier_sets: &[],
    },
    set_name: "MyBundleSet",
    set_position: 1,
    min_quantity: 1,
    max_quantity: 1,
    price_adjustments: [0.0, 5.0],
};
