use crate::client::{CategoryApi, ClientResult, ModifierApi, TaxRateApi};
use crate::error::SeedError;
use crate::model::{
    generate_id, Category, Location, ModifierOption, ModifierSet, Money, NewCategory,
    NewModifierSet, NewTaxRate, TaxRate,
};
use crate::seed::data::{ModifierSetRole, TaxRateRole, CATEGORY_NAME};
use crate::seed::ledger::{SeedLedger, Seeded};

#[derive(Debug, Clone, PartialEq)]
pub struct TaxRates {
    pub apply_a: TaxRate,
    pub apply_b: TaxRate,
    pub included_a: TaxRate,
    pub included_b: TaxRate,
}

impl TaxRates {
    pub fn get(&self, role: TaxRateRole) -> &TaxRate {
        match role {
            TaxRateRole::ApplyA => &self.apply_a,
            TaxRateRole::ApplyB => &self.apply_b,
            TaxRateRole::IncludedA => &self.included_a,
            TaxRateRole::IncludedB => &self.included_b,
        }
    }

    pub fn select(&self, roles: &[TaxRateRole]) -> Vec<&TaxRate> {
        roles.iter().map(|role| self.get(*role)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModifierSets {
    pub add: ModifierSet,
    pub hold: ModifierSet,
    pub neutral: ModifierSet,
}

impl ModifierSets {
    pub fn get(&self, role: ModifierSetRole) -> &ModifierSet {
        match role {
            ModifierSetRole::Add => &self.add,
            ModifierSetRole::Hold => &self.hold,
            ModifierSetRole::Neutral => &self.neutral,
        }
    }

    pub fn select(&self, roles: &[ModifierSetRole]) -> Vec<&ModifierSet> {
        roles.iter().map(|role| self.get(*role)).collect()
    }
}

/// Everything products depend on, each record in its own named slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    pub category: Category,
    pub tax_rates: TaxRates,
    pub modifier_sets: ModifierSets,
}

pub fn category_request(location: &Location) -> NewCategory {
    NewCategory {
        name: CATEGORY_NAME.to_string(),
        location_ids: vec![location.id.clone()],
    }
}

pub fn tax_rate_request(role: TaxRateRole, location: &Location) -> NewTaxRate {
    NewTaxRate {
        name: role.name().to_string(),
        value: role.value(),
        apply_to_price: role.apply_to_price(),
        location_ids: vec![location.id.clone()],
    }
}

/// Option ids are freshly generated on every call.
pub fn modifier_set_request(role: ModifierSetRole, location: &Location) -> NewModifierSet {
    let options = role
        .options()
        .iter()
        .enumerate()
        .map(|(position, (name, amount))| ModifierOption {
            id: generate_id(),
            name: name.to_string(),
            position: position as u32,
            active: true,
            price: Money::usd(*amount),
        })
        .collect();

    NewModifierSet {
        name: role.name().to_string(),
        kind: role.kind(),
        single_choice: true,
        force: true,
        options,
        location_ids: vec![location.id.clone()],
    }
}

pub async fn create_category<A>(
    api: &A,
    location: &Location,
    ledger: &mut SeedLedger,
) -> Result<Category, SeedError>
where
    A: CategoryApi + ?Sized,
{
    let category = api.create_category(&category_request(location)).await?;
    ledger.record_entity(&category);
    Ok(category)
}

pub async fn create_tax_rates<A>(
    api: &A,
    location: &Location,
    parallel: bool,
    ledger: &mut SeedLedger,
) -> Result<TaxRates, SeedError>
where
    A: TaxRateApi + ?Sized,
{
    let [apply_a, apply_b, included_a, included_b] =
        TaxRateRole::ALL.map(|role| tax_rate_request(role, location));

    if parallel {
        let (a, b, c, d) = tokio::join!(
            api.create_tax_rate(&apply_a),
            api.create_tax_rate(&apply_b),
            api.create_tax_rate(&included_a),
            api.create_tax_rate(&included_b),
        );
        record_settled(ledger, [&a, &b, &c, &d]);
        return Ok(TaxRates {
            apply_a: a?,
            apply_b: b?,
            included_a: c?,
            included_b: d?,
        });
    }

    let mut create = |created: TaxRate| {
        ledger.record_entity(&created);
        created
    };
    Ok(TaxRates {
        apply_a: create(api.create_tax_rate(&apply_a).await?),
        apply_b: create(api.create_tax_rate(&apply_b).await?),
        included_a: create(api.create_tax_rate(&included_a).await?),
        included_b: create(api.create_tax_rate(&included_b).await?),
    })
}

pub async fn create_modifier_sets<A>(
    api: &A,
    location: &Location,
    parallel: bool,
    ledger: &mut SeedLedger,
) -> Result<ModifierSets, SeedError>
where
    A: ModifierApi + ?Sized,
{
    let [add, hold, neutral] = ModifierSetRole::ALL.map(|role| modifier_set_request(role, location));

    if parallel {
        let (a, h, n) = tokio::join!(
            api.create_modifier_set(&add),
            api.create_modifier_set(&hold),
            api.create_modifier_set(&neutral),
        );
        record_settled(ledger, [&a, &h, &n]);
        return Ok(ModifierSets {
            add: a?,
            hold: h?,
            neutral: n?,
        });
    }

    let mut create = |created: ModifierSet| {
        ledger.record_entity(&created);
        created
    };
    Ok(ModifierSets {
        add: create(api.create_modifier_set(&add).await?),
        hold: create(api.create_modifier_set(&hold).await?),
        neutral: create(api.create_modifier_set(&neutral).await?),
    })
}

/// Record the successes of a concurrent tier before its first error is
/// propagated; those records exist remotely either way.
fn record_settled<T: Seeded, const N: usize>(ledger: &mut SeedLedger, results: [&ClientResult<T>; N]) {
    for created in results.into_iter().flatten() {
        ledger.record_entity(created);
    }
}
