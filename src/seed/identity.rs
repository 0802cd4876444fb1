use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::model::Identity;

const FIRST_NAMES: &[&str] = &[
    "Aaliyah", "Abel", "Ada", "Adrian", "Agnes", "Alba", "Alden", "Alfie", "Alma", "Alvin",
    "Amara", "Ansel", "Ari", "Astrid", "August", "Beatrix", "Bennett", "Bianca", "Bram", "Brooke",
    "Caleb", "Camila", "Casper", "Celeste", "Cyrus", "Dahlia", "Dante", "Delphine", "Desmond", "Dora",
    "Eamon", "Edith", "Elias", "Elodie", "Emmett", "Esme", "Ezra", "Farah", "Felix", "Fiona",
    "Gideon", "Greta", "Hana", "Hugo", "Ines", "Ivo", "Jasper", "Juno", "Kai", "Keira",
    "Lachlan", "Lena", "Leon", "Lila", "Linus", "Lorenzo", "Mabel", "Malik", "Margot", "Milo",
    "Nadia", "Nico", "Nora", "Odette", "Omar", "Opal", "Orson", "Paloma", "Pavel", "Petra",
    "Quentin", "Rafael", "Rhea", "Roman", "Rosalind", "Rufus", "Sabine", "Silas", "Soren", "Stella",
    "Tobias", "Talia", "Theo", "Thea", "Ulric", "Uma", "Vera", "Viggo", "Wren", "Wyatt",
    "Xavier", "Ximena", "Yara", "Yusuf", "Zadie", "Zane", "Zara", "Zeke", "Zelda", "Zion",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Acosta", "Aldridge", "Ashby", "Barlow", "Beckett", "Blackwood", "Bowman", "Calloway", "Carver",
    "Castillo", "Chandler", "Crane", "Dalton", "Delgado", "Donovan", "Drake", "Ellison", "Emerson", "Fairbanks",
    "Fletcher", "Foley", "Galloway", "Garner", "Gibbs", "Hale", "Hargrove", "Hawkins", "Holloway", "Ingram",
    "Jansen", "Kendrick", "Kessler", "Kingsley", "Lambert", "Langley", "Larkin", "Lindqvist", "Lockhart", "Mahoney",
    "Marlowe", "Mercer", "Monroe", "Nakamura", "Navarro", "Norwood", "Oakley", "Okafor", "Osborne", "Pacheco",
    "Pembroke", "Quimby", "Radcliffe", "Ramsey", "Rowe", "Salazar", "Sinclair", "Sorensen", "Stanton", "Sterling",
    "Sutton", "Tanaka", "Thornton", "Underhill", "Vance", "Varga", "Wainwright", "Whitaker", "Winslow", "Yates",
];

const STREET_NAMES: &[&str] = &[
    "Maple", "Oak", "Cedar", "Pine", "Elm", "Willow", "Birch", "Aspen", "Juniper", "Magnolia",
    "Harbor", "Summit", "Meadow", "Ridge", "Lakeview", "Orchard", "Sunset", "Highland", "Riverside", "Prairie",
];

const STREET_SUFFIXES: &[&str] = &[
    "Street", "Avenue", "Boulevard", "Lane", "Road", "Drive", "Court", "Way", "Place", "Terrace",
];

/// Produces merchant identities and default-location labels.
///
/// Last names are double-barrelled from two distinct surnames, which keeps
/// the derived email unlikely to collide with a tenant from an earlier run.
pub struct IdentityGenerator {
    rng: StdRng,
}

impl IdentityGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_identity(&mut self, password: &str) -> Identity {
        let first_name = self.pick(FIRST_NAMES).to_string();
        let first_surname = self.pick(LAST_NAMES);
        let second_surname = loop {
            let candidate = self.pick(LAST_NAMES);
            if candidate != first_surname {
                break candidate;
            }
        };
        let last_name = format!("{}-{}", first_surname, second_surname);
        Identity::new(first_name, last_name, password.to_string())
    }

    /// A street address used as the name of the merchant's default location.
    pub fn next_location_name(&mut self) -> String {
        let number: u32 = self.rng.gen_range(1..=9999);
        let street = self.pick(STREET_NAMES);
        let suffix = self.pick(STREET_SUFFIXES);
        format!("{} {} {}", number, street, suffix)
    }

    fn pick(&mut self, pool: &'static [&'static str]) -> &'static str {
        pool.choose(&mut self.rng).copied().unwrap_or("Seed")
    }
}

impl Default for IdentityGenerator {
    fn default() -> Self {
        Self::new()
    }
}
