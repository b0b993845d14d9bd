use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::options::{LunacidOptions, StartingClass, CUSTOM_CLASS_STATS, RANDOM};

/// Names and descriptions a random custom class borrows from.
pub const CLASS_CATALOGUE: &[(&str, &str)] = &[
    ("Thief", "A quick-fingered wanderer who trusts shadows more than steel."),
    ("Knight", "Sworn to an order long since turned to dust."),
    ("Witch", "Reads the old books nobody else dares to open."),
    ("Vampire", "Thirsts for more than knowledge in the Great Well."),
    ("Undead", "Already died once and found it unconvincing."),
    ("Royal", "Born to rule a kingdom that no longer exists."),
    ("Cleric", "Carries a faith the moon has not yet broken."),
    ("Shinobi", "Trained in silence under a foreign sky."),
    ("Forsaken", "Brought nothing into the well and expects nothing back."),
    ("Alchemist", "Boils mushrooms and calls it progress."),
    ("Gravedigger", "Knows every tomb in the basin by its smell."),
    ("Dreamer", "Not entirely sure any of this is real."),
];

/// The custom class sent to the client. Stats are always filled in, even
/// for worlds that do not start as a custom class.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CustomClass {
    pub name: String,
    pub description: String,
    pub stats: BTreeMap<String, i64>,
}

impl CustomClass {
    pub fn level(&self) -> i64 {
        self.stats.get("Level").copied().unwrap_or(1)
    }
}

fn random_class<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
    CLASS_CATALOGUE[rng.gen_range(0..CLASS_CATALOGUE.len())]
}

/// Resolve `RANDOM` names and descriptions and roll or clamp every stat.
///
/// A single catalogue draw serves whichever fields are random. Stats are
/// drawn in table order; a stat of `-1` (or one left out) is a uniform draw
/// in `[min, max)`, anything else is clamped to `[min, max]`.
pub fn package_custom_class<R: Rng + ?Sized>(options: &LunacidOptions, rng: &mut R) -> CustomClass {
    let requested = &options.custom_class;
    let random_name = requested.name == RANDOM;
    let random_description = requested.description == RANDOM;

    let (name, description) = if random_name || random_description {
        let (class, blurb) = random_class(rng);
        (
            if random_name { class.to_string() } else { requested.name.clone() },
            if random_description {
                blurb.to_string()
            } else {
                requested.description.clone()
            },
        )
    } else {
        (requested.name.clone(), requested.description.clone())
    };

    let mut stats = BTreeMap::new();
    for (stat, min, max) in CUSTOM_CLASS_STATS {
        let wanted = requested.stat(stat).min(max);
        let value = if wanted == -1 {
            rng.gen_range(min..max)
        } else {
            wanted.max(min)
        };
        stats.insert(stat.to_string(), value);
    }

    CustomClass {
        name,
        description,
        stats,
    }
}

/// Starting level for levelsanity, or `-1` when levels are not checks.
pub fn determine_starting_level(options: &LunacidOptions, class: &CustomClass) -> i32 {
    if !options.levelsanity {
        return -1;
    }
    match options.starting_class {
        StartingClass::Thief => 5,
        StartingClass::Knight => 10,
        StartingClass::Witch => 7,
        StartingClass::Vampire => 9,
        StartingClass::Undead => 8,
        StartingClass::Royal => 6,
        StartingClass::Cleric => 8,
        StartingClass::Shinobi => 9,
        StartingClass::Forsaken => 1,
        StartingClass::Custom => i32::try_from(class.level()).unwrap_or(1),
    }
}

/// Stat points the client hands out when starting at `level`.
pub fn total_points_given_starting_level(level: i32) -> i32 {
    if level <= 5 {
        310 - 6 * level
    } else if level <= 50 {
        300 - 4 * level
    } else {
        200 - 2 * level
    }
}
