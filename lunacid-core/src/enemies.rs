use rand::Rng;
use std::collections::BTreeMap;

use crate::locations::region::*;

/// Enemy types the randomizer may place anywhere.
pub const RANDOMIZABLE_ENEMIES: &[&str] = &[
    "Snail",
    "Milk Snail",
    "Rat",
    "Mire Rat",
    "Slime Skeleton",
    "Jellyfish",
    "Kodama",
    "Yakul",
    "Phantom",
    "Mimic",
    "Skeleton",
    "Vampire Bat",
    "Ghoul",
    "Vampire Page",
    "Cetea",
    "Obsidian Skeleton",
    "Lava Slime",
    "Mummy",
    "Ikkuri",
    "Lunaga",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EnemyPlacement {
    pub scene: &'static str,
    pub group_name: &'static str,
    pub child_id: u32,
    pub enemy: &'static str,
    pub region: &'static str,
}

const fn at(
    scene: &'static str,
    group_name: &'static str,
    child_id: u32,
    enemy: &'static str,
    region: &'static str,
) -> EnemyPlacement {
    EnemyPlacement {
        scene,
        group_name,
        child_id,
        enemy,
        region,
    }
}

pub const BASE_ENEMY_PLACEMENT: &[EnemyPlacement] = &[
    at("HAUNT", "ENEMIES", 0, "Snail", HOLLOW_BASIN),
    at("HAUNT", "ENEMIES", 1, "Snail", HOLLOW_BASIN),
    at("HAUNT", "ENEMIES", 2, "Rat", HOLLOW_BASIN),
    at("HAUNT", "ENEMIES", 3, "Milk Snail", HOLLOW_BASIN),
    at("HAUNT", "TEMPLE", 0, "Kodama", HOLLOW_BASIN),
    at("HAUNT", "TEMPLE", 1, "Rat", HOLLOW_BASIN),
    at("SEWER_A1", "ENEMIES", 0, "Mire Rat", FETID_MIRE),
    at("SEWER_A1", "ENEMIES", 1, "Mire Rat", FETID_MIRE),
    at("SEWER_A1", "ENEMIES", 2, "Slime Skeleton", FETID_MIRE),
    at("SEWER_A1", "ENEMIES", 3, "Jellyfish", FETID_MIRE),
    at("SEWER_A1", "LAKE", 0, "Jellyfish", FETID_MIRE),
    at("SEWER_A1", "LAKE", 1, "Milk Snail", FETID_MIRE),
    at("PITT_B1", "ENEMIES", 0, "Slime Skeleton", TEMPLE_OF_SILENCE),
    at("PITT_B1", "ENEMIES", 1, "Phantom", TEMPLE_OF_SILENCE),
    at("FOREST_A1", "ENEMIES", 0, "Kodama", YOSEI_FOREST),
    at("FOREST_A1", "ENEMIES", 1, "Kodama", YOSEI_FOREST),
    at("FOREST_A1", "ENEMIES", 2, "Yakul", YOSEI_FOREST),
    at("FOREST_A1", "DEEP", 0, "Yakul", YOSEI_FOREST),
    at("FOREST_A1", "DEEP", 1, "Snail", YOSEI_FOREST),
    at("ARCHIVES", "ENEMIES", 0, "Phantom", FORBIDDEN_ARCHIVES),
    at("ARCHIVES", "ENEMIES", 1, "Phantom", FORBIDDEN_ARCHIVES),
    at("ARCHIVES", "ENEMIES", 2, "Mimic", FORBIDDEN_ARCHIVES),
    at("ARCHIVES", "UPPER", 0, "Mimic", FORBIDDEN_ARCHIVES),
    at("ARCHIVES", "UPPER", 1, "Phantom", FORBIDDEN_ARCHIVES),
    at("CAVE", "ENEMIES", 0, "Skeleton", ACCURSED_TOMB),
    at("CAVE", "ENEMIES", 1, "Skeleton", ACCURSED_TOMB),
    at("CAVE", "ENEMIES", 2, "Vampire Bat", ACCURSED_TOMB),
    at("CAVE", "CRYPT", 0, "Ghoul", ACCURSED_TOMB),
    at("CAVE", "CRYPT", 1, "Ghoul", ACCURSED_TOMB),
    at("CAS_1", "ENEMIES", 0, "Vampire Page", CASTLE_LE_FANU),
    at("CAS_1", "ENEMIES", 1, "Vampire Page", CASTLE_LE_FANU),
    at("CAS_1", "ENEMIES", 2, "Vampire Bat", CASTLE_LE_FANU),
    at("CAS_1", "CELLAR", 0, "Rat", CASTLE_LE_FANU),
    at("CAS_PITT", "ENEMIES", 0, "Cetea", SEALED_BALLROOM),
    at("CAS_PITT", "ENEMIES", 1, "Vampire Page", SEALED_BALLROOM),
    at("LAKE", "ENEMIES", 0, "Obsidian Skeleton", BOILING_GROTTO),
    at("LAKE", "ENEMIES", 1, "Lava Slime", BOILING_GROTTO),
    at("LAKE", "ENEMIES", 2, "Lava Slime", BOILING_GROTTO),
    at("SAND", "ENEMIES", 0, "Mummy", SAND_TEMPLE),
    at("SAND", "ENEMIES", 1, "Mummy", SAND_TEMPLE),
    at("SAND", "TOMB", 0, "Skeleton", SAND_TEMPLE),
    at("PRISON", "ENEMIES", 0, "Ikkuri", TERMINUS_PRISON),
    at("PRISON", "ENEMIES", 1, "Ikkuri", TERMINUS_PRISON),
    at("PRISON", "CELLS", 0, "Ghoul", TERMINUS_PRISON),
    at("ARENA", "ENEMIES", 0, "Obsidian Skeleton", FORLORN_ARENA),
    at("ASH", "ENEMIES", 0, "Lunaga", LABYRINTH_OF_ASH),
    at("ASH", "ENEMIES", 1, "Lunaga", LABYRINTH_OF_ASH),
    at("TOWER", "ENEMIES", 0, "Phantom", TOWER_OF_ABYSS),
];

/// Enemy placement for one world, in the two shapes consumers want.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnemyRandomization {
    /// Scene name to `"group|child|enemy"` entries for the client mod.
    pub mod_data: BTreeMap<String, Vec<String>>,
    /// Regions each enemy type can be fought in, in first-seen order.
    pub enemy_regions: BTreeMap<String, Vec<String>>,
}

impl EnemyRandomization {
    pub fn from_placements(placements: &[EnemyPlacement]) -> Self {
        let mut result = Self::default();
        for placement in placements {
            result
                .mod_data
                .entry(placement.scene.to_string())
                .or_default()
                .push(format!(
                    "{}|{}|{}",
                    placement.group_name, placement.child_id, placement.enemy
                ));
            let regions = result
                .enemy_regions
                .entry(placement.enemy.to_string())
                .or_default();
            if !regions.iter().any(|region| region == placement.region) {
                regions.push(placement.region.to_string());
            }
        }
        result
    }
}

/// Draw a random enemy for every placement, then make sure every enemy type
/// shows up at least once.
///
/// Each missing type takes over one random placement of a random type that
/// appears more than once. The correction runs at most once per enemy type
/// and gives up when no type has a spare placement.
pub fn shuffle_enemies<R: Rng + ?Sized>(rng: &mut R) -> Vec<EnemyPlacement> {
    let mut placements: Vec<EnemyPlacement> = BASE_ENEMY_PLACEMENT
        .iter()
        .map(|base| EnemyPlacement {
            enemy: RANDOMIZABLE_ENEMIES[rng.gen_range(0..RANDOMIZABLE_ENEMIES.len())],
            ..*base
        })
        .collect();

    let count_of = |placements: &[EnemyPlacement], enemy: &str| {
        placements.iter().filter(|p| p.enemy == enemy).count()
    };

    for _ in 0..RANDOMIZABLE_ENEMIES.len() {
        let missing: Vec<&str> = RANDOMIZABLE_ENEMIES
            .iter()
            .copied()
            .filter(|enemy| count_of(&placements, enemy) == 0)
            .collect();
        if missing.is_empty() {
            break;
        }

        for enemy in missing {
            let spare: Vec<&str> = RANDOMIZABLE_ENEMIES
                .iter()
                .copied()
                .filter(|candidate| count_of(&placements, candidate) > 1)
                .collect();
            if spare.is_empty() {
                log::warn!("no spare placement left for {enemy}");
                return placements;
            }
            let donor = spare[rng.gen_range(0..spare.len())];
            let slots: Vec<usize> = placements
                .iter()
                .enumerate()
                .filter(|(_, p)| p.enemy == donor)
                .map(|(idx, _)| idx)
                .collect();
            let slot = slots[rng.gen_range(0..slots.len())];
            log::debug!(
                "moving {} {}|{} from {donor} to {enemy}",
                placements[slot].scene,
                placements[slot].group_name,
                placements[slot].child_id
            );
            placements[slot].enemy = enemy;
        }
    }

    placements
}

/// Vanilla placement unless enemy randomization is on.
pub fn randomize_enemies<R: Rng + ?Sized>(enabled: bool, rng: &mut R) -> EnemyRandomization {
    if !enabled {
        return EnemyRandomization::from_placements(BASE_ENEMY_PLACEMENT);
    }
    EnemyRandomization::from_placements(&shuffle_enemies(rng))
}
