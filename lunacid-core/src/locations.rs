//! Check locations.
//!
//! The table is generated once from per-region data. Codes are positional
//! from [`BASE_LOCATION_ID`], so every partition is append only. Which
//! partitions a world actually uses is decided by [`create_locations`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::equipment::QUENCHABLE_WEAPONS;
use crate::filler::DECEMBER;
use crate::names::location;
use crate::options::{Dropsanity, LunacidOptions};
use crate::pool::{MAX_LEVEL, OCTOBER};

pub const BASE_LOCATION_ID: u64 = 771_111_110;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum LocationFeature {
    Base,
    Shop,
    UniqueDrop,
    OtherDrop,
    Quench,
    Alchemy,
    Lore,
    Grass,
    Breakable,
    Level,
    Coin,
    Halloween,
    Christmas,
}

impl LocationFeature {
    pub fn group_name(self) -> &'static str {
        match self {
            LocationFeature::Base => "Base",
            LocationFeature::Shop => "Shop",
            LocationFeature::UniqueDrop => "Unique Drops",
            LocationFeature::OtherDrop => "Other Drops",
            LocationFeature::Quench => "Quench",
            LocationFeature::Alchemy => "Alchemy",
            LocationFeature::Lore => "Lore",
            LocationFeature::Grass => "Grass",
            LocationFeature::Breakable => "Breakables",
            LocationFeature::Level => "Levels",
            LocationFeature::Coin => "Strange Coins",
            LocationFeature::Halloween => "Halloween",
            LocationFeature::Christmas => "Christmas",
        }
    }

    pub fn is_drop(self) -> bool {
        matches!(self, LocationFeature::UniqueDrop | LocationFeature::OtherDrop)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocationData {
    pub name: String,
    pub code: u64,
    pub region: &'static str,
    pub feature: LocationFeature,
}

impl LocationData {
    /// The level a levelsanity check is awarded at.
    pub fn level(&self) -> Option<i32> {
        if self.feature != LocationFeature::Level {
            return None;
        }
        self.name.strip_prefix("Level ")?.parse().ok()
    }
}

pub mod region {
    pub const WINGS_REST: &str = "Wing's Rest";
    pub const HOLLOW_BASIN: &str = "Hollow Basin";
    pub const FETID_MIRE: &str = "Fetid Mire";
    pub const TEMPLE_OF_SILENCE: &str = "Temple of Silence";
    pub const YOSEI_FOREST: &str = "Yosei Forest";
    pub const FORBIDDEN_ARCHIVES: &str = "Forbidden Archives";
    pub const ACCURSED_TOMB: &str = "Accursed Tomb";
    pub const CASTLE_LE_FANU: &str = "Castle Le Fanu";
    pub const SEALED_BALLROOM: &str = "Sealed Ballroom";
    pub const BOILING_GROTTO: &str = "Boiling Grotto";
    pub const SAND_TEMPLE: &str = "Sand Temple";
    pub const TERMINUS_PRISON: &str = "Terminus Prison";
    pub const FORLORN_ARENA: &str = "Forlorn Arena";
    pub const LABYRINTH_OF_ASH: &str = "Labyrinth of Ash";
    pub const TOWER_OF_ABYSS: &str = "Tower of Abyss";
    pub const GRAVE_OF_THE_SLEEPER: &str = "Grave of the Sleeper";
}

use region::*;

/// Location name prefix per region, with the lore, grass, breakable, coin and
/// Halloween spot counts of that region.
struct RegionSpots {
    region: &'static str,
    prefix: &'static str,
    lore: usize,
    grass: usize,
    breakables: usize,
    coins: usize,
    halloween: usize,
}

const fn spots(
    region: &'static str,
    prefix: &'static str,
    lore: usize,
    grass: usize,
    breakables: usize,
    coins: usize,
    halloween: usize,
) -> RegionSpots {
    RegionSpots {
        region,
        prefix,
        lore,
        grass,
        breakables,
        coins,
        halloween,
    }
}

const REGION_SPOTS: &[RegionSpots] = &[
    spots(WINGS_REST, "WR", 3, 12, 6, 2, 4),
    spots(HOLLOW_BASIN, "HB", 6, 64, 30, 6, 4),
    spots(FETID_MIRE, "FM", 5, 58, 22, 5, 3),
    spots(TEMPLE_OF_SILENCE, "TS", 3, 20, 18, 3, 2),
    spots(YOSEI_FOREST, "YF", 6, 96, 20, 5, 4),
    spots(FORBIDDEN_ARCHIVES, "FA", 8, 10, 36, 6, 3),
    spots(ACCURSED_TOMB, "AT", 5, 24, 34, 5, 3),
    spots(CASTLE_LE_FANU, "CLF", 9, 40, 44, 7, 4),
    spots(SEALED_BALLROOM, "SB", 3, 8, 16, 3, 2),
    spots(BOILING_GROTTO, "BG", 4, 36, 18, 4, 2),
    spots(SAND_TEMPLE, "ST", 4, 44, 20, 4, 2),
    spots(TERMINUS_PRISON, "TP", 5, 22, 26, 5, 3),
    spots(FORLORN_ARENA, "AR", 1, 30, 8, 2, 1),
    spots(LABYRINTH_OF_ASH, "LA", 3, 28, 12, 2, 2),
    spots(TOWER_OF_ABYSS, "TA", 2, 0, 8, 1, 1),
];

const BASE_LOCATIONS: &[(&str, &str)] = &[
    (location::START_CRYSTAL, WINGS_REST),
    (location::CLIVES_GIFT, WINGS_REST),
    ("WR: Bench Chest", WINGS_REST),
    ("WR: Demi's Gift", WINGS_REST),
    ("WR: Sheryl's Gift", WINGS_REST),
    ("HB: Starting Weapon Chest", HOLLOW_BASIN),
    ("HB: Rickety Bridge", HOLLOW_BASIN),
    ("HB: Temple Fountain", HOLLOW_BASIN),
    ("HB: Dark Tunnel Alcove", HOLLOW_BASIN),
    ("HB: Sunken Corridor", HOLLOW_BASIN),
    ("HB: Pillar Ledge", HOLLOW_BASIN),
    ("HB: Hidden Room", HOLLOW_BASIN),
    ("FM: Rafters", FETID_MIRE),
    ("FM: Jellyfish Den", FETID_MIRE),
    ("FM: Hidden Chest", FETID_MIRE),
    ("FM: Secret Ladder", FETID_MIRE),
    ("FM: Bloody Lake", FETID_MIRE),
    ("FM: Corner Cage", FETID_MIRE),
    ("TS: Gate Shrine", TEMPLE_OF_SILENCE),
    ("TS: Silent Altar", TEMPLE_OF_SILENCE),
    ("TS: Secret Library", TEMPLE_OF_SILENCE),
    ("YF: Patchouli's Canopy", YOSEI_FOREST),
    ("YF: Patchouli's Reward", YOSEI_FOREST),
    ("YF: Lost Pond", YOSEI_FOREST),
    ("YF: Hollow Tree", YOSEI_FOREST),
    ("YF: Blood Pool", YOSEI_FOREST),
    ("YF: Barrier Altar", YOSEI_FOREST),
    ("FA: Daedalus Desk", FORBIDDEN_ARCHIVES),
    ("FA: Rafter Shelf", FORBIDDEN_ARCHIVES),
    ("FA: Bookshelf Passage", FORBIDDEN_ARCHIVES),
    ("FA: Sealed Study", FORBIDDEN_ARCHIVES),
    ("FA: Lower Stacks", FORBIDDEN_ARCHIVES),
    ("FA: Third Floor Balcony", FORBIDDEN_ARCHIVES),
    ("FA: Ghost Light Vault", FORBIDDEN_ARCHIVES),
    ("AT: Crypt Altar", ACCURSED_TOMB),
    ("AT: Vampire Coffin", ACCURSED_TOMB),
    ("AT: Mausoleum Gate", ACCURSED_TOMB),
    ("AT: Flooded Tomb", ACCURSED_TOMB),
    ("AT: Candle Room", ACCURSED_TOMB),
    ("AT: Corrupted Door", ACCURSED_TOMB),
    ("CLF: Courtyard Fountain", CASTLE_LE_FANU),
    ("CLF: Cattle Cell", CASTLE_LE_FANU),
    ("CLF: Throne Room", CASTLE_LE_FANU),
    ("CLF: Library Landing", CASTLE_LE_FANU),
    ("CLF: Armoury", CASTLE_LE_FANU),
    ("CLF: Kitchen Cellar", CASTLE_LE_FANU),
    ("CLF: Rooftop", CASTLE_LE_FANU),
    ("CLF: Blood Chamber", CASTLE_LE_FANU),
    ("SB: Dance Floor", SEALED_BALLROOM),
    ("SB: Hidden Balcony", SEALED_BALLROOM),
    ("SB: Jusztina's Room", SEALED_BALLROOM),
    ("BG: Hicket's Armour Stand", BOILING_GROTTO),
    ("BG: Steam Vent Ledge", BOILING_GROTTO),
    ("BG: Sahujin Shrine", BOILING_GROTTO),
    ("BG: Lava Bridge", BOILING_GROTTO),
    ("ST: Sarcophagus", SAND_TEMPLE),
    ("ST: Quicksand Pit", SAND_TEMPLE),
    ("ST: Mummy Chamber", SAND_TEMPLE),
    ("ST: Serpent Idol", SAND_TEMPLE),
    ("TP: Warden's Desk", TERMINUS_PRISON),
    ("TP: Cell Block", TERMINUS_PRISON),
    ("TP: Torture Room", TERMINUS_PRISON),
    ("TP: Upper Catwalk", TERMINUS_PRISON),
    ("TP: Sewer Grate", TERMINUS_PRISON),
    ("TP: Cross Chamber", TERMINUS_PRISON),
    ("AR: Champion's Prize", FORLORN_ARENA),
    ("AR: Sand Pit", FORLORN_ARENA),
    ("AR: Water Talisman Altar", FORLORN_ARENA),
    ("AR: Earth Talisman Altar", FORLORN_ARENA),
    ("LA: Ash Maze", LABYRINTH_OF_ASH),
    ("LA: Burnt Library", LABYRINTH_OF_ASH),
    ("LA: Strange Door", LABYRINTH_OF_ASH),
    ("LA: Dead End", LABYRINTH_OF_ASH),
    ("TA: Stairway", TOWER_OF_ABYSS),
    ("TA: Crystal Ledge", TOWER_OF_ABYSS),
    ("TA: Summit", TOWER_OF_ABYSS),
    ("GS: Sleeper's Rest", GRAVE_OF_THE_SLEEPER),
    ("GS: Lucid Pedestal", GRAVE_OF_THE_SLEEPER),
    ("GS: Final Chest", GRAVE_OF_THE_SLEEPER),
    ("GS: Dreamer's Altar", GRAVE_OF_THE_SLEEPER),
];

const SHOP_LOCATIONS: &[&str] = &[
    "Sheryl: Rapier",
    "Sheryl: Crossbow",
    "Sheryl: Steel Lance",
    "Sheryl: Ocean Elixir",
    "Sheryl: Black Book",
    "Sheryl: Moonlight Vial 1",
    "Sheryl: Moonlight Vial 2",
    "Sheryl: Initial Offering",
    "Sheryl: Dreamer Voucher",
];

/// Enemies with a guaranteed one-time drop, and where to find them.
const UNIQUE_DROPS: &[(&str, &str, &str)] = &[
    ("Skeleton", "Skeleton Axe", ACCURSED_TOMB),
    ("Skeleton", "Skeleton Weapon", ACCURSED_TOMB),
    ("Kodama", "Halberd", YOSEI_FOREST),
    ("Phantom", "Dark Skull", FORBIDDEN_ARCHIVES),
    ("Mummy", "Sucsarian Spear", SAND_TEMPLE),
    ("Mummy Knight", "Jotunn Slayer", SAND_TEMPLE),
    ("Cursed Painting", "Obsidian Cursebrand", CASTLE_LE_FANU),
    ("Ice Golem", "Ice Sickle", TERMINUS_PRISON),
    ("Slime Skeleton", "Slime Orb", FETID_MIRE),
    ("Snail", "Summon Snail", HOLLOW_BASIN),
    ("Vampire", "Vampire Page", CASTLE_LE_FANU),
    ("Chimera", "Chimera Horn", FORLORN_ARENA),
    ("Sucsarian", "Sucsarian Charm", SAND_TEMPLE),
    ("Lunaga", "Lunaga Relic", LABYRINTH_OF_ASH),
    ("Ikkuri", "Ikkuri Mask", TERMINUS_PRISON),
    ("Abyssal Demon", "Demon Horn", TOWER_OF_ABYSS),
    ("Obsidian Skeleton", "Obsidian Shard", BOILING_GROTTO),
    ("Centaur", "Centaur Bow", FORLORN_ARENA),
    ("Cetea", "Cetea Scale", SEALED_BALLROOM),
];

/// Repeatable enemy drops, one check per enemy and material.
const OTHER_DROPS: &[(&str, &str, &[&str])] = &[
    ("Snail", HOLLOW_BASIN, &["Ocean Bone Shell", "Fiddlehead", "Health Vial", "Mana Vial", "Silver"]),
    ("Rat", HOLLOW_BASIN, &["Bones", "Pink Shrimp", "Cloth Bandage", "Silver"]),
    ("Milk Snail", FETID_MIRE, &["Ocean Bone Shell", "Bloodweed", "Antidote", "Silver"]),
    ("Mire Rat", FETID_MIRE, &["Bones", "Bloodweed", "Poison Urn", "Silver"]),
    ("Slime Skeleton", FETID_MIRE, &["Bones", "Ectoplasm", "Poison Throwing Knife", "Silver", "Antidote"]),
    ("Jellyfish", FETID_MIRE, &["Ocean Bone Shard", "Ectoplasm", "Mana Vial", "Silver"]),
    ("Kodama", YOSEI_FOREST, &["Fiddlehead", "Moon Petal", "Fairy Moss", "Yellow Morel", "Silver"]),
    ("Yakul", YOSEI_FOREST, &["Bones", "Lotus Seed Pod", "Health Vial", "Silver"]),
    ("Phantom", FORBIDDEN_ARCHIVES, &["Ectoplasm", "Spectral Candle", "Wisp Heart", "Silver"]),
    ("Mimic", FORBIDDEN_ARCHIVES, &["Opal", "Fool's Gold", "Silver", "Angel Feather"]),
    ("Skeleton", ACCURSED_TOMB, &["Bones", "Ashes", "Throwing Knife", "Silver"]),
    ("Vampire Bat", ACCURSED_TOMB, &["Vampiric Ashes", "Blood Wine", "Silver"]),
    ("Ghoul", ACCURSED_TOMB, &["Bones", "Destroying Angel Mushroom", "Dark Urn", "Silver"]),
    ("Vampire", CASTLE_LE_FANU, &["Vampiric Ashes", "Blood Wine", "Onyx", "Silver"]),
    ("Vampire Page", CASTLE_LE_FANU, &["Vampiric Ashes", "Light Urn", "Holy Water", "Silver"]),
    ("Cursed Painting", CASTLE_LE_FANU, &["Ectoplasm", "Onyx", "Silver"]),
    ("Cetea", SEALED_BALLROOM, &["Ocean Bone Shard", "Ocean Bone Shell", "Fire Coral", "Silver"]),
    ("Obsidian Skeleton", BOILING_GROTTO, &["Obsidian", "Snowflake Obsidian", "Bones", "Silver"]),
    ("Lava Slime", BOILING_GROTTO, &["Fire Opal", "Fire Coral", "Bomb", "Silver"]),
    ("Mummy", SAND_TEMPLE, &["Ashes", "Ikurr'ilb Root", "Cloth Bandage", "Silver"]),
    ("Sucsarian", SAND_TEMPLE, &["Ikurr'ilb Root", "Opal", "Survey Banner", "Silver"]),
    ("Ice Golem", TERMINUS_PRISON, &["Snowflake Obsidian", "Crystal Shard", "Silver"]),
    ("Ikkuri", TERMINUS_PRISON, &["Ashes", "Moon Petal", "Staff of Osiris", "Silver"]),
    ("Centaur", FORLORN_ARENA, &["Bones", "Yellow Morel", "Health Vial", "Silver"]),
    ("Chimera", FORLORN_ARENA, &["Fire Opal", "Bones", "Silver"]),
    ("Lunaga", LABYRINTH_OF_ASH, &["Ashes", "Lotus Seed Pod", "Light Urn", "Silver"]),
    ("Abyssal Demon", TOWER_OF_ABYSS, &["Obsidian", "Onyx", "Destroying Angel Mushroom", "Silver"]),
];

const ALCHEMY_RESULTS: &[&str] = &[
    "Limbo",
    "Health Vial",
    "Mana Vial",
    "Antidote",
    "Poison Urn",
    "Light Urn",
    "Dark Urn",
    "Bomb",
    "Holy Water",
    "Blood Wine",
    "Spectral Candle",
    "Fairy Moss",
    "Wisp Heart",
    "Staff of Osiris",
    "Throwing Knife",
    "Poison Throwing Knife",
    "Moonlight Vial",
    "Angel Feather",
    "Survey Banner",
    "Crystal Shard",
];

const CHRISTMAS_LOCATIONS: &[&str] = &[
    "WR: Christmas Present 1",
    "WR: Christmas Present 2",
    "WR: Christmas Present 3",
];

fn build_table() -> Vec<LocationData> {
    let mut rows: Vec<(String, &'static str, LocationFeature)> = Vec::new();
    let mut push = |name: String, region: &'static str, feature| rows.push((name, region, feature));

    for &(name, region) in BASE_LOCATIONS {
        push(name.to_string(), region, LocationFeature::Base);
    }
    for &name in SHOP_LOCATIONS {
        push(name.to_string(), WINGS_REST, LocationFeature::Shop);
    }
    for &(enemy, drop, region) in UNIQUE_DROPS {
        push(format!("{enemy}: {drop} Drop"), region, LocationFeature::UniqueDrop);
    }
    for &(enemy, region, drops) in OTHER_DROPS {
        for drop in drops {
            push(format!("{enemy}: {drop}"), region, LocationFeature::OtherDrop);
        }
    }
    for &(source, _) in QUENCHABLE_WEAPONS {
        push(format!("Quench: {source}"), WINGS_REST, LocationFeature::Quench);
    }
    for &name in ALCHEMY_RESULTS {
        push(format!("Etna: {name}"), WINGS_REST, LocationFeature::Alchemy);
    }

    let per_region: [(fn(&RegionSpots) -> usize, &str, LocationFeature); 5] = [
        (|r| r.lore, "Lore", LocationFeature::Lore),
        (|r| r.grass, "Grass", LocationFeature::Grass),
        (|r| r.breakables, "Breakable", LocationFeature::Breakable),
        (|r| r.coins, "Strange Coin", LocationFeature::Coin),
        (|r| r.halloween, "Soul Candy", LocationFeature::Halloween),
    ];
    for (count, label, feature) in per_region {
        for spot in REGION_SPOTS {
            for n in 1..=count(spot) {
                push(format!("{}: {label} {n}", spot.prefix), spot.region, feature);
            }
        }
        if feature == LocationFeature::Coin {
            // Levels sit between the coin and Halloween partitions.
            for level in 2..=MAX_LEVEL {
                push(format!("Level {level}"), WINGS_REST, LocationFeature::Level);
            }
        }
    }

    for &name in CHRISTMAS_LOCATIONS {
        push(name.to_string(), WINGS_REST, LocationFeature::Christmas);
    }

    rows.into_iter()
        .enumerate()
        .map(|(idx, (name, region, feature))| LocationData {
            name,
            code: BASE_LOCATION_ID + idx as u64,
            region,
            feature,
        })
        .collect()
}

/// Every location the game knows about.
pub fn location_table() -> &'static [LocationData] {
    static TABLE: OnceLock<Vec<LocationData>> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

pub fn location_by_name(name: &str) -> Option<&'static LocationData> {
    location_table().iter().find(|loc| loc.name == name)
}

fn feature_enabled(feature: LocationFeature, options: &LunacidOptions, month: u32) -> bool {
    match feature {
        LocationFeature::Base => true,
        LocationFeature::Shop => options.shopsanity,
        LocationFeature::UniqueDrop => options.dropsanity.is_on(),
        LocationFeature::OtherDrop => options.dropsanity == Dropsanity::Randomized,
        LocationFeature::Quench => options.quenchsanity,
        LocationFeature::Alchemy => options.etnas_pupil,
        LocationFeature::Lore => options.bookworm,
        LocationFeature::Grass => options.grasssanity,
        LocationFeature::Breakable => options.breakables,
        LocationFeature::Level => options.levelsanity,
        LocationFeature::Coin => options.ending.uses_strange_coins(),
        LocationFeature::Halloween => month == OCTOBER,
        LocationFeature::Christmas => month == DECEMBER,
    }
}

/// The locations a world with these options materialises. Level checks
/// start one above the starting level.
pub fn create_locations(options: &LunacidOptions, month: u32, level: i32) -> Vec<&'static LocationData> {
    location_table()
        .iter()
        .filter(|loc| feature_enabled(loc.feature, options, month))
        .filter(|loc| loc.level().map_or(true, |at| at > level))
        .collect()
}

pub fn drop_locations<'s, 'a: 's>(
    locations: &'s [&'a LocationData],
) -> impl Iterator<Item = &'a LocationData> + 's {
    locations.iter().copied().filter(|loc| loc.feature.is_drop())
}

/// Location names grouped by partition, for host-side hinting.
pub fn location_name_groups() -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut groups: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for loc in location_table() {
        groups
            .entry(loc.feature.group_name())
            .or_default()
            .push(loc.name.as_str());
        groups.entry(loc.region).or_default().push(loc.name.as_str());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Ending;
    use std::collections::HashSet;

    fn count(locations: &[&LocationData], feature: LocationFeature) -> usize {
        locations.iter().filter(|loc| loc.feature == feature).count()
    }

    #[test]
    fn names_and_codes_are_unique() {
        let table = location_table();
        let names: HashSet<_> = table.iter().map(|loc| loc.name.as_str()).collect();
        assert_eq!(names.len(), table.len());
        for (idx, loc) in table.iter().enumerate() {
            assert_eq!(loc.code, BASE_LOCATION_ID + idx as u64);
        }
    }

    #[test]
    fn default_options_use_only_base_locations() {
        let locations = create_locations(&LunacidOptions::default(), 6, -1);
        assert_eq!(locations.len(), BASE_LOCATIONS.len());
        assert!(locations.iter().any(|loc| loc.name == location::START_CRYSTAL));
        assert!(locations.iter().any(|loc| loc.name == location::CLIVES_GIFT));
    }

    #[test]
    fn partitions_follow_options() {
        let options = LunacidOptions {
            shopsanity: true,
            dropsanity: Dropsanity::Uniques,
            quenchsanity: true,
            etnas_pupil: true,
            bookworm: true,
            ending: Ending::EndingB,
            ..LunacidOptions::default()
        };
        let locations = create_locations(&options, 6, -1);
        assert_eq!(count(&locations, LocationFeature::Shop), SHOP_LOCATIONS.len());
        assert_eq!(count(&locations, LocationFeature::UniqueDrop), UNIQUE_DROPS.len());
        assert_eq!(count(&locations, LocationFeature::OtherDrop), 0);
        assert_eq!(count(&locations, LocationFeature::Quench), 4);
        assert_eq!(count(&locations, LocationFeature::Alchemy), 20);
        assert_eq!(count(&locations, LocationFeature::Coin), 60);
        assert_eq!(count(&locations, LocationFeature::Grass), 0);
        assert_eq!(count(&locations, LocationFeature::Halloween), 0);
    }

    #[test]
    fn randomized_drops_leave_room_for_alchemy_reservation() {
        let options = LunacidOptions {
            dropsanity: Dropsanity::Randomized,
            ..LunacidOptions::default()
        };
        let locations = create_locations(&options, 6, -1);
        assert!(drop_locations(&locations).count() >= 80 + UNIQUE_DROPS.len());
    }

    #[test]
    fn drop_locations_outlive_the_filtered_slice() {
        let options = LunacidOptions {
            dropsanity: Dropsanity::Uniques,
            ..LunacidOptions::default()
        };
        let drops: Vec<&'static LocationData> = {
            let locations = create_locations(&options, 6, -1);
            drop_locations(&locations).collect()
        };
        assert_eq!(drops.len(), UNIQUE_DROPS.len());
        assert!(drops.iter().all(|loc| loc.feature.is_drop()));
    }

    #[test]
    fn levels_start_above_starting_level() {
        let options = LunacidOptions {
            levelsanity: true,
            ..LunacidOptions::default()
        };
        let locations = create_locations(&options, 6, 5);
        let levels: Vec<i32> = locations.iter().filter_map(|loc| loc.level()).collect();
        assert_eq!(levels.len(), 95);
        assert_eq!(levels.first(), Some(&6));
        assert_eq!(levels.last(), Some(&100));
    }

    #[test]
    fn seasonal_partitions_follow_month() {
        let options = LunacidOptions::default();
        let october = create_locations(&options, OCTOBER, -1);
        assert_eq!(count(&october, LocationFeature::Halloween), 40);
        assert_eq!(count(&october, LocationFeature::Christmas), 0);
        let december = create_locations(&options, DECEMBER, -1);
        assert_eq!(count(&december, LocationFeature::Christmas), 3);
    }

    #[test]
    fn groups_cover_partitions_and_regions() {
        let groups = location_name_groups();
        assert_eq!(groups["Shop"].len(), SHOP_LOCATIONS.len());
        assert!(groups[GRAVE_OF_THE_SLEEPER].contains(&"GS: Final Chest"));
        assert!(location_by_name(location::START_CRYSTAL).is_some());
    }
}
