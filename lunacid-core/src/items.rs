use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::sync::OnceLock;

use crate::equipment::{SPELLS, WEAPONS};
use crate::names::{coin, custom, seasonal, trap, unique};
use crate::{LunacidError, Result};

/// Role of an item in logical progression. Flags combine with `|`; the empty
/// set is filler.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemClassification(u8);

impl ItemClassification {
    pub const FILLER: Self = Self(0);
    pub const PROGRESSION: Self = Self(0b001);
    pub const USEFUL: Self = Self(0b010);
    pub const TRAP: Self = Self(0b100);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_progression(self) -> bool {
        self.contains(Self::PROGRESSION)
    }

    pub const fn is_useful(self) -> bool {
        self.contains(Self::USEFUL)
    }

    pub const fn is_trap(self) -> bool {
        self.contains(Self::TRAP)
    }

    pub const fn is_filler(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ItemClassification {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ItemClassification {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ItemClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_filler() {
            return f.write_str("filler");
        }
        let mut parts = Vec::new();
        if self.is_progression() {
            parts.push("progression");
        }
        if self.is_useful() {
            parts.push("useful");
        }
        if self.is_trap() {
            parts.push("trap");
        }
        f.write_str(&parts.join(" | "))
    }
}

use ItemClassification as C;

pub const VOUCHERS: &[&str] = &["Sheryl's Initial Offerings", "Sheryl's Dreamer Vouchers"];

pub const BASE_UNIQUE_ITEMS: &[&str] = &[
    unique::OIL_LANTERN,
    unique::ENCHANTED_KEY,
    unique::CORRUPTED_KEY,
    unique::SKULL_OF_JOSIAH,
    unique::EARTH_TALISMAN,
    unique::WATER_TALISMAN,
    unique::VHS_TAPE,
    unique::WHITE_TAPE,
    unique::DUSTY_CRYSTAL_ORB,
];

pub const BASE_SPECIAL_ITEM_COUNTS: &[(&str, usize)] = &[(unique::VAMPIRIC_SYMBOL, 3)];

pub const SHOP_UNIQUE_ITEMS: &[&str] = &["Ocean Elixir", "Black Book"];

pub const SHOP_ITEM_COUNTS: &[(&str, usize)] = &[("Moonlight Vial", 2)];

pub const SWITCH_KEYS: &[&str] = &[
    "Hollow Basin Switch Key",
    "Fetid Mire Switch Key",
    "Temple of Silence Switch Key",
    "Forbidden Archives Switch Key",
    "Accursed Tomb Switch Key",
    "Castle Le Fanu Switch Key",
    "Sealed Ballroom Switch Key",
    "Terminus Prison Switch Key",
];

pub const DOOR_KEYS: &[&str] = &[
    "Hollow Basin Door Key",
    "Yosei Forest Door Key",
    "Forbidden Archives Door Key",
    "Accursed Tomb Door Key",
    "Castle Le Fanu Door Key",
    "Boiling Grotto Door Key",
    "Sand Temple Door Key",
    "Labyrinth of Ash Door Key",
];

pub const TRAPS: &[&str] = &[
    "Bleed Trap",
    "Poison Trap",
    "Curse Trap",
    "Slowness Trap",
    "Blindness Trap",
    "Mana Drain Trap",
    "XP Drain Trap",
];

pub const CHRISTMAS_TRAPS: &[&str] = &[trap::COAL, trap::EGGNOG];

pub const BASIC_MATERIALS: &[&str] = &[
    "Ectoplasm",
    "Snowflake Obsidian",
    "Moon Petal",
    "Fire Opal",
    "Ashes",
    "Fiddlehead",
    "Fire Coral",
    "Vampiric Ashes",
    "Opal",
    "Yellow Morel",
    "Lotus Seed Pod",
    "Obsidian",
    "Onyx",
    "Ocean Bone Shard",
    "Bloodweed",
    "Ikurr'ilb Root",
    "Destroying Angel Mushroom",
    "Ocean Bone Shell",
    "Bones",
];

/// Materials that must stay farmable when every drop is a check.
pub const NECESSARY_ALCHEMY_ITEMS: &[&str] = &[
    "Ectoplasm",
    "Snowflake Obsidian",
    "Moon Petal",
    "Fire Opal",
    "Ashes",
    "Fiddlehead",
    "Fire Coral",
    "Vampiric Ashes",
    "Opal",
    "Yellow Morel",
    "Lotus Seed Pod",
    "Obsidian",
    "Onyx",
    "Ocean Bone Shard",
    "Bloodweed",
    "Destroying Angel Mushroom",
];

pub const CONSUMABLES: &[&str] = &[
    "Blood Wine",
    "Light Urn",
    "Cloth Bandage",
    "Dark Urn",
    "Bomb",
    "Poison Urn",
    "Wisp Heart",
    "Staff of Osiris",
    "Moonlight Vial",
    "Spectral Candle",
    "Health Vial",
    "Mana Vial",
    "Fairy Moss",
    "Crystal Shard",
    "Poison Throwing Knife",
    "Throwing Knife",
    "Holy Water",
    "Antidote",
    "Survey Banner",
    "Pink Shrimp",
    "Angel Feather",
    "Fool's Gold",
];

/// Every junk item, silver included.
pub fn all_filler_items() -> impl Iterator<Item = &'static str> {
    std::iter::once(coin::SILVER)
        .chain(CONSUMABLES.iter().copied())
        .chain(BASIC_MATERIALS.iter().copied())
}

const fn i(name: &'static str, classification: ItemClassification) -> (&'static str, ItemClassification) {
    (name, classification)
}

// Codes continue after weapons and spells; append only.
const OTHER_ITEMS: &[(&str, ItemClassification)] = &[
    i(unique::OIL_LANTERN, C::PROGRESSION),
    i(unique::ENCHANTED_KEY, C::PROGRESSION),
    i(unique::CORRUPTED_KEY, C::PROGRESSION),
    i(unique::SKULL_OF_JOSIAH, C::USEFUL),
    i(unique::EARTH_TALISMAN, C::PROGRESSION),
    i(unique::WATER_TALISMAN, C::PROGRESSION),
    i(unique::VHS_TAPE, C::USEFUL),
    i(unique::WHITE_TAPE, C::USEFUL),
    i(unique::DUSTY_CRYSTAL_ORB, C::USEFUL),
    i(unique::VAMPIRIC_SYMBOL, C::PROGRESSION),
    i("Sheryl's Initial Offerings", C::USEFUL),
    i("Sheryl's Dreamer Vouchers", C::USEFUL),
    i("Ocean Elixir", C::USEFUL),
    i("Black Book", C::USEFUL),
    i(coin::STRANGE_COIN, C::PROGRESSION),
    i(custom::EXPERIENCE, C::FILLER),
    i(custom::LUCKY_BANGLE, C::USEFUL),
    i(custom::BESTIAL_MASTERY, C::USEFUL),
    i(custom::DROP_RATE_UP, C::USEFUL),
    i(seasonal::SOUL_CANDY, C::FILLER),
];

pub const BASE_ITEM_ID: u64 = 771_111_110;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ItemDefinition {
    pub name: &'static str,
    pub classification: ItemClassification,
    pub code: u64,
}

/// The static item universe with name and code lookup. Built once and shared
/// read-only between worlds.
#[derive(Debug)]
pub struct ItemCatalog {
    items: Vec<ItemDefinition>,
    by_name: HashMap<&'static str, usize>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        let weapons = WEAPONS.iter().map(|info| (info.name, info.classification));
        let spells = SPELLS.iter().map(|info| (info.name, info.classification));
        let named = OTHER_ITEMS.iter().copied();
        let switches = SWITCH_KEYS.iter().map(|name| (*name, C::PROGRESSION));
        let doors = DOOR_KEYS.iter().map(|name| (*name, C::PROGRESSION));
        let traps = TRAPS
            .iter()
            .chain(CHRISTMAS_TRAPS.iter())
            .map(|name| (*name, C::TRAP));
        let filler = all_filler_items().map(|name| (name, C::FILLER));

        let items: Vec<ItemDefinition> = weapons
            .chain(spells)
            .chain(named)
            .chain(switches)
            .chain(doors)
            .chain(traps)
            .chain(filler)
            .enumerate()
            .map(|(idx, (name, classification))| ItemDefinition {
                name,
                classification,
                code: BASE_ITEM_ID + idx as u64,
            })
            .collect();

        let by_name = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.name, idx))
            .collect();

        Self { items, by_name }
    }

    /// Process-wide catalog, constructed on first use.
    pub fn shared() -> &'static ItemCatalog {
        static CATALOG: OnceLock<ItemCatalog> = OnceLock::new();
        CATALOG.get_or_init(ItemCatalog::new)
    }

    pub fn get(&self, name: &str) -> Option<&ItemDefinition> {
        self.by_name.get(name).map(|&idx| &self.items[idx])
    }

    pub fn by_code(&self, code: u64) -> Option<&ItemDefinition> {
        let idx = code.checked_sub(BASE_ITEM_ID)?;
        self.items.get(usize::try_from(idx).ok()?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn with_classification(
        &self,
        classification: ItemClassification,
    ) -> impl Iterator<Item = &ItemDefinition> {
        self.items
            .iter()
            .filter(move |item| item.classification == classification)
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::new()
    }
}

pub fn lookup_item_name(code: u64) -> &'static str {
    ItemCatalog::shared()
        .by_code(code)
        .map(|item| item.name)
        .unwrap_or("?")
}

/// Named item groups the host exposes for hints and `!getitem`-style lookups.
pub fn item_name_groups() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("Vampiric Symbols", vec![unique::VAMPIRIC_SYMBOL]),
        ("Switch Keys", SWITCH_KEYS.to_vec()),
        ("Door Keys", DOOR_KEYS.to_vec()),
        ("VHS Tapes", vec![unique::VHS_TAPE, unique::WHITE_TAPE]),
        ("Talismans", vec![unique::EARTH_TALISMAN, unique::WATER_TALISMAN]),
        ("Traps", TRAPS.to_vec()),
        ("Materials", BASIC_MATERIALS.to_vec()),
        ("Junk", all_filler_items().collect()),
    ]
}

/// A concrete item handed to the host. Never mutated once created.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct LunacidItem {
    pub name: &'static str,
    pub classification: ItemClassification,
    pub code: u64,
    pub player: u32,
}

/// Seam between pool generation and host bookkeeping: turns a name (and an
/// optional classification override) into an owned item.
pub trait ItemFactory {
    fn create_item(
        &self,
        name: &str,
        classification: Option<ItemClassification>,
    ) -> Result<LunacidItem>;
}

impl<F> ItemFactory for F
where
    F: Fn(&str, Option<ItemClassification>) -> Result<LunacidItem>,
{
    fn create_item(
        &self,
        name: &str,
        classification: Option<ItemClassification>,
    ) -> Result<LunacidItem> {
        self(name, classification)
    }
}

/// Factory backed by the item catalog; stamps every item with one player.
#[derive(Copy, Clone, Debug)]
pub struct CatalogItemFactory<'a> {
    catalog: &'a ItemCatalog,
    player: u32,
}

impl<'a> CatalogItemFactory<'a> {
    pub fn new(catalog: &'a ItemCatalog, player: u32) -> Self {
        Self { catalog, player }
    }
}

impl ItemFactory for CatalogItemFactory<'_> {
    fn create_item(
        &self,
        name: &str,
        classification: Option<ItemClassification>,
    ) -> Result<LunacidItem> {
        let definition = self
            .catalog
            .get(name)
            .ok_or_else(|| LunacidError::UnknownItem(name.to_string()))?;
        Ok(LunacidItem {
            name: definition.name,
            classification: classification.unwrap_or(definition.classification),
            code: definition.code,
            player: self.player,
        })
    }
}
