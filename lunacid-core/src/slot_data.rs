//! Payload handed to the game client at connection time.
//!
//! Key names are part of the client contract and must not change.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::elements::ElementMap;
use crate::equipment::{spells_from, SpellSource};
use crate::items::{DOOR_KEYS, SWITCH_KEYS};
use crate::names::{unique, weapon};
use crate::options::{Ending, LunacidOptions};
use crate::ItemPlacement;

pub const CLIENT_VERSION: &str = "0.9.0";

#[derive(Clone, Debug, Serialize)]
pub struct SlotData {
    pub ut_seed: u64,
    pub seed: u32,
    pub client_version: &'static str,
    pub rolled_month: u32,
    pub elements: ElementMap,
    pub created_class_name: String,
    pub created_class_description: String,
    pub created_class_stats: BTreeMap<String, i64>,
    pub enemy_placement: BTreeMap<String, Vec<String>>,
    pub item_spots: BTreeMap<String, Vec<String>>,
    #[serde(flatten)]
    pub options: Map<String, Value>,
    pub entrances: BTreeMap<String, String>,
}

/// Host seam for finding where an item of this world ended up.
pub trait ItemLocator {
    /// Every placement of `item`, formatted as `"<player>'s <location>"`.
    fn find_item_locations(&self, item: &str) -> Vec<String>;
}

/// Locator over a known list of placements owned by one named player.
#[derive(Copy, Clone, Debug)]
pub struct PlacementLocator<'a> {
    pub player_name: &'a str,
    pub placements: &'a [ItemPlacement],
}

impl ItemLocator for PlacementLocator<'_> {
    fn find_item_locations(&self, item: &str) -> Vec<String> {
        self.placements
            .iter()
            .filter(|placement| placement.item.name == item)
            .map(|placement| format!("{}'s {}", self.player_name, placement.location))
            .collect()
    }
}

/// Items the client shows the location of, keyed by item name.
pub fn important_item_locations<L: ItemLocator + ?Sized>(
    options: &LunacidOptions,
    locator: &L,
) -> BTreeMap<String, Vec<String>> {
    let mut tracked = vec![unique::VAMPIRIC_SYMBOL, weapon::LUCID_BLADE];
    tracked.extend(unique::COMPLETION_IMPORTANT);
    if options.door_locks {
        tracked.extend_from_slice(DOOR_KEYS);
    }
    if options.switch_locks {
        tracked.extend_from_slice(SWITCH_KEYS);
    }
    if options.ending == Ending::EndingE {
        tracked.extend(spells_from(SpellSource::Base).map(|info| info.name));
        if options.dropsanity.is_on() {
            tracked.extend(spells_from(SpellSource::Drop).map(|info| info.name));
        }
    }

    tracked
        .into_iter()
        .map(|item| (item.to_string(), locator.find_item_locations(item)))
        .collect()
}

/// Recover the generation seed from slot data written by this world.
pub fn interpret_slot_data(slot_data: &Value) -> Option<u64> {
    let seed = slot_data.get("ut_seed").and_then(Value::as_u64);
    if seed.is_none() {
        log::warn!("slot data has no ut_seed; tracking may be inaccurate");
    }
    seed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemClassification, LunacidItem};
    use crate::names::location;
    use crate::options::Dropsanity;
    use serde_json::json;

    fn placement(location: &'static str, name: &'static str) -> ItemPlacement {
        ItemPlacement {
            location,
            item: LunacidItem {
                name,
                classification: ItemClassification::PROGRESSION,
                code: 0,
                player: 1,
            },
        }
    }

    #[test]
    fn locator_formats_player_and_location() {
        let placements = [
            placement(location::START_CRYSTAL, "Torch"),
            placement(location::CLIVES_GIFT, unique::OIL_LANTERN),
        ];
        let locator = PlacementLocator {
            player_name: "Demi",
            placements: &placements,
        };
        assert_eq!(
            locator.find_item_locations(unique::OIL_LANTERN),
            vec!["Demi's WR: Clive's Gift".to_string()]
        );
        assert!(locator.find_item_locations("Limbo").is_empty());
    }

    #[test]
    fn tracked_items_depend_on_options() {
        let locator = PlacementLocator {
            player_name: "Demi",
            placements: &[],
        };
        let plain = important_item_locations(&LunacidOptions::default(), &locator);
        assert_eq!(plain.len(), 9);
        assert!(plain.contains_key(weapon::LUCID_BLADE));
        assert!(!plain.contains_key(DOOR_KEYS[0]));

        let options = LunacidOptions {
            door_locks: true,
            switch_locks: true,
            ending: Ending::EndingE,
            dropsanity: Dropsanity::Uniques,
            ..LunacidOptions::default()
        };
        let full = important_item_locations(&options, &locator);
        assert_eq!(full.len(), 9 + DOOR_KEYS.len() + SWITCH_KEYS.len() + 12 + 3);
    }

    #[test]
    fn ut_seed_is_read_back() {
        assert_eq!(interpret_slot_data(&json!({ "ut_seed": 42 })), Some(42));
        assert_eq!(interpret_slot_data(&json!({ "seed": 42 })), None);
    }
}
