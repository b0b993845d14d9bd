use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub mod class;
pub mod elements;
pub mod enemies;
pub mod equipment;
pub mod filler;
pub mod items;
pub mod locations;
pub mod names;
pub mod options;
pub mod pool;
pub mod slot_data;

use class::{
    determine_starting_level, package_custom_class, total_points_given_starting_level, CustomClass,
};
use elements::{assign_elements, ElementMap};
use enemies::{randomize_enemies, EnemyRandomization};
use items::{
    all_filler_items, CatalogItemFactory, ItemCatalog, ItemClassification, ItemFactory,
    LunacidItem, NECESSARY_ALCHEMY_ITEMS,
};
use locations::{create_locations, drop_locations, region, LocationData};
use names::{event, location, unique};
use options::{Dropsanity, Ending, LunacidOptions, OptionError, StartingArea};
use pool::{build_pool, PoolContext};
use slot_data::{important_item_locations, ItemLocator, SlotData, CLIENT_VERSION};

#[derive(Debug, Error)]
pub enum LunacidError {
    #[error("unknown item: {0}")]
    UnknownItem(String),
    #[error("invalid options: {0}")]
    Options(#[from] OptionError),
    #[error("{mandatory} mandatory items do not fit in {locations} locations")]
    InsufficientLocations { locations: usize, mandatory: usize },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LunacidError>;

/// Drop locations reserved for alchemy materials under etna's pupil with
/// randomized drops.
pub const ALCHEMY_PREFILL_LOCATIONS: usize = 80;
pub const ALCHEMY_MATERIAL_COPIES: usize = 5;

/// An item locked to a named location before the host fills the rest.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ItemPlacement {
    pub location: &'static str,
    pub item: LunacidItem,
}

#[derive(Clone, Debug)]
pub struct CreatedItems {
    pub locked: Vec<ItemPlacement>,
    pub pool: Vec<LunacidItem>,
}

/// Alchemy materials the host must place into `locations` before the main
/// fill, so repeatable drops stay farmable.
#[derive(Clone, Debug)]
pub struct PrefillPlan {
    pub items: Vec<LunacidItem>,
    pub locations: Vec<&'static LocationData>,
}

/// Event location placed by the host, holding an event item of the same
/// world.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EventLocation {
    pub location: &'static str,
    pub event: &'static str,
    pub region: &'static str,
}

pub fn victory_event_name(ending: Ending) -> &'static str {
    match ending {
        Ending::EndingA | Ending::EndingE => event::WAKE_DREAMER,
        Ending::EndingB => event::OPEN_DOOR,
        Ending::EndingCd => event::LOOK_INTO_ABYSS,
        Ending::AnyEnding => event::DREAMER_OR_DOOR,
    }
}

pub fn victory_region(ending: Ending) -> &'static str {
    if ending == Ending::EndingB {
        region::LABYRINTH_OF_ASH
    } else {
        region::GRAVE_OF_THE_SLEEPER
    }
}

/// The two event locations every world has: the victory and Sir Hicket.
pub fn event_locations(ending: Ending) -> [EventLocation; 2] {
    [
        EventLocation {
            location: "Free Sir Hicket",
            event: event::HICKET_FREED,
            region: region::BOILING_GROTTO,
        },
        EventLocation {
            location: victory_event_name(ending),
            event: event::VICTORY,
            region: victory_region(ending),
        },
    ]
}

/// Per-player generation context. Owns the world's random stream; every
/// stage draws from it in lifecycle order.
pub struct LunacidWorld<'a> {
    catalog: &'a ItemCatalog,
    player: u32,
    seed: u64,
    month: u32,
    options: LunacidOptions,
    rng: StdRng,
    custom_class: CustomClass,
    level: i32,
    enemies: EnemyRandomization,
    elements: ElementMap,
    starting_weapon: Option<LunacidItem>,
    entrances: BTreeMap<String, String>,
}

impl<'a> LunacidWorld<'a> {
    pub fn new(
        catalog: &'a ItemCatalog,
        player: u32,
        seed: u64,
        month: u32,
        options: LunacidOptions,
    ) -> Self {
        Self {
            catalog,
            player,
            seed,
            month,
            options,
            rng: StdRng::seed_from_u64(seed),
            custom_class: CustomClass::default(),
            level: -1,
            enemies: EnemyRandomization::default(),
            elements: ElementMap::new(),
            starting_weapon: None,
            entrances: BTreeMap::new(),
        }
    }

    pub fn player(&self) -> u32 {
        self.player
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn options(&self) -> &LunacidOptions {
        &self.options
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn custom_class(&self) -> &CustomClass {
        &self.custom_class
    }

    pub fn enemies(&self) -> &EnemyRandomization {
        &self.enemies
    }

    pub fn elements(&self) -> &ElementMap {
        &self.elements
    }

    pub fn starting_weapon(&self) -> Option<&LunacidItem> {
        self.starting_weapon.as_ref()
    }

    pub fn factory(&self) -> CatalogItemFactory<'a> {
        CatalogItemFactory::new(self.catalog, self.player)
    }

    /// Entrance pairings chosen by the host's entrance shuffle.
    pub fn set_entrances(&mut self, entrances: BTreeMap<String, String>) {
        self.entrances = entrances;
    }

    /// Custom class, starting level, colour repair and enemies, in that order.
    pub fn generate_early(&mut self) {
        self.custom_class = package_custom_class(&self.options, &mut self.rng);
        self.level = determine_starting_level(&self.options, &self.custom_class);
        if self.level > 0 {
            log::debug!(
                "starting level {} grants {} stat points",
                self.level,
                total_points_given_starting_level(self.level)
            );
        }
        self.options.verify_item_colors();
        self.enemies = randomize_enemies(self.options.enemy_randomization, &mut self.rng);
    }

    pub fn locations(&self) -> Vec<&'static LocationData> {
        create_locations(&self.options, self.month, self.level)
    }

    pub fn alchemy_prefill_active(&self) -> bool {
        self.options.etnas_pupil && self.options.dropsanity == Dropsanity::Randomized
    }

    /// Locations left for the shuffled pool once the fixed ones are taken.
    pub fn available_location_count(&self) -> usize {
        let mut available = self.locations().len().saturating_sub(1);
        if self.options.starting_area == StartingArea::Tomb {
            available = available.saturating_sub(1);
        }
        if self.alchemy_prefill_active() {
            available = available.saturating_sub(ALCHEMY_PREFILL_LOCATIONS);
        }
        available
    }

    /// Roll elements and build the pool. `precollected` items are already in
    /// the player's hands and are left out of it.
    pub fn create_items(&mut self, precollected: &[LunacidItem]) -> Result<CreatedItems> {
        let location_count = self.available_location_count();
        self.elements = assign_elements(&self.options, &mut self.rng);

        let factory = self.factory();
        let ctx = PoolContext {
            options: &self.options,
            elements: &self.elements,
            month: self.month,
            level: self.level,
        };
        let generated = build_pool(&factory, &ctx, location_count, precollected, &mut self.rng)?;

        let mut locked = vec![ItemPlacement {
            location: location::START_CRYSTAL,
            item: generated.starting_weapon.clone(),
        }];
        if self.options.starting_area == StartingArea::Tomb {
            let lantern = factory.create_item(
                unique::OIL_LANTERN,
                Some(ItemClassification::PROGRESSION | ItemClassification::USEFUL),
            )?;
            locked.push(ItemPlacement {
                location: location::CLIVES_GIFT,
                item: lantern,
            });
        }

        self.starting_weapon = Some(generated.starting_weapon);
        Ok(CreatedItems {
            locked,
            pool: generated.items,
        })
    }

    /// Alchemy pre-fill, when active. Call after [`Self::create_items`].
    pub fn prefill_plan(&mut self) -> Result<Option<PrefillPlan>> {
        if !self.alchemy_prefill_active() {
            return Ok(None);
        }
        log::info!(
            "randomized drops with etna's pupil for player {}; reserving drop locations for alchemy materials",
            self.player
        );

        let factory = self.factory();
        let mut items = Vec::with_capacity(NECESSARY_ALCHEMY_ITEMS.len() * ALCHEMY_MATERIAL_COPIES);
        for _ in 0..ALCHEMY_MATERIAL_COPIES {
            for name in NECESSARY_ALCHEMY_ITEMS {
                items.push(factory.create_item(
                    name,
                    Some(ItemClassification::PROGRESSION | ItemClassification::USEFUL),
                )?);
            }
        }

        let all = self.locations();
        let mut locations: Vec<&'static LocationData> = drop_locations(&all).collect();
        locations.shuffle(&mut self.rng);
        locations.truncate(ALCHEMY_PREFILL_LOCATIONS);

        Ok(Some(PrefillPlan { items, locations }))
    }

    /// Junk item name for host-side padding.
    pub fn filler_item_name(&mut self) -> &'static str {
        let filler: Vec<&'static str> = all_filler_items().collect();
        filler[self.rng.gen_range(0..filler.len())]
    }

    pub fn fill_slot_data<L: ItemLocator + ?Sized>(&mut self, locator: &L) -> SlotData {
        let item_spots = important_item_locations(&self.options, locator);
        SlotData {
            ut_seed: self.seed,
            seed: self.rng.gen_range(0..1_000_000_000),
            client_version: CLIENT_VERSION,
            rolled_month: self.month,
            elements: self.elements.clone(),
            created_class_name: self.custom_class.name.clone(),
            created_class_description: self.custom_class.description.clone(),
            created_class_stats: self.custom_class.stats.clone(),
            enemy_placement: self.enemies.mod_data.clone(),
            item_spots,
            options: self.options.echo(),
            entrances: self.entrances.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GenerationSettings {
    pub seed: u64,
    pub month: u32,
    pub player: u32,
    pub player_name: String,
    pub options: LunacidOptions,
    /// Pairings from an external entrance shuffle, echoed to the client.
    pub entrances: BTreeMap<String, String>,
}

#[derive(Clone, Debug)]
pub struct GenerationOutput {
    pub locations: usize,
    pub locked: Vec<ItemPlacement>,
    pub pool: Vec<LunacidItem>,
    pub prefill: Option<PrefillPlan>,
    pub events: [EventLocation; 2],
    pub slot_data: SlotData,
}

/// Run a whole single-player generation without a host fill: item spots
/// only report the locked placements.
pub fn run(settings: GenerationSettings) -> Result<GenerationOutput> {
    let mut world = LunacidWorld::new(
        ItemCatalog::shared(),
        settings.player,
        settings.seed,
        settings.month,
        settings.options,
    );
    world.set_entrances(settings.entrances);
    world.generate_early();
    let locations = world.locations().len();
    let created = world.create_items(&[])?;
    log::info!(
        "player {} generated {} items for {} locations",
        settings.player,
        created.pool.len() + created.locked.len(),
        locations
    );
    let prefill = world.prefill_plan()?;

    let locator = slot_data::PlacementLocator {
        player_name: &settings.player_name,
        placements: &created.locked,
    };
    let slot_data = world.fill_slot_data(&locator);

    Ok(GenerationOutput {
        locations,
        locked: created.locked,
        pool: created.pool,
        prefill,
        events: event_locations(world.options().ending),
        slot_data,
    })
}
