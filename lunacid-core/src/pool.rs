//! Item pool generation.
//!
//! Stages run in a fixed order and each returns its own items; later stages
//! rely on classifications decided by earlier ones. The mandatory items are
//! checked against the location count before the starting weapon is drawn
//! and filler pads the rest.

use rand::Rng;

use crate::elements::{element_of, ElementMap};
use crate::equipment::{
    is_quenchable, is_ranged_spell, is_ranged_weapon, spells_from, weapons_from, SpellSource,
    Style, WeaponSource, DROP_STARTING_WEAPONS, QUENCH_STARTING_WEAPONS, SHOP_STARTING_WEAPONS,
    STARTING_WEAPONS,
};
use crate::filler::{create_filler, DECEMBER};
use crate::items::{
    ItemClassification, ItemFactory, LunacidItem, BASE_SPECIAL_ITEM_COUNTS, BASE_UNIQUE_ITEMS,
    DOOR_KEYS, SHOP_ITEM_COUNTS, SHOP_UNIQUE_ITEMS, SWITCH_KEYS, VOUCHERS,
};
use crate::names::{coin, custom, seasonal, spell, unique, weapon};
use crate::options::{Ending, LunacidOptions, StartingArea};
use crate::{LunacidError, Result};

pub const OCTOBER: u32 = 10;
pub const MAX_LEVEL: i32 = 100;
pub const SOUL_CANDY_COUNT: usize = 35;
pub const DROP_RATE_UP_COUNT: usize = 3;

/// Everything the stages read besides the factory.
#[derive(Copy, Clone, Debug)]
pub struct PoolContext<'a> {
    pub options: &'a LunacidOptions,
    pub elements: &'a ElementMap,
    pub month: u32,
    pub level: i32,
}

#[derive(Clone, Debug)]
pub struct GeneratedPool {
    pub items: Vec<LunacidItem>,
    pub starting_weapon: LunacidItem,
}

const PROGRESSION: Option<ItemClassification> = Some(ItemClassification::PROGRESSION);

/// Pivotal elements always matter; poison only matters at range.
fn element_is_logical(ctx: &PoolContext<'_>, name: &str, ranged: bool) -> bool {
    let element = element_of(ctx.elements, name);
    element.is_pivotal() || (element.is_poisonous() && ranged)
}

fn weapon_override(ctx: &PoolContext<'_>, name: &str) -> Option<ItemClassification> {
    let promoted = element_is_logical(ctx, name, is_ranged_weapon(name))
        || (ctx.options.quenchsanity && is_quenchable(name))
        || name == weapon::LIMBO;
    promoted.then_some(ItemClassification::PROGRESSION)
}

fn default_or_forced(force_progression: bool) -> Option<ItemClassification> {
    if force_progression {
        PROGRESSION
    } else {
        None
    }
}

pub fn create_weapons<F: ItemFactory + ?Sized>(
    factory: &F,
    ctx: &PoolContext<'_>,
) -> Result<Vec<LunacidItem>> {
    let options = ctx.options;
    let mut sources = vec![WeaponSource::Base];
    if options.shopsanity {
        sources.push(WeaponSource::Shop);
    }
    if options.dropsanity.is_on() {
        sources.push(WeaponSource::Drop);
    }
    if options.quenchsanity {
        sources.push(WeaponSource::Quench);
    }
    if options.etnas_pupil {
        sources.push(WeaponSource::Alchemy);
    }

    sources
        .into_iter()
        .flat_map(weapons_from)
        .map(|info| factory.create_item(info.name, weapon_override(ctx, info.name)))
        .collect()
}

pub fn create_spells<F: ItemFactory + ?Sized>(
    factory: &F,
    ctx: &PoolContext<'_>,
) -> Result<Vec<LunacidItem>> {
    let options = ctx.options;
    let force = options.ending == Ending::EndingE;
    let mut items = Vec::new();

    for info in spells_from(SpellSource::Base) {
        let classification = if info.style == Style::Support {
            default_or_forced(force)
        } else if element_is_logical(ctx, info.name, is_ranged_spell(info.name)) {
            PROGRESSION
        } else if options.breakables && spell::BREAKABLE_SPELLS.contains(&info.name) {
            PROGRESSION
        } else {
            default_or_forced(force)
        };
        items.push(factory.create_item(info.name, classification)?);
    }

    if options.dropsanity.is_on() {
        for info in spells_from(SpellSource::Drop) {
            let classification = if info.style != Style::Support
                && element_is_logical(ctx, info.name, is_ranged_spell(info.name))
            {
                PROGRESSION
            } else {
                default_or_forced(force)
            };
            items.push(factory.create_item(info.name, classification)?);
        }
    }

    Ok(items)
}

fn repeated<F: ItemFactory + ?Sized>(
    factory: &F,
    name: &str,
    count: usize,
    classification: Option<ItemClassification>,
) -> Result<Vec<LunacidItem>> {
    (0..count)
        .map(|_| factory.create_item(name, classification))
        .collect()
}

pub fn create_special_items<F: ItemFactory + ?Sized>(
    factory: &F,
    options: &LunacidOptions,
) -> Result<Vec<LunacidItem>> {
    let mut items = Vec::new();

    for &name in BASE_UNIQUE_ITEMS {
        let classification = match name {
            unique::WHITE_TAPE if options.ending == Ending::EndingE => PROGRESSION,
            unique::DUSTY_CRYSTAL_ORB if options.secret_door_lock => PROGRESSION,
            // Force placed at Clive's gift instead.
            unique::OIL_LANTERN if options.starting_area == StartingArea::Tomb => continue,
            _ => None,
        };
        items.push(factory.create_item(name, classification)?);
    }

    for &name in VOUCHERS {
        items.push(factory.create_item(name, PROGRESSION)?);
    }
    for &(name, count) in BASE_SPECIAL_ITEM_COUNTS {
        items.extend(repeated(factory, name, count, None)?);
    }

    if options.shopsanity {
        for &name in SHOP_UNIQUE_ITEMS {
            items.push(factory.create_item(name, None)?);
        }
        for &(name, count) in SHOP_ITEM_COUNTS {
            items.extend(repeated(factory, name, count, None)?);
        }
    } else {
        for &name in VOUCHERS {
            items.push(factory.create_item(name, None)?);
        }
    }

    if options.dropsanity.is_on() {
        items.extend(repeated(factory, custom::DROP_RATE_UP, DROP_RATE_UP_COUNT, None)?);
    }
    if options.levelsanity {
        items.push(factory.create_item(custom::LUCKY_BANGLE, None)?);
    }

    items.extend(create_strange_coins(factory, options)?);
    items.push(factory.create_item(custom::BESTIAL_MASTERY, None)?);
    Ok(items)
}

/// Coins for the coin endings: `required` of them are progression and
/// useful, the surplus up to `max(required, total)` is progression only.
pub fn create_strange_coins<F: ItemFactory + ?Sized>(
    factory: &F,
    options: &LunacidOptions,
) -> Result<Vec<LunacidItem>> {
    if !options.ending.uses_strange_coins() {
        return Ok(Vec::new());
    }
    let required = options.required_strange_coin.value() as usize;
    let total = required.max(options.total_strange_coin.value() as usize);

    let mut coins = repeated(
        factory,
        coin::STRANGE_COIN,
        required,
        Some(ItemClassification::PROGRESSION | ItemClassification::USEFUL),
    )?;
    coins.extend(repeated(factory, coin::STRANGE_COIN, total - required, PROGRESSION)?);
    Ok(coins)
}

pub fn create_switch_items<F: ItemFactory + ?Sized>(
    factory: &F,
    options: &LunacidOptions,
) -> Result<Vec<LunacidItem>> {
    if !options.switch_locks {
        return Ok(Vec::new());
    }
    SWITCH_KEYS
        .iter()
        .map(|name| factory.create_item(name, None))
        .collect()
}

pub fn create_door_items<F: ItemFactory + ?Sized>(
    factory: &F,
    options: &LunacidOptions,
) -> Result<Vec<LunacidItem>> {
    if !options.door_locks {
        return Ok(Vec::new());
    }
    DOOR_KEYS
        .iter()
        .map(|name| factory.create_item(name, None))
        .collect()
}

/// Seasonal spells are logical with any pivotal or poisonous element.
fn seasonal_override(ctx: &PoolContext<'_>, name: &str) -> Option<ItemClassification> {
    let element = element_of(ctx.elements, name);
    (element.is_pivotal() || element.is_poisonous()).then_some(ItemClassification::PROGRESSION)
}

pub fn create_halloween_items<F: ItemFactory + ?Sized>(
    factory: &F,
    ctx: &PoolContext<'_>,
) -> Result<Vec<LunacidItem>> {
    if ctx.month != OCTOBER {
        return Ok(Vec::new());
    }
    let mut items = vec![factory.create_item(
        spell::PUMPKIN_POP,
        seasonal_override(ctx, spell::PUMPKIN_POP),
    )?];
    items.extend(repeated(factory, seasonal::SOUL_CANDY, SOUL_CANDY_COUNT, None)?);
    if ctx.options.dropsanity.is_on() {
        let saber = element_of(ctx.elements, weapon::CAVALRY_SABER)
            .is_pivotal()
            .then_some(ItemClassification::PROGRESSION);
        items.push(factory.create_item(weapon::CAVALRY_SABER, saber)?);
    }
    Ok(items)
}

pub fn create_christmas_items<F: ItemFactory + ?Sized>(
    factory: &F,
    ctx: &PoolContext<'_>,
) -> Result<Vec<LunacidItem>> {
    if ctx.month != DECEMBER {
        return Ok(Vec::new());
    }
    Ok(vec![factory.create_item(
        spell::JINGLE_BELLS,
        seasonal_override(ctx, spell::JINGLE_BELLS),
    )?])
}

/// One progression experience item per level the player did not start with.
pub fn create_stat_items<F: ItemFactory + ?Sized>(
    factory: &F,
    ctx: &PoolContext<'_>,
) -> Result<Vec<LunacidItem>> {
    if !ctx.options.levelsanity {
        return Ok(Vec::new());
    }
    let count = usize::try_from(MAX_LEVEL - ctx.level).unwrap_or(0);
    repeated(factory, custom::EXPERIENCE, count, PROGRESSION)
}

/// Every item that must be placed, before the starting weapon is drawn.
pub fn create_mandatory_items<F: ItemFactory + ?Sized>(
    factory: &F,
    ctx: &PoolContext<'_>,
) -> Result<Vec<LunacidItem>> {
    let stages = [
        create_weapons(factory, ctx)?,
        create_spells(factory, ctx)?,
        create_special_items(factory, ctx.options)?,
        create_switch_items(factory, ctx.options)?,
        create_door_items(factory, ctx.options)?,
        create_halloween_items(factory, ctx)?,
        create_christmas_items(factory, ctx)?,
        create_stat_items(factory, ctx)?,
    ];
    Ok(stages.concat())
}

pub fn starting_weapon_candidates(options: &LunacidOptions) -> Vec<&'static str> {
    let mut candidates = STARTING_WEAPONS.to_vec();
    if options.shopsanity {
        candidates.extend_from_slice(SHOP_STARTING_WEAPONS);
    }
    if options.dropsanity.is_on() {
        candidates.extend_from_slice(DROP_STARTING_WEAPONS);
    }
    if options.quenchsanity {
        candidates.extend_from_slice(QUENCH_STARTING_WEAPONS);
    }
    candidates
}

pub fn choose_starting_weapon<F, R>(
    factory: &F,
    ctx: &PoolContext<'_>,
    rng: &mut R,
) -> Result<LunacidItem>
where
    F: ItemFactory + ?Sized,
    R: Rng + ?Sized,
{
    let candidates = starting_weapon_candidates(ctx.options);
    let chosen = candidates[rng.gen_range(0..candidates.len())];
    let classification = if QUENCH_STARTING_WEAPONS.contains(&chosen) {
        PROGRESSION
    } else {
        weapon_override(ctx, chosen)
    };
    log::info!("starting weapon: {chosen}");
    factory.create_item(chosen, classification)
}

/// Build the shuffled pool for `location_count` locations.
///
/// Items in `excluded` (already granted to the player) are dropped once each.
/// Fails with [`LunacidError::InsufficientLocations`] before any filler is
/// drawn when the mandatory items do not fit.
pub fn build_pool<F, R>(
    factory: &F,
    ctx: &PoolContext<'_>,
    location_count: usize,
    excluded: &[LunacidItem],
    rng: &mut R,
) -> Result<GeneratedPool>
where
    F: ItemFactory + ?Sized,
    R: Rng + ?Sized,
{
    let mut items = create_mandatory_items(factory, ctx)?;
    for item in excluded {
        if let Some(pos) = items
            .iter()
            .position(|candidate| candidate.name == item.name && candidate.player == item.player)
        {
            items.remove(pos);
        }
    }

    if items.len() > location_count {
        return Err(LunacidError::InsufficientLocations {
            locations: location_count,
            mandatory: items.len(),
        });
    }
    log::debug!("created {} mandatory items", items.len());

    let starting_weapon = choose_starting_weapon(factory, ctx, rng)?;
    items.retain(|item| item.name != starting_weapon.name);

    let filler_slots = location_count - items.len();
    items.extend(create_filler(factory, ctx.options, ctx.month, filler_slots, rng)?);

    Ok(GeneratedPool {
        items,
        starting_weapon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{assign_elements, vanilla_elements};
    use crate::equipment::Element;
    use crate::items::{CatalogItemFactory, ItemCatalog};
    use crate::options::{Dropsanity, StrangeCoinCount};
    use rand::{rngs::StdRng, SeedableRng};

    fn count(items: &[LunacidItem], name: &str) -> usize {
        items.iter().filter(|item| item.name == name).count()
    }

    fn classification_of(items: &[LunacidItem], name: &str) -> ItemClassification {
        items
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.classification)
            .unwrap()
    }

    fn ctx<'a>(options: &'a LunacidOptions, elements: &'a ElementMap, month: u32, level: i32) -> PoolContext<'a> {
        PoolContext {
            options,
            elements,
            month,
            level,
        }
    }

    #[test]
    fn default_pool_fills_fifty_locations() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions::default();
        let elements = vanilla_elements();
        let mut rng = StdRng::seed_from_u64(1);
        let pool = build_pool(&factory, &ctx(&options, &elements, 6, -1), 50, &[], &mut rng).unwrap();
        assert_eq!(pool.items.len(), 50);
        for key in SWITCH_KEYS.iter().chain(DOOR_KEYS) {
            assert_eq!(count(&pool.items, key), 0);
        }
    }

    #[test]
    fn too_few_locations_is_fatal() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions::default();
        let elements = vanilla_elements();
        let mut rng = StdRng::seed_from_u64(1);
        let err = build_pool(&factory, &ctx(&options, &elements, 6, -1), 10, &[], &mut rng).unwrap_err();
        assert!(matches!(err, LunacidError::InsufficientLocations { locations: 10, .. }));
    }

    #[test]
    fn vanilla_elements_promote_pivotal_weapons() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions::default();
        let elements = vanilla_elements();
        let weapons = create_weapons(&factory, &ctx(&options, &elements, 6, -1)).unwrap();
        assert!(classification_of(&weapons, "Torch").is_progression());
        assert!(classification_of(&weapons, "Iron Torch").is_progression());
        assert!(classification_of(&weapons, "Moonlight").is_progression());
        // Poison only counts at range.
        assert!(!classification_of(&weapons, "Serpent Fang").is_progression());
        assert!(!classification_of(&weapons, "Battle Axe").is_progression());
    }

    #[test]
    fn ranged_poison_weapon_is_progression() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions::default();
        let mut elements = vanilla_elements();
        elements.insert("Elfen Bow", Element::IceAndPoison);
        let weapons = create_weapons(&factory, &ctx(&options, &elements, 6, -1)).unwrap();
        assert!(classification_of(&weapons, "Elfen Bow").is_progression());
    }

    #[test]
    fn quenchsanity_promotes_quenchable_weapons() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions {
            quenchsanity: true,
            etnas_pupil: true,
            ..LunacidOptions::default()
        };
        let elements = vanilla_elements();
        let weapons = create_weapons(&factory, &ctx(&options, &elements, 6, -1)).unwrap();
        assert!(classification_of(&weapons, "Battle Axe").is_progression());
        assert!(classification_of(&weapons, "Death Scythe").is_useful());
        assert!(classification_of(&weapons, weapon::LIMBO).is_progression());
    }

    #[test]
    fn ending_e_forces_every_base_spell() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions {
            ending: Ending::EndingE,
            dropsanity: Dropsanity::Uniques,
            ..LunacidOptions::default()
        };
        let elements = vanilla_elements();
        let spells = create_spells(&factory, &ctx(&options, &elements, 6, -1)).unwrap();
        assert_eq!(spells.len(), 15);
        assert!(spells.iter().all(|s| s.classification.is_progression()));
    }

    #[test]
    fn support_spells_keep_catalog_classification() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions::default();
        let mut elements = vanilla_elements();
        elements.insert("Barrier", Element::Fire);
        let spells = create_spells(&factory, &ctx(&options, &elements, 6, -1)).unwrap();
        assert_eq!(classification_of(&spells, "Barrier"), ItemClassification::USEFUL);
        assert!(classification_of(&spells, "Lightning").is_progression());
        assert!(classification_of(&spells, "Poison Mist").is_progression());
        assert!(!classification_of(&spells, spell::ICE_TEAR).is_progression());
    }

    #[test]
    fn breakables_promote_wall_spells() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions {
            breakables: true,
            ..LunacidOptions::default()
        };
        let elements = vanilla_elements();
        let spells = create_spells(&factory, &ctx(&options, &elements, 6, -1)).unwrap();
        for name in spell::BREAKABLE_SPELLS {
            assert!(classification_of(&spells, name).is_progression(), "{name}");
        }
    }

    #[test]
    fn special_items_respect_option_overrides() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions {
            ending: Ending::EndingE,
            secret_door_lock: true,
            starting_area: StartingArea::Tomb,
            ..LunacidOptions::default()
        };
        let items = create_special_items(&factory, &options).unwrap();
        assert!(classification_of(&items, unique::WHITE_TAPE).is_progression());
        assert!(classification_of(&items, unique::DUSTY_CRYSTAL_ORB).is_progression());
        assert_eq!(count(&items, unique::OIL_LANTERN), 0);
        assert_eq!(count(&items, unique::VAMPIRIC_SYMBOL), 3);
        // Progression vouchers plus the non-shop copies.
        assert_eq!(count(&items, VOUCHERS[0]), 2);
        assert_eq!(count(&items, custom::BESTIAL_MASTERY), 1);
    }

    #[test]
    fn shopsanity_replaces_voucher_fallback() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions {
            shopsanity: true,
            dropsanity: Dropsanity::Randomized,
            levelsanity: true,
            ..LunacidOptions::default()
        };
        let items = create_special_items(&factory, &options).unwrap();
        assert_eq!(count(&items, VOUCHERS[1]), 1);
        assert!(classification_of(&items, VOUCHERS[1]).is_progression());
        assert_eq!(count(&items, "Ocean Elixir"), 1);
        assert_eq!(count(&items, "Moonlight Vial"), 2);
        assert_eq!(count(&items, custom::DROP_RATE_UP), 3);
        assert_eq!(count(&items, custom::LUCKY_BANGLE), 1);
    }

    #[test]
    fn strange_coins_split_required_and_extra() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        for (required, total) in [(30, 30), (10, 45), (40, 20), (1, 60)] {
            let options = LunacidOptions {
                ending: Ending::EndingB,
                required_strange_coin: StrangeCoinCount::new("required_strange_coin", required).unwrap(),
                total_strange_coin: StrangeCoinCount::new("total_strange_coin", total).unwrap(),
                ..LunacidOptions::default()
            };
            let coins = create_strange_coins(&factory, &options).unwrap();
            let mandatory = coins.iter().filter(|c| c.classification.is_useful()).count();
            let extra = coins
                .iter()
                .filter(|c| c.classification == ItemClassification::PROGRESSION)
                .count();
            assert_eq!(mandatory as i64, required);
            assert_eq!((mandatory + extra) as i64, required.max(total));
        }
    }

    #[test]
    fn coins_only_for_coin_endings() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions {
            ending: Ending::EndingCd,
            ..LunacidOptions::default()
        };
        assert!(create_strange_coins(&factory, &options).unwrap().is_empty());
        let any = LunacidOptions {
            ending: Ending::AnyEnding,
            ..LunacidOptions::default()
        };
        assert_eq!(create_strange_coins(&factory, &any).unwrap().len(), 30);
    }

    #[test]
    fn ending_b_thirty_coins_no_extra() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions {
            ending: Ending::EndingB,
            ..LunacidOptions::default()
        };
        let elements = vanilla_elements();
        let mut rng = StdRng::seed_from_u64(4);
        let pool = build_pool(&factory, &ctx(&options, &elements, 6, -1), 120, &[], &mut rng).unwrap();
        let coins: Vec<_> = pool
            .items
            .iter()
            .filter(|item| item.name == coin::STRANGE_COIN)
            .collect();
        assert_eq!(coins.len(), 30);
        assert!(coins.iter().all(|c| c.classification.is_progression() && c.classification.is_useful()));
    }

    #[test]
    fn halloween_items_only_in_october() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions::default();
        let elements = vanilla_elements();

        let october = create_halloween_items(&factory, &ctx(&options, &elements, OCTOBER, -1)).unwrap();
        assert_eq!(count(&october, spell::PUMPKIN_POP), 1);
        assert_eq!(count(&october, seasonal::SOUL_CANDY), SOUL_CANDY_COUNT);
        assert_eq!(count(&october, weapon::CAVALRY_SABER), 0);

        let june = create_halloween_items(&factory, &ctx(&options, &elements, 6, -1)).unwrap();
        assert!(june.is_empty());

        let mut rng = StdRng::seed_from_u64(10);
        let pool = build_pool(&factory, &ctx(&options, &elements, OCTOBER, -1), 200, &[], &mut rng).unwrap();
        assert_eq!(count(&pool.items, spell::PUMPKIN_POP), 1);
        assert_eq!(count(&pool.items, seasonal::SOUL_CANDY), SOUL_CANDY_COUNT);
    }

    #[test]
    fn christmas_adds_jingle_bells() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions::default();
        let mut elements = vanilla_elements();
        elements.insert(spell::JINGLE_BELLS, Element::Poison);
        let items = create_christmas_items(&factory, &ctx(&options, &elements, DECEMBER, -1)).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].classification.is_progression());
        assert!(create_christmas_items(&factory, &ctx(&options, &elements, OCTOBER, -1))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn levelsanity_adds_missing_levels() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions {
            levelsanity: true,
            ..LunacidOptions::default()
        };
        let elements = vanilla_elements();
        let items = create_stat_items(&factory, &ctx(&options, &elements, 6, 5)).unwrap();
        assert_eq!(items.len(), 95);
        assert!(items
            .iter()
            .all(|i| i.name == custom::EXPERIENCE && i.classification.is_progression()));
    }

    #[test]
    fn starting_weapon_is_not_in_pool() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions {
            shopsanity: true,
            dropsanity: Dropsanity::Uniques,
            quenchsanity: true,
            random_elements: true,
            ..LunacidOptions::default()
        };
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let elements = assign_elements(&options, &mut rng);
            let pool = build_pool(&factory, &ctx(&options, &elements, 6, -1), 90, &[], &mut rng).unwrap();
            assert_eq!(pool.items.len(), 90);
            assert_eq!(count(&pool.items, pool.starting_weapon.name), 0);
            assert!(starting_weapon_candidates(&options).contains(&pool.starting_weapon.name));
        }
    }

    #[test]
    fn quench_starting_weapon_is_progression() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions {
            quenchsanity: true,
            ..LunacidOptions::default()
        };
        let elements = vanilla_elements();
        for seed in 0..60 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chosen = choose_starting_weapon(&factory, &ctx(&options, &elements, 6, -1), &mut rng).unwrap();
            if QUENCH_STARTING_WEAPONS.contains(&chosen.name) || chosen.name == "Torch" {
                assert!(chosen.classification.is_progression(), "{}", chosen.name);
            }
        }
    }

    #[test]
    fn excluded_items_are_removed_once() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions::default();
        let elements = vanilla_elements();
        let symbol = factory.create_item(unique::VAMPIRIC_SYMBOL, None).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let pool = build_pool(
            &factory,
            &ctx(&options, &elements, 6, -1),
            60,
            std::slice::from_ref(&symbol),
            &mut rng,
        )
        .unwrap();
        assert_eq!(count(&pool.items, unique::VAMPIRIC_SYMBOL), 2);
        assert_eq!(pool.items.len(), 60);
    }

    #[test]
    fn closures_work_as_factories() {
        let catalog = ItemCatalog::new();
        let inner = CatalogItemFactory::new(&catalog, 9);
        let factory = |name: &str, classification: Option<ItemClassification>| {
            inner.create_item(name, classification)
        };
        let options = LunacidOptions {
            switch_locks: true,
            ..LunacidOptions::default()
        };
        let items = create_switch_items(&factory, &options).unwrap();
        assert_eq!(items.len(), SWITCH_KEYS.len());
        assert!(items.iter().all(|item| item.player == 9));
    }
}
