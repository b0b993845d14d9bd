use rand::Rng;

use crate::items::{ItemFactory, LunacidItem, CHRISTMAS_TRAPS};
use crate::names::{coin, custom};
use crate::options::LunacidOptions;
use crate::Result;

pub const DECEMBER: u32 = 12;

/// Trap names eligible this month. The Christmas traps only count in December.
pub fn trap_candidates(options: &LunacidOptions, month: u32) -> Vec<&str> {
    options
        .traps
        .iter()
        .map(String::as_str)
        .filter(|name| month == DECEMBER || !CHRISTMAS_TRAPS.contains(name))
        .collect()
}

/// Silver and experience are always junk candidates, plus the configured set.
pub fn filler_candidates(options: &LunacidOptions) -> Vec<&str> {
    [coin::SILVER, custom::EXPERIENCE]
        .into_iter()
        .chain(options.filler.iter().map(String::as_str))
        .collect()
}

/// Pad `slots` locations with traps and junk, both drawn with replacement.
///
/// `floor(slots * trap_percent / 100)` of them are traps; with no eligible
/// trap the percentage is treated as zero.
pub fn create_filler<F, R>(
    factory: &F,
    options: &LunacidOptions,
    month: u32,
    slots: usize,
    rng: &mut R,
) -> Result<Vec<LunacidItem>>
where
    F: ItemFactory + ?Sized,
    R: Rng + ?Sized,
{
    let mut items = Vec::with_capacity(slots);
    if slots == 0 {
        return Ok(items);
    }

    let traps = trap_candidates(options, month);
    let filler = filler_candidates(options);

    let trap_percent = if traps.is_empty() {
        0
    } else {
        options.trap_percent.value() as usize
    };
    let trap_count = slots * trap_percent / 100;
    let filler_count = slots - trap_count;

    for _ in 0..trap_count {
        let name = traps[rng.gen_range(0..traps.len())];
        items.push(factory.create_item(name, None)?);
    }
    for _ in 0..filler_count {
        let name = filler[rng.gen_range(0..filler.len())];
        items.push(factory.create_item(name, None)?);
    }

    log::debug!("filled {slots} slots with {trap_count} traps and {filler_count} junk items");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{CatalogItemFactory, ItemCatalog, TRAPS};
    use crate::names::trap;
    use crate::options::TrapPercent;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::BTreeSet;

    fn with_traps(traps: &[&str], percent: i64) -> LunacidOptions {
        LunacidOptions {
            traps: traps.iter().map(|t| t.to_string()).collect(),
            trap_percent: TrapPercent::new("trap_percent", percent).unwrap(),
            ..LunacidOptions::default()
        }
    }

    #[test]
    fn output_length_matches_slots() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = LunacidOptions::default();
        for slots in [0, 1, 7, 64, 333] {
            let mut rng = StdRng::seed_from_u64(slots as u64);
            let items = create_filler(&factory, &options, 6, slots, &mut rng).unwrap();
            assert_eq!(items.len(), slots);
        }
    }

    #[test]
    fn trap_share_is_floored() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = with_traps(TRAPS, 30);
        let mut rng = StdRng::seed_from_u64(5);
        let items = create_filler(&factory, &options, 6, 33, &mut rng).unwrap();
        let traps = items.iter().filter(|i| i.classification.is_trap()).count();
        assert_eq!(traps, 9);
    }

    #[test]
    fn no_candidates_means_no_traps() {
        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let options = with_traps(&[], 100);
        let mut rng = StdRng::seed_from_u64(3);
        let items = create_filler(&factory, &options, 6, 50, &mut rng).unwrap();
        assert_eq!(items.len(), 50);
        assert!(items.iter().all(|i| !i.classification.is_trap()));
    }

    #[test]
    fn christmas_traps_only_in_december() {
        let options = with_traps(&[trap::COAL, trap::EGGNOG], 100);
        assert!(trap_candidates(&options, 11).is_empty());
        assert_eq!(trap_candidates(&options, DECEMBER).len(), 2);

        let catalog = ItemCatalog::new();
        let factory = CatalogItemFactory::new(&catalog, 1);
        let mut rng = StdRng::seed_from_u64(8);
        let items = create_filler(&factory, &options, 3, 20, &mut rng).unwrap();
        assert!(items.iter().all(|i| !i.classification.is_trap()));
    }

    #[test]
    fn empty_filler_set_still_has_silver_and_experience() {
        let options = LunacidOptions {
            filler: BTreeSet::new(),
            ..LunacidOptions::default()
        };
        assert_eq!(filler_candidates(&options), vec![coin::SILVER, custom::EXPERIENCE]);
    }
}
