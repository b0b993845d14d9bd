use rand::Rng;
use std::collections::BTreeMap;

use crate::equipment::{
    vanilla_element, Element, Style, ALL_ELEMENTS, SPELLS, SPELL_ELEMENTS, WEAPONS,
};
use crate::options::LunacidOptions;

/// Element per weapon and spell name, fixed for one world.
pub type ElementMap = BTreeMap<&'static str, Element>;

pub fn vanilla_elements() -> ElementMap {
    WEAPONS
        .iter()
        .map(|info| (info.name, info.element))
        .chain(SPELLS.iter().map(|info| (info.name, info.element)))
        .collect()
}

/// Support spells deal no damage and `Ignore` items anchor the win
/// condition, so neither is ever rerolled.
pub fn is_excluded_from_randomization(name: &str) -> bool {
    if let Some(info) = SPELLS.iter().find(|info| info.name == name) {
        return info.style == Style::Support || info.element == Element::Ignore;
    }
    WEAPONS
        .iter()
        .any(|info| info.name == name && info.element == Element::Ignore)
}

/// Assign an element to every weapon and spell.
///
/// With `random_elements` off this is the vanilla table and draws nothing
/// from `rng`. Otherwise melee weapons roll from the full palette, ranged
/// weapons and spells from the spell palette, weapons first and then spells
/// in table order.
pub fn assign_elements<R: Rng + ?Sized>(options: &LunacidOptions, rng: &mut R) -> ElementMap {
    if !options.random_elements {
        return vanilla_elements();
    }

    let mut elements = ElementMap::new();

    for info in WEAPONS.iter().filter(|info| !is_excluded_from_randomization(info.name)) {
        let palette: &[Element] = if info.style == Style::Melee {
            &ALL_ELEMENTS
        } else {
            &SPELL_ELEMENTS
        };
        elements.insert(info.name, palette[rng.gen_range(0..palette.len())]);
    }

    for info in SPELLS.iter().filter(|info| !is_excluded_from_randomization(info.name)) {
        elements.insert(info.name, SPELL_ELEMENTS[rng.gen_range(0..SPELL_ELEMENTS.len())]);
    }

    let names = WEAPONS.iter().map(|info| info.name).chain(SPELLS.iter().map(|info| info.name));
    for name in names.filter(|name| is_excluded_from_randomization(name)) {
        if let Some(element) = vanilla_element(name) {
            elements.insert(name, element);
        }
    }

    elements
}

/// Element for `name`, falling back to the vanilla table.
pub fn element_of(elements: &ElementMap, name: &str) -> Element {
    elements
        .get(name)
        .copied()
        .or_else(|| vanilla_element(name))
        .unwrap_or(Element::Ignore)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::{spell, weapon};
    use rand::{rngs::StdRng, SeedableRng};

    fn randomized() -> LunacidOptions {
        LunacidOptions {
            random_elements: true,
            ..LunacidOptions::default()
        }
    }

    #[test]
    fn disabled_returns_vanilla_without_drawing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut untouched = StdRng::seed_from_u64(7);
        let elements = assign_elements(&LunacidOptions::default(), &mut rng);
        assert_eq!(elements, vanilla_elements());
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn covers_every_weapon_and_spell_once() {
        let mut rng = StdRng::seed_from_u64(11);
        let elements = assign_elements(&randomized(), &mut rng);
        assert_eq!(elements.len(), WEAPONS.len() + SPELLS.len());
    }

    #[test]
    fn excluded_items_keep_vanilla_elements() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let elements = assign_elements(&randomized(), &mut rng);
            for name in [weapon::LUCID_BLADE, weapon::WAND_OF_POWER, spell::SPIRIT_WARP, "Barrier", "Wind Dash"] {
                assert!(is_excluded_from_randomization(name), "{name}");
                assert_eq!(Some(elements[name]), vanilla_element(name), "{name}");
            }
        }
    }

    #[test]
    fn rolls_stay_inside_their_palettes() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let elements = assign_elements(&randomized(), &mut rng);
            for info in SPELLS.iter().filter(|i| !is_excluded_from_randomization(i.name)) {
                assert!(SPELL_ELEMENTS.contains(&elements[info.name]));
            }
            for info in WEAPONS.iter().filter(|i| i.style == Style::Ranged) {
                if !is_excluded_from_randomization(info.name) {
                    assert!(SPELL_ELEMENTS.contains(&elements[info.name]));
                }
            }
        }
    }

    #[test]
    fn same_seed_same_assignment() {
        let a = assign_elements(&randomized(), &mut StdRng::seed_from_u64(99));
        let b = assign_elements(&randomized(), &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
