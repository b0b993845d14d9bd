use serde::{Deserialize, Serialize};
use std::fmt;

use crate::items::ItemClassification;
use crate::names::{spell, weapon};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Element {
    Normal,
    Fire,
    Ice,
    Poison,
    Light,
    Dark,
    #[serde(rename = "Dark and Light")]
    DarkAndLight,
    #[serde(rename = "Dark and Fire")]
    DarkAndFire,
    #[serde(rename = "Ice and Poison")]
    IceAndPoison,
    #[serde(rename = "Normal and Fire")]
    NormalAndFire,
    /// Sentinel for items whose element is never rerolled.
    Ignore,
}

impl Element {
    pub fn as_str(self) -> &'static str {
        match self {
            Element::Normal => "Normal",
            Element::Fire => "Fire",
            Element::Ice => "Ice",
            Element::Poison => "Poison",
            Element::Light => "Light",
            Element::Dark => "Dark",
            Element::DarkAndLight => "Dark and Light",
            Element::DarkAndFire => "Dark and Fire",
            Element::IceAndPoison => "Ice and Poison",
            Element::NormalAndFire => "Normal and Fire",
            Element::Ignore => "Ignore",
        }
    }

    /// Elements logic treats as able to bypass a resistance gate.
    pub fn is_pivotal(self) -> bool {
        matches!(
            self,
            Element::Light
                | Element::Fire
                | Element::DarkAndFire
                | Element::NormalAndFire
                | Element::DarkAndLight
        )
    }

    pub fn is_poisonous(self) -> bool {
        matches!(self, Element::Poison | Element::IceAndPoison)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Palette for melee weapons.
pub const ALL_ELEMENTS: [Element; 10] = [
    Element::Normal,
    Element::Fire,
    Element::Ice,
    Element::Poison,
    Element::Light,
    Element::Dark,
    Element::DarkAndLight,
    Element::DarkAndFire,
    Element::IceAndPoison,
    Element::NormalAndFire,
];

/// Palette for ranged weapons and every spell.
pub const SPELL_ELEMENTS: [Element; 6] = [
    Element::Normal,
    Element::Fire,
    Element::Ice,
    Element::Poison,
    Element::Light,
    Element::Dark,
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Style {
    Melee,
    Ranged,
    Support,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WeaponSource {
    Base,
    Shop,
    Drop,
    Quench,
    Alchemy,
    Halloween,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SpellSource {
    Base,
    Drop,
    Halloween,
    Christmas,
}

#[derive(Copy, Clone, Debug)]
pub struct WeaponInfo {
    pub name: &'static str,
    pub element: Element,
    pub style: Style,
    pub classification: ItemClassification,
    pub source: WeaponSource,
}

#[derive(Copy, Clone, Debug)]
pub struct SpellInfo {
    pub name: &'static str,
    pub element: Element,
    pub style: Style,
    pub classification: ItemClassification,
    pub source: SpellSource,
}

const fn w(
    name: &'static str,
    element: Element,
    style: Style,
    classification: ItemClassification,
    source: WeaponSource,
) -> WeaponInfo {
    WeaponInfo {
        name,
        element,
        style,
        classification,
        source,
    }
}

const fn s(
    name: &'static str,
    element: Element,
    style: Style,
    classification: ItemClassification,
    source: SpellSource,
) -> SpellInfo {
    SpellInfo {
        name,
        element,
        style,
        classification,
        source,
    }
}

use Element::*;
use ItemClassification as C;
use Style::*;

// Item codes are positional over this table; append only.
pub const WEAPONS: &[WeaponInfo] = &[
    w("Axe of Harming", Normal, Melee, C::USEFUL, WeaponSource::Base),
    w("Battle Axe", Normal, Melee, C::USEFUL, WeaponSource::Base),
    w("Blade of Jusztina", Dark, Melee, C::USEFUL, WeaponSource::Base),
    w("Dark Rapier", Dark, Melee, C::USEFUL, WeaponSource::Base),
    w("Elfen Bow", Normal, Ranged, C::USEFUL, WeaponSource::Base),
    w("Elfen Longsword", Normal, Melee, C::USEFUL, WeaponSource::Base),
    w("Fishing Spear", Normal, Melee, C::FILLER, WeaponSource::Base),
    w("Iron Claw", Normal, Melee, C::USEFUL, WeaponSource::Base),
    w("Iron Torch", NormalAndFire, Melee, C::USEFUL, WeaponSource::Base),
    w(weapon::LUCID_BLADE, Ignore, Melee, C::PROGRESSION, WeaponSource::Base),
    w("Moonlight", Light, Ranged, C::USEFUL, WeaponSource::Base),
    w("Obsidian Poisonguard", Poison, Melee, C::USEFUL, WeaponSource::Base),
    w("Privateer Musket", Normal, Ranged, C::USEFUL, WeaponSource::Base),
    w("Ritual Dagger", Normal, Melee, C::FILLER, WeaponSource::Base),
    w("Serpent Fang", Poison, Melee, C::USEFUL, WeaponSource::Base),
    w("Steel Spear", Normal, Melee, C::USEFUL, WeaponSource::Base),
    w("Torch", Fire, Melee, C::FILLER, WeaponSource::Base),
    w(weapon::WAND_OF_POWER, Ignore, Ranged, C::USEFUL, WeaponSource::Base),
    w("Crossbow", Normal, Ranged, C::USEFUL, WeaponSource::Shop),
    w("Rapier", Normal, Melee, C::USEFUL, WeaponSource::Shop),
    w("Steel Lance", Normal, Melee, C::USEFUL, WeaponSource::Shop),
    w("Halberd", Normal, Melee, C::USEFUL, WeaponSource::Drop),
    w("Jotunn Slayer", Normal, Melee, C::USEFUL, WeaponSource::Drop),
    w("Obsidian Cursebrand", Dark, Melee, C::USEFUL, WeaponSource::Drop),
    w("Skeleton Axe", Normal, Melee, C::FILLER, WeaponSource::Drop),
    w("Sucsarian Spear", Normal, Melee, C::USEFUL, WeaponSource::Drop),
    w("Ice Sickle", Ice, Melee, C::USEFUL, WeaponSource::Drop),
    w("Brittle Arming Sword", Normal, Melee, C::USEFUL, WeaponSource::Quench),
    w("Death Scythe", Dark, Melee, C::USEFUL, WeaponSource::Quench),
    w("Golden Khopesh", Normal, Melee, C::USEFUL, WeaponSource::Quench),
    w("Marauder Black Flail", Normal, Melee, C::USEFUL, WeaponSource::Quench),
    w(weapon::LIMBO, Dark, Melee, C::PROGRESSION, WeaponSource::Alchemy),
    w(weapon::CAVALRY_SABER, Normal, Melee, C::USEFUL, WeaponSource::Halloween),
];

pub const SPELLS: &[SpellInfo] = &[
    s("Barrier", Normal, Support, C::USEFUL, SpellSource::Base),
    s("Blood Drain", Dark, Ranged, C::USEFUL, SpellSource::Base),
    s(spell::BLUE_FLAME_ARC, Fire, Ranged, C::USEFUL, SpellSource::Base),
    s("Ghost Light", Light, Support, C::PROGRESSION, SpellSource::Base),
    s(spell::ICE_TEAR, Ice, Ranged, C::USEFUL, SpellSource::Base),
    s(spell::LAVA_CHASM, Fire, Ranged, C::USEFUL, SpellSource::Base),
    s("Lightning", Light, Ranged, C::USEFUL, SpellSource::Base),
    s(spell::MOON_BEAM, Light, Ranged, C::USEFUL, SpellSource::Base),
    s("Poison Mist", Poison, Ranged, C::USEFUL, SpellSource::Base),
    s("Rock Bridge", Normal, Support, C::PROGRESSION, SpellSource::Base),
    s(spell::SPIRIT_WARP, Ignore, Support, C::USEFUL, SpellSource::Base),
    s("Wind Dash", Normal, Support, C::PROGRESSION, SpellSource::Base),
    s("Dark Skull", Dark, Ranged, C::USEFUL, SpellSource::Drop),
    s("Slime Orb", Poison, Ranged, C::USEFUL, SpellSource::Drop),
    s("Summon Snail", Normal, Support, C::FILLER, SpellSource::Drop),
    s(spell::PUMPKIN_POP, Dark, Ranged, C::USEFUL, SpellSource::Halloween),
    s(spell::JINGLE_BELLS, Ice, Ranged, C::USEFUL, SpellSource::Christmas),
];

/// Base weapons that yield a quench check, paired with what they become.
pub const QUENCHABLE_WEAPONS: &[(&str, &str)] = &[
    ("Ritual Dagger", "Brittle Arming Sword"),
    ("Battle Axe", "Death Scythe"),
    ("Steel Spear", "Golden Khopesh"),
    ("Iron Claw", "Marauder Black Flail"),
];

pub const STARTING_WEAPONS: &[&str] = &[
    "Axe of Harming",
    "Battle Axe",
    "Dark Rapier",
    "Elfen Bow",
    "Iron Claw",
    "Privateer Musket",
    "Ritual Dagger",
    "Steel Spear",
    "Torch",
];

pub const SHOP_STARTING_WEAPONS: &[&str] = &["Rapier", "Crossbow"];

pub const DROP_STARTING_WEAPONS: &[&str] = &["Halberd", "Skeleton Axe"];

pub const QUENCH_STARTING_WEAPONS: &[&str] = &["Brittle Arming Sword", "Golden Khopesh"];

pub fn weapons_from(source: WeaponSource) -> impl Iterator<Item = &'static WeaponInfo> {
    WEAPONS.iter().filter(move |info| info.source == source)
}

pub fn spells_from(source: SpellSource) -> impl Iterator<Item = &'static SpellInfo> {
    SPELLS.iter().filter(move |info| info.source == source)
}

pub fn weapon_info(name: &str) -> Option<&'static WeaponInfo> {
    WEAPONS.iter().find(|info| info.name == name)
}

pub fn spell_info(name: &str) -> Option<&'static SpellInfo> {
    SPELLS.iter().find(|info| info.name == name)
}

pub fn is_ranged_weapon(name: &str) -> bool {
    weapon_info(name).is_some_and(|info| info.style == Ranged)
}

pub fn is_ranged_spell(name: &str) -> bool {
    spell_info(name).is_some_and(|info| info.style == Ranged)
}

pub fn is_quenchable(name: &str) -> bool {
    QUENCHABLE_WEAPONS.iter().any(|(source, _)| *source == name)
}

pub fn vanilla_element(name: &str) -> Option<Element> {
    weapon_info(name)
        .map(|info| info.element)
        .or_else(|| spell_info(name).map(|info| info.element))
}
