//! Per-player option bundle.
//!
//! Options arrive as a JSON object. Every field has a default; choices accept
//! either their key (`"ending_b"`) or their numeric value, toggles accept
//! booleans or `0`/`1`. Ranges, sets and dictionaries are validated while
//! deserializing so that generation never sees an out-of-range value.
//! Serializing a bundle produces the numeric echo sent to the client.

use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::items::{all_filler_items, CHRISTMAS_TRAPS, TRAPS};
use crate::names::coin;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("option '{option}' value {value} is outside {start}..={end}")]
    OutOfRange {
        option: &'static str,
        value: i64,
        start: i64,
        end: i64,
    },

    #[error("option '{option}' has no choice '{value}'")]
    UnknownChoice { option: &'static str, value: String },

    #[error("option '{option}' does not accept '{key}'")]
    UnknownSetKey { option: &'static str, key: String },

    #[error("option '{option}' has no key '{key}'")]
    UnknownDictKey { option: &'static str, key: String },

    #[error("option '{option}' expected {expected}")]
    WrongType {
        option: &'static str,
        expected: &'static str,
    },

    #[error("{0}")]
    Invalid(String),
}

/// A single-choice option whose numeric values are the variant positions.
pub trait Choice: Copy + Eq + Default + 'static {
    const OPTION: &'static str;
    const VARIANTS: &'static [(&'static str, Self)];

    fn key(self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(_, variant)| *variant == self)
            .map(|(key, _)| *key)
            .unwrap_or("")
    }

    fn value(self) -> u8 {
        Self::VARIANTS
            .iter()
            .position(|(_, variant)| *variant == self)
            .unwrap_or(0) as u8
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, variant)| *variant)
    }

    fn from_value(value: u64) -> Option<Self> {
        let idx = usize::try_from(value).ok()?;
        Self::VARIANTS.get(idx).map(|(_, variant)| *variant)
    }
}

/// `#[serde(with = "choice")]`: key or number in, number out.
mod choice {
    use super::*;

    pub fn serialize<T: Choice, S: Serializer>(variant: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(variant.value())
    }

    pub fn deserialize<'de, T: Choice, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let parsed = match &value {
            Value::String(key) => T::from_key(key),
            Value::Number(n) => n.as_u64().and_then(T::from_value),
            _ => {
                return Err(de::Error::custom(OptionError::WrongType {
                    option: T::OPTION,
                    expected: "a choice name or number",
                }))
            }
        };
        parsed.ok_or_else(|| {
            de::Error::custom(OptionError::UnknownChoice {
                option: T::OPTION,
                value: value.to_string(),
            })
        })
    }
}

/// `#[serde(with = "toggle")]`: booleans, `0`/`1` or `"true"`/`"false"` in,
/// `0`/`1` out.
mod toggle {
    use super::*;

    pub fn serialize<S: Serializer>(on: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*on))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(on) => Ok(on),
            Value::Number(n) if n.as_u64() == Some(0) => Ok(false),
            Value::Number(n) if n.as_u64() == Some(1) => Ok(true),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            other => Err(de::Error::custom(format!("expected a boolean or 0/1, found {other}"))),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Ending {
    AnyEnding,
    #[default]
    EndingA,
    EndingB,
    EndingCd,
    EndingE,
}

impl Ending {
    /// Endings that are reached by collecting strange coins.
    pub fn uses_strange_coins(self) -> bool {
        matches!(self, Ending::EndingB | Ending::AnyEnding)
    }
}

impl Choice for Ending {
    const OPTION: &'static str = "ending";
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("any_ending", Ending::AnyEnding),
        ("ending_a", Ending::EndingA),
        ("ending_b", Ending::EndingB),
        ("ending_cd", Ending::EndingCd),
        ("ending_e", Ending::EndingE),
    ];
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum StartingClass {
    #[default]
    Thief,
    Knight,
    Witch,
    Vampire,
    Undead,
    Royal,
    Cleric,
    Shinobi,
    Forsaken,
    Custom,
}

impl Choice for StartingClass {
    const OPTION: &'static str = "starting_class";
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("thief", StartingClass::Thief),
        ("knight", StartingClass::Knight),
        ("witch", StartingClass::Witch),
        ("vampire", StartingClass::Vampire),
        ("undead", StartingClass::Undead),
        ("royal", StartingClass::Royal),
        ("cleric", StartingClass::Cleric),
        ("shinobi", StartingClass::Shinobi),
        ("forsaken", StartingClass::Forsaken),
        ("custom", StartingClass::Custom),
    ];
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum StartingArea {
    #[default]
    Basin,
    Mire,
    Forest,
    Archives,
    Tomb,
    Castle,
    Grotto,
    Prison,
    Arena,
    Ash,
}

impl Choice for StartingArea {
    const OPTION: &'static str = "starting_area";
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("basin", StartingArea::Basin),
        ("mire", StartingArea::Mire),
        ("forest", StartingArea::Forest),
        ("archives", StartingArea::Archives),
        ("tomb", StartingArea::Tomb),
        ("castle", StartingArea::Castle),
        ("grotto", StartingArea::Grotto),
        ("prison", StartingArea::Prison),
        ("arena", StartingArea::Arena),
        ("ash", StartingArea::Ash),
    ];
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Dropsanity {
    #[default]
    Off,
    Uniques,
    Randomized,
}

impl Dropsanity {
    pub fn is_on(self) -> bool {
        self != Dropsanity::Off
    }
}

impl Choice for Dropsanity {
    const OPTION: &'static str = "dropsanity";
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("off", Dropsanity::Off),
        ("uniques", Dropsanity::Uniques),
        ("randomized", Dropsanity::Randomized),
    ];
}

/// Bounded integer option; construction rejects values outside
/// `START..=END`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Range<const START: u32, const END: u32, const DEFAULT: u32>(u32);

impl<const START: u32, const END: u32, const DEFAULT: u32> Range<START, END, DEFAULT> {
    fn contains(value: i64) -> bool {
        (i64::from(START)..=i64::from(END)).contains(&value)
    }

    pub fn new(option: &'static str, value: i64) -> Result<Self, OptionError> {
        if !Self::contains(value) {
            return Err(OptionError::OutOfRange {
                option,
                value,
                start: i64::from(START),
                end: i64::from(END),
            });
        }
        Ok(Self(value as u32))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl<const START: u32, const END: u32, const DEFAULT: u32> Default for Range<START, END, DEFAULT> {
    fn default() -> Self {
        Self(DEFAULT)
    }
}

impl<const START: u32, const END: u32, const DEFAULT: u32> Serialize for Range<START, END, DEFAULT> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de, const START: u32, const END: u32, const DEFAULT: u32> Deserialize<'de>
    for Range<START, END, DEFAULT>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        if !Self::contains(value) {
            let expected = format!("an integer in {START}..={END}");
            return Err(de::Error::invalid_value(
                Unexpected::Signed(value),
                &expected.as_str(),
            ));
        }
        Ok(Self(value as u32))
    }
}

pub type ExperiencePercent = Range<25, 400, 100>;
pub type StrangeCoinCount = Range<1, 60, 30>;
pub type TrapPercent = Range<0, 100, 20>;

pub const COLOR_KEYS: [(&str, &str); 6] = [
    ("Progression", "#AF99EF"),
    ("Useful", "#6D8BE8"),
    ("Trap", "#FA8072"),
    ("Filler", "#00EEEE"),
    ("Gift", "#9DAE11"),
    ("Cheat", "#FF0000"),
];

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ItemColors(BTreeMap<String, String>);

impl ItemColors {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// Replace missing or malformed colours with their defaults. Returns the
    /// keys that were repaired.
    pub fn verify(&mut self) -> Vec<&'static str> {
        let mut repaired = Vec::new();
        for (key, default) in COLOR_KEYS {
            let valid = self.0.get(key).is_some_and(|color| is_hex(color));
            if !valid {
                self.0.insert(key.to_string(), default.to_string());
                repaired.push(key);
            }
        }
        repaired
    }
}

impl Default for ItemColors {
    fn default() -> Self {
        Self(
            COLOR_KEYS
                .iter()
                .map(|(key, color)| (key.to_string(), color.to_string()))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for ItemColors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut colors = BTreeMap::new();
        for (key, color) in entries {
            if !COLOR_KEYS.iter().any(|(valid, _)| *valid == key) {
                return Err(de::Error::custom(OptionError::UnknownDictKey {
                    option: "item_colors",
                    key,
                }));
            }
            // Non-string colours are repaired later along with malformed ones.
            if let Value::String(color) = color {
                colors.insert(key, color);
            }
        }
        Ok(Self(colors))
    }
}

pub fn is_hex(candidate: &str) -> bool {
    let pure = candidate.replace('#', "");
    pure.len() == 6 && pure.chars().all(|c| c.is_ascii_hexdigit())
}

pub const RANDOM: &str = "RANDOM";

/// Stat name with its inclusive minimum and exclusive random upper bound.
pub const CUSTOM_CLASS_STATS: [(&str, i64, i64); 13] = [
    ("Level", 1, 10),
    ("Strength", 1, 20),
    ("Speed", 1, 20),
    ("Intelligence", 1, 20),
    ("Defense", 1, 20),
    ("Dexterity", 1, 20),
    ("Resistance", 1, 20),
    ("Normal Res", 0, 20),
    ("Fire Res", 0, 300),
    ("Ice Res", 0, 300),
    ("Poison Res", 0, 300),
    ("Light Res", 0, 300),
    ("Dark Res", 0, 300),
];

/// Raw custom class request. `-1` (or a missing stat) asks for a random roll.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Value>")]
pub struct CustomClassOption {
    pub name: String,
    pub description: String,
    pub stats: BTreeMap<String, i64>,
}

impl CustomClassOption {
    pub fn stat(&self, stat: &str) -> i64 {
        self.stats.get(stat).copied().unwrap_or(-1)
    }
}

impl Default for CustomClassOption {
    fn default() -> Self {
        Self {
            name: RANDOM.to_string(),
            description: RANDOM.to_string(),
            stats: CUSTOM_CLASS_STATS
                .iter()
                .map(|(stat, _, _)| (stat.to_string(), -1))
                .collect(),
        }
    }
}

impl TryFrom<BTreeMap<String, Value>> for CustomClassOption {
    type Error = OptionError;

    fn try_from(entries: BTreeMap<String, Value>) -> Result<Self, Self::Error> {
        const OPTION: &str = "custom_class";
        let mut custom = CustomClassOption::default();
        for (key, entry) in entries {
            match key.as_str() {
                "Name" | "Description" => {
                    let Value::String(text) = entry else {
                        return Err(OptionError::WrongType {
                            option: OPTION,
                            expected: "text for Name and Description",
                        });
                    };
                    if key == "Name" {
                        custom.name = text;
                    } else {
                        custom.description = text;
                    }
                }
                stat if CUSTOM_CLASS_STATS.iter().any(|(name, _, _)| *name == stat) => {
                    let n = entry.as_i64().ok_or(OptionError::WrongType {
                        option: OPTION,
                        expected: "integer stats",
                    })?;
                    custom.stats.insert(key, n);
                }
                _ => return Err(OptionError::UnknownDictKey { option: OPTION, key }),
            }
        }
        Ok(custom)
    }
}

pub fn filler_valid_keys() -> BTreeSet<String> {
    all_filler_items()
        .filter(|name| *name != coin::SILVER)
        .map(str::to_string)
        .collect()
}

pub fn trap_valid_keys() -> BTreeSet<String> {
    TRAPS
        .iter()
        .chain(CHRISTMAS_TRAPS.iter())
        .map(|name| name.to_string())
        .collect()
}

fn validated_set<'de, D: Deserializer<'de>>(
    deserializer: D,
    option: &'static str,
    valid: &BTreeSet<String>,
) -> Result<BTreeSet<String>, D::Error> {
    let entries = BTreeSet::<String>::deserialize(deserializer)?;
    if let Some(key) = entries.iter().find(|key| !valid.contains(*key)) {
        return Err(de::Error::custom(OptionError::UnknownSetKey {
            option,
            key: key.clone(),
        }));
    }
    Ok(entries)
}

fn filler_set<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<String>, D::Error> {
    validated_set(deserializer, "filler", &filler_valid_keys())
}

fn trap_set<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<String>, D::Error> {
    validated_set(deserializer, "traps", &trap_valid_keys())
}

/// Fields the client does not need are skipped when serializing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LunacidOptions {
    #[serde(with = "choice")]
    pub ending: Ending,
    #[serde(with = "choice")]
    pub starting_class: StartingClass,
    #[serde(with = "choice")]
    pub starting_area: StartingArea,
    #[serde(with = "toggle")]
    pub entrance_randomization: bool,
    pub experience: ExperiencePercent,
    pub weapon_experience: ExperiencePercent,
    #[serde(with = "toggle")]
    pub random_elements: bool,
    #[serde(with = "toggle")]
    pub enemy_randomization: bool,
    pub required_strange_coin: StrangeCoinCount,
    #[serde(skip_serializing)]
    pub total_strange_coin: StrangeCoinCount,
    #[serde(with = "toggle")]
    pub shopsanity: bool,
    #[serde(with = "choice")]
    pub dropsanity: Dropsanity,
    #[serde(with = "toggle")]
    pub quenchsanity: bool,
    #[serde(with = "toggle")]
    pub etnas_pupil: bool,
    #[serde(with = "toggle")]
    pub bookworm: bool,
    #[serde(with = "toggle")]
    pub levelsanity: bool,
    #[serde(with = "toggle")]
    pub grasssanity: bool,
    #[serde(with = "toggle")]
    pub breakables: bool,
    #[serde(with = "toggle")]
    pub normalized_drops: bool,
    #[serde(with = "toggle")]
    pub secret_door_lock: bool,
    #[serde(with = "toggle")]
    pub switch_locks: bool,
    #[serde(with = "toggle")]
    pub door_locks: bool,
    #[serde(deserialize_with = "filler_set", skip_serializing)]
    pub filler: BTreeSet<String>,
    #[serde(deserialize_with = "trap_set", skip_serializing)]
    pub traps: BTreeSet<String>,
    #[serde(skip_serializing)]
    pub trap_percent: TrapPercent,
    #[serde(with = "toggle")]
    pub custom_music: bool,
    pub item_colors: ItemColors,
    #[serde(skip_serializing)]
    pub custom_class: CustomClassOption,
    #[serde(with = "toggle")]
    pub death_link: bool,
}

impl Default for LunacidOptions {
    fn default() -> Self {
        Self {
            ending: Ending::default(),
            starting_class: StartingClass::default(),
            starting_area: StartingArea::default(),
            entrance_randomization: false,
            experience: ExperiencePercent::default(),
            weapon_experience: ExperiencePercent::default(),
            random_elements: false,
            enemy_randomization: false,
            required_strange_coin: StrangeCoinCount::default(),
            total_strange_coin: StrangeCoinCount::default(),
            shopsanity: false,
            dropsanity: Dropsanity::default(),
            quenchsanity: false,
            etnas_pupil: false,
            bookworm: false,
            levelsanity: false,
            grasssanity: false,
            breakables: false,
            normalized_drops: false,
            secret_door_lock: false,
            switch_locks: false,
            door_locks: false,
            filler: filler_valid_keys(),
            traps: TRAPS.iter().map(|name| name.to_string()).collect(),
            trap_percent: TrapPercent::default(),
            custom_music: false,
            item_colors: ItemColors::default(),
            custom_class: CustomClassOption::default(),
            death_link: false,
        }
    }
}

const KNOWN_KEYS: &[&str] = &[
    "ending",
    "starting_class",
    "starting_area",
    "entrance_randomization",
    "experience",
    "weapon_experience",
    "random_elements",
    "enemy_randomization",
    "required_strange_coin",
    "total_strange_coin",
    "shopsanity",
    "dropsanity",
    "quenchsanity",
    "etnas_pupil",
    "bookworm",
    "levelsanity",
    "grasssanity",
    "breakables",
    "normalized_drops",
    "secret_door_lock",
    "switch_locks",
    "door_locks",
    "filler",
    "traps",
    "trap_percent",
    "custom_music",
    "item_colors",
    "custom_class",
    "death_link",
];

impl LunacidOptions {
    pub fn from_json_str(src: &str) -> crate::Result<Self> {
        let value: Value = serde_json::from_str(src)?;
        Ok(Self::from_value(&value)?)
    }

    pub fn from_value(value: &Value) -> Result<Self, OptionError> {
        if let Some(map) = value.as_object() {
            for key in map.keys() {
                if !KNOWN_KEYS.contains(&key.as_str()) {
                    log::warn!("ignoring unknown option '{key}'");
                }
            }
        }
        Self::deserialize(value).map_err(|err| OptionError::Invalid(err.to_string()))
    }

    /// The one mutation generation performs on options: repair item colours.
    pub fn verify_item_colors(&mut self) {
        for key in self.item_colors.verify() {
            log::info!("item colour '{key}' was missing or not hex; using the default");
        }
    }

    /// Options echoed to the client, in the host's numeric form.
    pub fn echo(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
