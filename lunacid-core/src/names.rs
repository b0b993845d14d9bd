//! Names the generation logic refers to directly. Everything else lives only
//! in the data tables.

pub mod weapon {
    pub const LUCID_BLADE: &str = "Lucid Blade";
    pub const WAND_OF_POWER: &str = "Wand of Power";
    pub const LIMBO: &str = "Limbo";
    pub const CAVALRY_SABER: &str = "Cavalry Saber";
}

pub mod spell {
    pub const BLUE_FLAME_ARC: &str = "Blue Flame Arc";
    pub const MOON_BEAM: &str = "Moon Beam";
    pub const ICE_TEAR: &str = "Ice Tear";
    pub const LAVA_CHASM: &str = "Lava Chasm";
    pub const SPIRIT_WARP: &str = "Spirit Warp";
    pub const PUMPKIN_POP: &str = "Pumpkin Pop";
    pub const JINGLE_BELLS: &str = "Jingle Bells";

    /// Spells that open breakable walls; promoted when breakables are checks.
    pub const BREAKABLE_SPELLS: [&str; 4] = [BLUE_FLAME_ARC, MOON_BEAM, ICE_TEAR, LAVA_CHASM];
}

pub mod unique {
    pub const OIL_LANTERN: &str = "Oil Lantern";
    pub const VHS_TAPE: &str = "VHS Tape";
    pub const WHITE_TAPE: &str = "White VHS Tape";
    pub const DUSTY_CRYSTAL_ORB: &str = "Dusty Crystal Orb";
    pub const EARTH_TALISMAN: &str = "Earth Talisman";
    pub const WATER_TALISMAN: &str = "Water Talisman";
    pub const ENCHANTED_KEY: &str = "Enchanted Key";
    pub const CORRUPTED_KEY: &str = "Corrupted Key";
    pub const SKULL_OF_JOSIAH: &str = "Skull of Josiah";
    pub const VAMPIRIC_SYMBOL: &str = "Vampiric Symbol";

    /// Items the client tracks for the completion screen.
    pub const COMPLETION_IMPORTANT: [&str; 7] = [
        OIL_LANTERN,
        ENCHANTED_KEY,
        CORRUPTED_KEY,
        EARTH_TALISMAN,
        WATER_TALISMAN,
        WHITE_TAPE,
        DUSTY_CRYSTAL_ORB,
    ];
}

pub mod coin {
    pub const SILVER: &str = "Silver";
    pub const STRANGE_COIN: &str = "Strange Coin";
}

pub mod custom {
    pub const EXPERIENCE: &str = "Experience";
    pub const LUCKY_BANGLE: &str = "Lucky Bangle";
    pub const BESTIAL_MASTERY: &str = "Bestial Mastery";
    pub const DROP_RATE_UP: &str = "Drop Rate Up";
}

pub mod seasonal {
    pub const SOUL_CANDY: &str = "Soul Candy";
}

pub mod trap {
    pub const COAL: &str = "Coal";
    pub const EGGNOG: &str = "Eggnog";
}

pub mod location {
    pub const START_CRYSTAL: &str = "WR: Crystal Shard";
    pub const CLIVES_GIFT: &str = "WR: Clive's Gift";
}

pub mod event {
    pub const VICTORY: &str = "Victory";
    pub const WAKE_DREAMER: &str = "Wake the Dreamer";
    pub const OPEN_DOOR: &str = "Open the Door";
    pub const LOOK_INTO_ABYSS: &str = "Look into the Abyss";
    pub const DREAMER_OR_DOOR: &str = "The Dreamer or the Door";
    pub const HICKET_FREED: &str = "Sir Hicket's Freedom from Armor";
}
