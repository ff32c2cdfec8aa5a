//! Thing type numbers and the static Doom → Doom II lookup tables.

pub const THING_SHOTGUN: i16 = 2001;
pub const THING_SUPER_SHOTGUN: i16 = 82;
pub const THING_STIMPACK: i16 = 2011;
pub const THING_MEDIKIT: i16 = 2012;
pub const THING_HEALTH_BONUS: i16 = 2014;
pub const THING_BERSERK: i16 = 2023;
pub const THING_MEGASPHERE: i16 = 83;

pub const ENEMY_SHOTGUNNER: i16 = 9;
pub const ENEMY_IMP: i16 = 3001;
pub const ENEMY_DEMON: i16 = 3002;
pub const ENEMY_BARON: i16 = 3003;
pub const ENEMY_ZOMBIEMAN: i16 = 3004;
pub const ENEMY_CACODEMON: i16 = 3005;
pub const ENEMY_LOST_SOUL: i16 = 3006;

pub const ENEMY_ARCHVILE: i16 = 64;
pub const ENEMY_CHAINGUNNER: i16 = 65;
pub const ENEMY_REVENANT: i16 = 66;
pub const ENEMY_ARACHNOTRON: i16 = 68;
pub const ENEMY_HELL_KNIGHT: i16 = 69;
pub const ENEMY_PAIN_ELEMENTAL: i16 = 71;

/// Doom monsters that may be swapped for one of the Doom II extras.
pub const DOOM1_MONSTERS: &[i16] = &[
    ENEMY_SHOTGUNNER,
    ENEMY_IMP,
    ENEMY_DEMON,
    ENEMY_BARON,
    ENEMY_ZOMBIEMAN,
    ENEMY_CACODEMON,
    ENEMY_LOST_SOUL,
];

/// Doom textures missing from Doom II, with their closest stand-in.
pub const TEXTURE_REPLACEMENTS: &[(&str, &str)] = &[
    ("AASTINKY", "DOORSTOP"),
    ("ASHWALL", "ASHWALL2"),
    ("BLODGR1", "CEMENT9"),
    ("BLODGR2", "CEMENT9"),
    ("BLODGR3", "CEMENT9"),
    ("BLODGR4", "CEMENT9"),
    ("BRNBIGC", "MIDGRATE"),
    ("BRNBIGL", "MIDGRATE"),
    ("BRNBIGR", "MIDGRATE"),
    ("BRNPOIS2", "BROWN96"),
    ("BROVINE", "BROWN1"),
    ("BROWNWEL", "BROWNHUG"),
    ("CEMPOIS", "CEMENT1"),
    ("COMP2", "COMPTALL"),
    ("COMPOHSO", "COMPWERD"),
    ("COMPTILE", "COMPWERD"),
    ("COMPUTE1", "COMPSTA1"),
    ("COMPUTE2", "COMPTALL"),
    ("COMPUTE3", "COMPTALL"),
    ("DOORHI", "TEKBRON2"),
    ("GRAYDANG", "GRAY5"),
    ("ICKDOOR1", "DOOR1"),
    ("ICKWALL6", "ICKWALL5"),
    ("LITE2", "BROWN1"),
    ("LITE4", "LITE5"),
    ("LITE96", "BROWN96"),
    ("LITEBLU2", "LITEBLU1"),
    ("LITEBLU3", "LITEBLU1"),
    ("LITEMET", "METAL1"),
    ("LITERED", "DOORRED"),
    ("LITESTON", "STONE2"),
    ("MIDVINE1", "MIDGRATE"),
    ("MIDVINE2", "MIDGRATE"),
    ("NUKESLAD", "SLADWALL"),
    ("PLANET1", "COMPSTA2"),
    ("REDWALL1", "REDWALL"),
    ("SKINBORD", "SKINMET1"),
    ("SKINTEK1", "SKINMET2"),
    ("SKINTEK2", "SKSPINE1"),
    ("SKULWAL3", "SKSPINE1"),
    ("SKULWALL", "SKSPINE1"),
    ("SLADRIP1", "SLADWALL"),
    ("SLADRIP2", "SLADWALL"),
    ("SLADRIP3", "SLADWALL"),
    ("SP_DUDE3", "SP_DUDE4"),
    ("SP_DUDE6", "SP_DUDE4"),
    ("SP_ROCK2", "SP_ROCK1"),
    ("STARTAN1", "STARTAN2"),
    ("STONGARG", "STONE3"),
    ("STONPOIS", "STONE"),
    ("TEKWALL2", "TEKWALL4"),
    ("TEKWALL3", "TEKWALL4"),
    ("TEKWALL5", "TEKWALL4"),
    ("WOODSKUL", "WOODGARG"),
];

/// Textures that went from 64 to 128 pixels wide in Doom II.
pub const SHIFT_TEXTURES: &[&str] = &[
    "BRNPOIS", "NUKEPOIS", "SW1BRN1", "SW1STON2", "SW1STONE", "SW2BRN1", "SW2STON2", "SW2STONE",
];

/// Horizontal offset applied to sidedefs that use a widened texture.
pub const SHIFT_TEXTURE_OFFSET: i16 = 32;

/// Music, sky and demo lumps that Doom II looks up under another name.
pub const LUMP_REPLACEMENTS: &[(&str, &str)] = &[
    ("D_INTER", "D_DM2INT"),
    ("D_INTRO", "D_DM2TTL"),
    ("D_VICTOR", "D_READ_M"),
    ("SKY1", "RSKY1"),
    ("SKY2", "RSKY2"),
    ("SKY3", "RSKY3"),
    ("DEMO1", "DEMO1_D"),
    ("DEMO2", "DEMO2_D"),
    ("DEMO3", "DEMO3_D"),
];

pub fn replacement_texture(name: &str) -> Option<&'static str> {
    TEXTURE_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == name)
        .map(|&(_, to)| to)
}

pub fn is_shift_texture(name: &str) -> bool {
    SHIFT_TEXTURES.contains(&name)
}

pub fn replacement_lump_name(name: &str) -> Option<&'static str> {
    LUMP_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == name)
        .map(|&(_, to)| to)
}
