use serde::{Deserialize, Serialize};
use std::fmt;

/// Boss actor classes that can trigger a level special on death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boss {
    Cyberdemon,
    SpiderMastermind,
    BaronOfHell,
    Fatso,
    Arachnotron,
}

impl Boss {
    /// Actor class name as the engine spells it.
    pub fn actor_class(self) -> &'static str {
        match self {
            Boss::Cyberdemon => "Cyberdemon",
            Boss::SpiderMastermind => "SpiderMastermind",
            Boss::BaronOfHell => "BaronOfHell",
            Boss::Fatso => "Fatso",
            Boss::Arachnotron => "Arachnotron",
        }
    }
}

impl fmt::Display for Boss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.actor_class())
    }
}

/// "When every `boss` is dead, run `special` on sectors tagged `tag`."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossAction {
    pub boss: Boss,
    pub special: i16,
    pub tag: i16,
}

impl fmt::Display for BossAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.boss, self.special, self.tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub name: String,
    pub label: String,
    pub next: String,
    pub next_secret: String,
    pub end_game: bool,
    pub boss_actions: Vec<BossAction>,
}

impl LevelInfo {
    /// Stock metadata for a commercial level slot.
    pub fn default_for(slot: &str) -> Option<Self> {
        DEFAULT_LEVEL_INFOS
            .iter()
            .find(|d| d.slot == slot)
            .map(|d| Self {
                name: d.name.to_string(),
                label: d.label.to_string(),
                next: d.next.to_string(),
                next_secret: d.next_secret.to_string(),
                end_game: d.end_game,
                boss_actions: d.boss_actions.to_vec(),
            })
    }

    /// Placeholder metadata for slots outside the stock games.
    pub fn synthesized(slot: &str) -> Self {
        Self {
            name: slot.to_string(),
            label: slot.to_string(),
            next: slot.to_string(),
            next_secret: slot.to_string(),
            end_game: false,
            boss_actions: Vec::new(),
        }
    }

    pub fn for_slot(slot: &str) -> Self {
        Self::default_for(slot).unwrap_or_else(|| Self::synthesized(slot))
    }
}

#[derive(Clone, Copy)]
struct DefaultLevelInfo {
    slot: &'static str,
    name: &'static str,
    label: &'static str,
    next: &'static str,
    next_secret: &'static str,
    end_game: bool,
    boss_actions: &'static [BossAction],
}

const fn level(
    slot: &'static str,
    name: &'static str,
    label: &'static str,
    next: &'static str,
    next_secret: &'static str,
) -> DefaultLevelInfo {
    DefaultLevelInfo {
        slot,
        name,
        label,
        next,
        next_secret,
        end_game: false,
        boss_actions: &[],
    }
}

const fn special_level(
    base: DefaultLevelInfo,
    end_game: bool,
    boss_actions: &'static [BossAction],
) -> DefaultLevelInfo {
    DefaultLevelInfo {
        end_game,
        boss_actions,
        ..base
    }
}

// Specials: 11 = S1 exit level, 23 = S1 floor lower to lowest,
// 30 = W1 floor raise by shortest lower texture, 112 = S1 door open stay (fast).
const DEFAULT_LEVEL_INFOS: &[DefaultLevelInfo] = &[
    level("E1M1", "Hangar", "E1M1", "E1M2", "E1M1"),
    level("E1M2", "Nuclear Plant", "E1M2", "E1M3", "E1M2"),
    level("E1M3", "Toxin Refinery", "E1M3", "E1M4", "E1M9"),
    level("E1M4", "Command Control", "E1M4", "E1M5", "E1M4"),
    level("E1M5", "Phobos Lab", "E1M5", "E1M6", "E1M5"),
    level("E1M6", "Central Processing", "E1M6", "E1M7", "E1M6"),
    level("E1M7", "Computer Station", "E1M7", "E1M8", "E1M7"),
    special_level(
        level("E1M8", "Phobos Anomaly", "E1M8", "E1M9", "E1M8"),
        true,
        &[BossAction { boss: Boss::BaronOfHell, special: 23, tag: 666 }],
    ),
    level("E1M9", "Military Base", "E1M9", "E1M4", "E1M9"),
    level("E2M1", "Deimos Anomaly", "E2M1", "E2M2", "E2M1"),
    level("E2M2", "Containment Area", "E2M2", "E2M3", "E2M2"),
    level("E2M3", "Refinery", "E2M3", "E2M4", "E2M3"),
    level("E2M4", "Deimos Lab", "E2M4", "E2M5", "E2M4"),
    level("E2M5", "Command Center", "E2M5", "E2M6", "E2M9"),
    level("E2M6", "Halls of the Damned", "E2M6", "E2M7", "E2M6"),
    level("E2M7", "Spawning Vats", "E2M7", "E2M8", "E2M7"),
    special_level(
        level("E2M8", "Tower of Babel", "E2M8", "E2M9", "E2M8"),
        true,
        &[BossAction { boss: Boss::Cyberdemon, special: 11, tag: 0 }],
    ),
    level("E2M9", "Fortress of Mystery", "E2M9", "E2M6", "E2M9"),
    level("E3M1", "Hell Keep", "E3M1", "E3M2", "E3M1"),
    level("E3M2", "Slough of Despair", "E3M2", "E3M3", "E3M2"),
    level("E3M3", "Pandemonium", "E3M3", "E3M4", "E3M3"),
    level("E3M4", "House of Pain", "E3M4", "E3M5", "E3M4"),
    level("E3M5", "Unholy Cathedral", "E3M5", "E3M6", "E3M5"),
    level("E3M6", "Mt. Erebus", "E3M6", "E3M9", "E3M6"),
    level("E3M7", "Limbo", "E3M7", "E3M8", "E3M7"),
    special_level(
        level("E3M8", "Dis", "E3M8", "E3M9", "E3M8"),
        true,
        &[BossAction { boss: Boss::SpiderMastermind, special: 11, tag: 0 }],
    ),
    level("E3M9", "Warrens", "E3M9", "E3M7", "E3M9"),
    level("E4M1", "Hell Beneath", "E4M1", "E4M2", "E4M1"),
    level("E4M2", "Perfect Hatred", "E4M2", "E4M9", "E4M2"),
    level("E4M3", "Sever the Wicked", "E4M3", "E4M4", "E4M3"),
    level("E4M4", "Unruly Evil", "E4M4", "E4M5", "E4M4"),
    level("E4M5", "They Will Repent", "E4M5", "E4M6", "E4M5"),
    special_level(
        level("E4M6", "Against Thee Wickedly", "E4M6", "E4M7", "E4M6"),
        false,
        &[BossAction { boss: Boss::Cyberdemon, special: 112, tag: 666 }],
    ),
    level("E4M7", "And Hell Followed", "E4M7", "E4M8", "E4M7"),
    special_level(
        level("E4M8", "Unto the Cruel", "E4M8", "E4M9", "E4M8"),
        true,
        &[BossAction { boss: Boss::SpiderMastermind, special: 23, tag: 666 }],
    ),
    level("E4M9", "Fear", "E4M9", "E4M3", "E4M9"),
    level("MAP01", "Entryway", "Level 1", "MAP02", "MAP01"),
    level("MAP02", "Underhalls", "Level 2", "MAP03", "MAP02"),
    level("MAP03", "The Gantlet", "Level 3", "MAP04", "MAP03"),
    level("MAP04", "The Focus", "Level 4", "MAP05", "MAP04"),
    level("MAP05", "The Waste Tunnels", "Level 5", "MAP06", "MAP05"),
    level("MAP06", "The Crusher", "Level 6", "MAP07", "MAP06"),
    // The arachnotron action is unreliable in PrBoom-derived ports.
    special_level(
        level("MAP07", "Dead Simple", "Level 7", "MAP08", "MAP07"),
        false,
        &[
            BossAction { boss: Boss::Fatso, special: 23, tag: 666 },
            BossAction { boss: Boss::Arachnotron, special: 30, tag: 667 },
        ],
    ),
    level("MAP08", "Tricks and Traps", "Level 8", "MAP09", "MAP08"),
    level("MAP09", "The Pit", "Level 9", "MAP10", "MAP09"),
    level("MAP10", "Refueling Base", "Level 10", "MAP11", "MAP10"),
    level("MAP11", "'O' of Destruction!", "Level 11", "MAP12", "MAP11"),
    level("MAP12", "The Factory", "Level 12", "MAP13", "MAP12"),
    level("MAP13", "Downtown", "Level 13", "MAP14", "MAP13"),
    level("MAP14", "The Inmost Dens", "Level 14", "MAP15", "MAP14"),
    level("MAP15", "Industrial Zone", "Level 15", "MAP16", "MAP31"),
    level("MAP16", "Suburbs", "Level 16", "MAP17", "MAP16"),
    level("MAP17", "Tenements", "Level 17", "MAP18", "MAP17"),
    level("MAP18", "The Courtyard", "Level 18", "MAP19", "MAP18"),
    level("MAP19", "The Citadel", "Level 19", "MAP20", "MAP19"),
    level("MAP20", "Gotcha!", "Level 20", "MAP21", "MAP20"),
    level("MAP21", "Nirvana", "Level 21", "MAP22", "MAP21"),
    level("MAP22", "The Catacombs", "Level 22", "MAP23", "MAP22"),
    level("MAP23", "Barrels o' Fun", "Level 23", "MAP24", "MAP23"),
    level("MAP24", "The Chasm", "Level 24", "MAP25", "MAP24"),
    level("MAP25", "Bloodfalls", "Level 25", "MAP26", "MAP25"),
    level("MAP26", "The Abandoned Mines", "Level 26", "MAP27", "MAP26"),
    level("MAP27", "Monster Condo", "Level 27", "MAP28", "MAP27"),
    level("MAP28", "The Spirit World", "Level 28", "MAP29", "MAP28"),
    level("MAP29", "The Living End", "Level 29", "MAP30", "MAP29"),
    special_level(
        level("MAP30", "Icon of Sin", "Level 30", "MAP31", "MAP30"),
        true,
        &[],
    ),
    level("MAP31", "Wolfenstein", "Level 31", "MAP16", "MAP32"),
    level("MAP32", "Grosse", "Level 32", "MAP16", "MAP32"),
];
