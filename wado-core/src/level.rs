use log::warn;
use serde::{Deserialize, Serialize};
use std::io::{Read, Seek};

use crate::container::{read_lump_data, DirectoryEntry, Lump};
use crate::levelinfo::LevelInfo;
use crate::records::{decode_all, encode_all, Linedef, Record, Sidedef, Thing};
use crate::{Result, WadError};

/// Number of lumps that follow a level marker.
pub const LEVEL_LUMP_COUNT: usize = 10;

/// Canonical order of the lumps following a level marker.
pub const LEVEL_LUMP_NAMES: [&str; LEVEL_LUMP_COUNT] = [
    "THINGS", "LINEDEFS", "SIDEDEFS", "VERTEXES", "SEGS", "SSECTORS", "NODES", "SECTORS",
    "REJECT", "BLOCKMAP",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Game {
    /// Episodic `E#M#` level names.
    Doom,
    /// Sequential `MAP##` level names.
    Doom2,
}

impl Game {
    pub fn matches(self, name: &str) -> bool {
        match self {
            Game::Doom => {
                let b = name.as_bytes();
                b.len() == 4
                    && b[0] == b'E'
                    && b[1].is_ascii_digit()
                    && b[2] == b'M'
                    && b[3].is_ascii_digit()
            }
            Game::Doom2 => match name.strip_prefix("MAP") {
                Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
                None => false,
            },
        }
    }

    /// Which game's naming scheme a level marker follows, if any.
    pub fn of_level_name(name: &str) -> Option<Game> {
        [Game::Doom, Game::Doom2]
            .into_iter()
            .find(|game| game.matches(name))
    }
}

pub fn is_level_header(name: &str, game: Game) -> bool {
    game.matches(name)
}

/// A level marker and the ten lumps grouped under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub name: String,
    /// Payload of the marker lump itself, normally empty.
    pub header_data: Vec<u8>,
    pub things: Vec<Thing>,
    pub linedefs: Vec<Linedef>,
    pub sidedefs: Vec<Sidedef>,
    pub vertexes: Lump,
    pub segs: Lump,
    pub subsectors: Lump,
    pub nodes: Lump,
    pub sectors: Lump,
    pub reject: Lump,
    pub blockmap: Lump,
    pub info: LevelInfo,
}

impl Level {
    /// A level with no records and empty geometry lumps.
    pub fn empty(name: impl Into<String>) -> Self {
        let name = name.into();
        let info = LevelInfo::for_slot(&name);
        Self {
            name,
            header_data: Vec::new(),
            things: Vec::new(),
            linedefs: Vec::new(),
            sidedefs: Vec::new(),
            vertexes: Lump::marker(LEVEL_LUMP_NAMES[3]),
            segs: Lump::marker(LEVEL_LUMP_NAMES[4]),
            subsectors: Lump::marker(LEVEL_LUMP_NAMES[5]),
            nodes: Lump::marker(LEVEL_LUMP_NAMES[6]),
            sectors: Lump::marker(LEVEL_LUMP_NAMES[7]),
            reject: Lump::marker(LEVEL_LUMP_NAMES[8]),
            blockmap: Lump::marker(LEVEL_LUMP_NAMES[9]),
            info,
        }
    }

    /// Build a level from its marker entry and the directory entries after it.
    pub fn assemble<R: Read + Seek>(
        header: &DirectoryEntry,
        following: &[DirectoryEntry],
        reader: &mut R,
    ) -> Result<Self> {
        if following.len() < LEVEL_LUMP_COUNT {
            return Err(WadError::IncompleteLevelGroup {
                level: header.name.clone(),
                remaining: following.len(),
            });
        }

        let group = &following[..LEVEL_LUMP_COUNT];
        for (entry, expected) in group.iter().zip(LEVEL_LUMP_NAMES) {
            if entry.name != expected {
                warn!(
                    "level {}: expected {} lump, found {}",
                    header.name, expected, entry.name
                );
            }
        }

        let header_data = read_lump_data(reader, header)?;
        let mut data = Vec::with_capacity(LEVEL_LUMP_COUNT);
        for entry in group {
            data.push(Lump::new(entry.name.clone(), read_lump_data(reader, entry)?));
        }

        let mut lumps = data.into_iter();
        let mut next = || lumps.next().unwrap_or_default();
        let things = decode_all::<Thing>(&next().data)?;
        let linedefs = decode_all::<Linedef>(&next().data)?;
        let sidedefs = decode_all::<Sidedef>(&next().data)?;

        Ok(Self {
            name: header.name.clone(),
            header_data,
            things,
            linedefs,
            sidedefs,
            vertexes: next(),
            segs: next(),
            subsectors: next(),
            nodes: next(),
            sectors: next(),
            reject: next(),
            blockmap: next(),
            info: LevelInfo::for_slot(&header.name),
        })
    }

    pub fn game(&self) -> Option<Game> {
        Game::of_level_name(&self.name)
    }

    /// Indices of every thing whose type is in `kinds`, in record order.
    pub fn find_things(&self, kinds: &[i16]) -> Vec<usize> {
        self.things
            .iter()
            .enumerate()
            .filter(|(_, thing)| kinds.contains(&thing.kind))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_secret_exit(&self) -> bool {
        self.linedefs.iter().any(Linedef::is_secret_exit)
    }

    /// The marker followed by the ten level lumps, records re-encoded.
    pub fn to_lumps(&self) -> Result<Vec<Lump>> {
        Ok(vec![
            Lump::new(self.name.clone(), self.header_data.clone()),
            Lump::new(Thing::LUMP, encode_all(&self.things)?),
            Lump::new(Linedef::LUMP, encode_all(&self.linedefs)?),
            Lump::new(Sidedef::LUMP, encode_all(&self.sidedefs)?),
            self.vertexes.clone(),
            self.segs.clone(),
            self.subsectors.clone(),
            self.nodes.clone(),
            self.sectors.clone(),
            self.reject.clone(),
            self.blockmap.clone(),
        ])
    }
}
