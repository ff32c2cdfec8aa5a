//! Fixture builders shared by the unit tests.

use crate::level::LEVEL_LUMP_NAMES;
use crate::records::{encode_all, Linedef, Sidedef, Thing};

/// Lay out a raw archive by hand: header, lump data, directory. Names are
/// written one byte per char.
pub fn build_wad(identifier: &[u8; 4], entries: &[(String, Vec<u8>)]) -> Vec<u8> {
    let data_len: usize = entries.iter().map(|(_, data)| data.len()).sum();
    let mut raw = identifier.to_vec();
    raw.extend_from_slice(&(entries.len() as i32).to_le_bytes());
    raw.extend_from_slice(&((12 + data_len) as i32).to_le_bytes());

    for (_, data) in entries {
        raw.extend_from_slice(data);
    }

    let mut offset = 12i32;
    for (name, data) in entries {
        raw.extend_from_slice(&offset.to_le_bytes());
        raw.extend_from_slice(&(data.len() as i32).to_le_bytes());
        let mut padded = [0u8; 8];
        for (slot, ch) in padded.iter_mut().zip(name.chars()) {
            *slot = ch as u32 as u8;
        }
        raw.extend_from_slice(&padded);
        offset += data.len() as i32;
    }

    raw
}

/// Entries for a level marker and its ten lumps, geometry left empty.
pub fn level_group(
    name: &str,
    things: &[Thing],
    linedefs: &[Linedef],
    sidedefs: &[Sidedef],
) -> Vec<(String, Vec<u8>)> {
    let mut entries = vec![(name.to_string(), Vec::new())];
    for lump in LEVEL_LUMP_NAMES {
        let data = match lump {
            "THINGS" => encode_all(things).unwrap(),
            "LINEDEFS" => encode_all(linedefs).unwrap(),
            "SIDEDEFS" => encode_all(sidedefs).unwrap(),
            _ => Vec::new(),
        };
        entries.push((lump.to_string(), data));
    }
    entries
}
