use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use crate::name::{decode_name, encode_name, NAME_SIZE};
use crate::{Result, WadError};

/// Linedef specials that send the player to the secret level.
pub const SECRET_EXIT_SPECIALS: [i16; 3] = [51, 124, 198];

/// A fixed-size little-endian record stored back to back inside a lump.
pub trait Record: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;
    /// Canonical name of the lump holding these records.
    const LUMP: &'static str;

    /// Decode one record. `buf` must be exactly `SIZE` bytes long.
    fn decode(buf: &[u8]) -> Self;

    /// Append the encoded record to `out`.
    fn encode(&self, out: &mut Vec<u8>) -> Result<()>;
}

/// Decode every record in a lump.
pub fn decode_all<T: Record>(data: &[u8]) -> Result<Vec<T>> {
    if data.len() % T::SIZE != 0 {
        return Err(WadError::MisalignedLump {
            lump: T::LUMP,
            length: data.len(),
            record_size: T::SIZE,
        });
    }

    Ok(data.chunks_exact(T::SIZE).map(T::decode).collect())
}

/// Encode a record sequence back into lump data.
pub fn encode_all<T: Record>(records: &[T]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(records.len() * T::SIZE);
    for record in records {
        record.encode(&mut out)?;
    }
    Ok(out)
}

fn push_i16(out: &mut Vec<u8>, value: i16) {
    let mut raw = [0u8; 2];
    LittleEndian::write_i16(&mut raw, value);
    out.extend_from_slice(&raw);
}

fn name_at(buf: &[u8], at: usize) -> String {
    let mut raw = [0u8; NAME_SIZE];
    raw.copy_from_slice(&buf[at..at + NAME_SIZE]);
    decode_name(&raw)
}

/// A placed actor or item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Thing {
    pub x: i16,
    pub y: i16,
    pub angle: i16,
    pub kind: i16,
    pub flags: i16,
}

impl Record for Thing {
    const SIZE: usize = 10;
    const LUMP: &'static str = "THINGS";

    fn decode(buf: &[u8]) -> Self {
        Self {
            x: LittleEndian::read_i16(&buf[0..2]),
            y: LittleEndian::read_i16(&buf[2..4]),
            angle: LittleEndian::read_i16(&buf[4..6]),
            kind: LittleEndian::read_i16(&buf[6..8]),
            flags: LittleEndian::read_i16(&buf[8..10]),
        }
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        push_i16(out, self.x);
        push_i16(out, self.y);
        push_i16(out, self.angle);
        push_i16(out, self.kind);
        push_i16(out, self.flags);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Linedef {
    pub start: i16,
    pub end: i16,
    pub flags: i16,
    pub special: i16,
    pub tag: i16,
    pub front: i16,
    pub back: i16,
}

impl Linedef {
    pub fn is_secret_exit(&self) -> bool {
        SECRET_EXIT_SPECIALS.contains(&self.special)
    }
}

impl Record for Linedef {
    const SIZE: usize = 14;
    const LUMP: &'static str = "LINEDEFS";

    fn decode(buf: &[u8]) -> Self {
        Self {
            start: LittleEndian::read_i16(&buf[0..2]),
            end: LittleEndian::read_i16(&buf[2..4]),
            flags: LittleEndian::read_i16(&buf[4..6]),
            special: LittleEndian::read_i16(&buf[6..8]),
            tag: LittleEndian::read_i16(&buf[8..10]),
            front: LittleEndian::read_i16(&buf[10..12]),
            back: LittleEndian::read_i16(&buf[12..14]),
        }
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        push_i16(out, self.start);
        push_i16(out, self.end);
        push_i16(out, self.flags);
        push_i16(out, self.special);
        push_i16(out, self.tag);
        push_i16(out, self.front);
        push_i16(out, self.back);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sidedef {
    pub x_offset: i16,
    pub y_offset: i16,
    pub upper_texture: String,
    pub lower_texture: String,
    pub middle_texture: String,
    pub sector: i16,
}

impl Sidedef {
    /// Iterate the three texture slots, upper, lower, middle.
    pub fn textures(&self) -> [&str; 3] {
        [
            self.upper_texture.as_str(),
            self.lower_texture.as_str(),
            self.middle_texture.as_str(),
        ]
    }
}

impl Record for Sidedef {
    const SIZE: usize = 30;
    const LUMP: &'static str = "SIDEDEFS";

    fn decode(buf: &[u8]) -> Self {
        Self {
            x_offset: LittleEndian::read_i16(&buf[0..2]),
            y_offset: LittleEndian::read_i16(&buf[2..4]),
            upper_texture: name_at(buf, 4),
            lower_texture: name_at(buf, 12),
            middle_texture: name_at(buf, 20),
            sector: LittleEndian::read_i16(&buf[28..30]),
        }
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        push_i16(out, self.x_offset);
        push_i16(out, self.y_offset);
        out.extend_from_slice(&encode_name(&self.upper_texture)?);
        out.extend_from_slice(&encode_name(&self.lower_texture)?);
        out.extend_from_slice(&encode_name(&self.middle_texture)?);
        push_i16(out, self.sector);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decodes_thing_fields_in_wire_order() {
        let raw = [0x10, 0x00, 0xF0, 0xFF, 0x5A, 0x00, 0xD1, 0x07, 0x07, 0x00];
        let thing = Thing::decode(&raw);
        assert_eq!(
            thing,
            Thing {
                x: 16,
                y: -16,
                angle: 90,
                kind: 2001,
                flags: 7,
            }
        );
    }

    #[test]
    fn decodes_linedef_with_missing_back_side() {
        let mut raw = Vec::new();
        for v in [0i16, 1, 0x0001, 51, 0, 4, -1] {
            push_i16(&mut raw, v);
        }
        let line = Linedef::decode(&raw);
        assert_eq!(line.special, 51);
        assert!(line.is_secret_exit());
        assert_eq!(line.back, -1);
        assert_eq!(line.front, 4);
    }

    #[test]
    fn sidedef_round_trips_texture_names() {
        let side = Sidedef {
            x_offset: -32,
            y_offset: 8,
            upper_texture: "STARTAN1".to_string(),
            lower_texture: "-".to_string(),
            middle_texture: "BRNPOIS".to_string(),
            sector: 12,
        };
        let mut raw = Vec::new();
        side.encode(&mut raw).unwrap();
        assert_eq!(raw.len(), Sidedef::SIZE);
        assert_eq!(&raw[12..20], b"-\0\0\0\0\0\0\0");
        assert_eq!(Sidedef::decode(&raw), side);
    }

    #[test]
    fn sidedef_keeps_texture_bytes_after_embedded_nul() {
        let mut raw = vec![0u8; Sidedef::SIZE];
        raw[4..12].copy_from_slice(b"AB\0CD\0\0\0");
        raw[20..28].copy_from_slice(b"-\0\0\0\0\0\0\0");
        let side = Sidedef::decode(&raw);
        assert_eq!(side.upper_texture, "AB\0CD");

        let mut out = Vec::new();
        side.encode(&mut out).unwrap();
        assert_eq!(out, raw);
    }

    #[test]
    fn sidedef_rejects_oversized_texture() {
        let side = Sidedef {
            middle_texture: "TOOLONGNAME".to_string(),
            ..Sidedef::default()
        };
        let mut raw = Vec::new();
        assert!(matches!(
            side.encode(&mut raw),
            Err(WadError::InvalidName { .. })
        ));
    }

    #[test]
    fn decode_all_rejects_misaligned_lumps() {
        let err = decode_all::<Thing>(&[0u8; 25]).unwrap_err();
        match err {
            WadError::MisalignedLump {
                lump,
                length,
                record_size,
            } => {
                assert_eq!(lump, "THINGS");
                assert_eq!(length, 25);
                assert_eq!(record_size, 10);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decode_all_accepts_empty_lumps() {
        assert!(decode_all::<Linedef>(&[]).unwrap().is_empty());
        assert!(encode_all::<Linedef>(&[]).unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn thing_bytes_survive_decode_encode(raw in proptest::collection::vec(any::<u8>(), Thing::SIZE)) {
            let mut out = Vec::new();
            Thing::decode(&raw).encode(&mut out).unwrap();
            prop_assert_eq!(out, raw);
        }

        #[test]
        fn linedef_bytes_survive_decode_encode(raw in proptest::collection::vec(any::<u8>(), Linedef::SIZE)) {
            let mut out = Vec::new();
            Linedef::decode(&raw).encode(&mut out).unwrap();
            prop_assert_eq!(out, raw);
        }

        // Spaces are excluded because names encode them as NUL padding.
        #[test]
        fn sidedef_bytes_survive_decode_encode(
            raw in proptest::collection::vec(any::<u8>().prop_filter("space", |b| *b != b' '), Sidedef::SIZE)
        ) {
            let mut out = Vec::new();
            Sidedef::decode(&raw).encode(&mut out).unwrap();
            prop_assert_eq!(out, raw);
        }

        #[test]
        fn sidedef_survives_encode_decode(
            x_offset in any::<i16>(),
            y_offset in any::<i16>(),
            upper in "[A-Z0-9_-]{0,8}",
            lower in "[A-Z0-9_-]{0,8}",
            middle in "[A-Z0-9_-]{0,8}",
            sector in any::<i16>(),
        ) {
            let side = Sidedef {
                x_offset,
                y_offset,
                upper_texture: upper,
                lower_texture: lower,
                middle_texture: middle,
                sector,
            };
            let raw = encode_all(std::slice::from_ref(&side)).unwrap();
            let decoded = decode_all::<Sidedef>(&raw).unwrap();
            prop_assert_eq!(decoded, vec![side]);
        }
    }
}
