use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use crate::level::{Game, Level, LEVEL_LUMP_COUNT};
use crate::mapinfo::{render_umapinfo, MAPINFO_LUMP};
use crate::name::{decode_name, encode_name, NAME_SIZE};
use crate::{Result, WadError};

pub const HEADER_SIZE: usize = 12;
pub const DIRECTORY_ENTRY_SIZE: usize = 16;

/// The two archive flavours the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WadKind {
    /// A full game archive.
    Iwad,
    /// A patch archive loaded on top of an IWAD.
    Pwad,
}

impl WadKind {
    pub fn from_identifier(identifier: &[u8; 4]) -> Option<Self> {
        match identifier {
            b"IWAD" => Some(WadKind::Iwad),
            b"PWAD" => Some(WadKind::Pwad),
            _ => None,
        }
    }

    pub fn identifier(self) -> &'static [u8; 4] {
        match self {
            WadKind::Iwad => b"IWAD",
            WadKind::Pwad => b"PWAD",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WadKind::Iwad => "IWAD",
            WadKind::Pwad => "PWAD",
        }
    }
}

/// The fixed 12-byte prefix of every archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadHeader {
    pub identifier: [u8; 4],
    pub lump_count: i32,
    pub directory_offset: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub offset: i32,
    pub length: i32,
    pub name: String,
}

/// A named blob of bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lump {
    pub name: String,
    pub data: Vec<u8>,
}

impl Lump {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// A zero-length lump, as used for level markers.
    pub fn marker(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

/// Read the archive header from the start of `reader`.
///
/// Any four-byte identifier is accepted here; deciding which ones are
/// acceptable is left to the caller.
pub fn parse_header<R: Read + Seek>(reader: &mut R) -> Result<WadHeader> {
    reader.seek(SeekFrom::Start(0))?;

    let mut raw = Vec::with_capacity(HEADER_SIZE);
    reader.by_ref().take(HEADER_SIZE as u64).read_to_end(&mut raw)?;
    if raw.len() < HEADER_SIZE {
        return Err(WadError::TruncatedHeader {
            available: raw.len(),
        });
    }

    let mut identifier = [0u8; 4];
    identifier.copy_from_slice(&raw[0..4]);
    let mut rest = &raw[4..];
    let lump_count = rest.read_i32::<LittleEndian>()?;
    let directory_offset = rest.read_i32::<LittleEndian>()?;

    Ok(WadHeader {
        identifier,
        lump_count,
        directory_offset,
    })
}

/// Read `count` directory entries starting at `offset`.
pub fn parse_directory<R: Read + Seek>(
    reader: &mut R,
    offset: i32,
    count: i32,
) -> Result<Vec<DirectoryEntry>> {
    let truncated = || WadError::TruncatedDirectory { offset, count };

    let start = u64::try_from(offset).map_err(|_| truncated())?;
    let entries = usize::try_from(count).map_err(|_| truncated())?;
    let expected = entries
        .checked_mul(DIRECTORY_ENTRY_SIZE)
        .ok_or_else(truncated)?;

    reader.seek(SeekFrom::Start(start))?;
    let mut raw = Vec::new();
    reader.by_ref().take(expected as u64).read_to_end(&mut raw)?;
    if raw.len() < expected {
        return Err(truncated());
    }

    let mut directory = Vec::with_capacity(entries);
    for chunk in raw.chunks_exact(DIRECTORY_ENTRY_SIZE) {
        let mut fields = &chunk[..8];
        let data_offset = fields.read_i32::<LittleEndian>()?;
        let data_length = fields.read_i32::<LittleEndian>()?;
        let mut name = [0u8; NAME_SIZE];
        name.copy_from_slice(&chunk[8..16]);

        directory.push(DirectoryEntry {
            offset: data_offset,
            length: data_length,
            name: decode_name(&name),
        });
    }

    Ok(directory)
}

/// Read exactly the bytes a directory entry points at.
pub fn read_lump_data<R: Read + Seek>(reader: &mut R, entry: &DirectoryEntry) -> Result<Vec<u8>> {
    let truncated = || WadError::TruncatedLump {
        name: entry.name.clone(),
        offset: entry.offset,
        length: entry.length,
    };

    let start = u64::try_from(entry.offset).map_err(|_| truncated())?;
    let length = usize::try_from(entry.length).map_err(|_| truncated())?;
    if length == 0 {
        return Ok(Vec::new());
    }

    reader.seek(SeekFrom::Start(start))?;
    let mut data = Vec::with_capacity(length.min(1 << 20));
    reader.by_ref().take(length as u64).read_to_end(&mut data)?;
    if data.len() < length {
        return Err(truncated());
    }

    Ok(data)
}

/// In-memory model of an archive: free-standing lumps plus grouped levels.
#[derive(Debug, Clone)]
pub struct Wad {
    pub kind: WadKind,
    pub lumps: Vec<Lump>,
    pub levels: Vec<Level>,
}

impl Wad {
    pub fn new(kind: WadKind) -> Self {
        Self {
            kind,
            lumps: Vec::new(),
            levels: Vec::new(),
        }
    }

    /// Parse a whole archive from `reader`.
    pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let header = parse_header(reader)?;
        let kind = WadKind::from_identifier(&header.identifier).ok_or_else(|| {
            WadError::UnknownIdentifier {
                identifier: String::from_utf8_lossy(&header.identifier).to_string(),
            }
        })?;

        let directory = parse_directory(reader, header.directory_offset, header.lump_count)?;

        let mut lumps = Vec::new();
        let mut levels = Vec::new();
        let mut i = 0usize;
        while i < directory.len() {
            let entry = &directory[i];
            if Game::of_level_name(&entry.name).is_some() {
                let level = Level::assemble(entry, &directory[i + 1..], reader)?;
                debug!(
                    "level {}: {} things, {} linedefs, {} sidedefs",
                    level.name,
                    level.things.len(),
                    level.linedefs.len(),
                    level.sidedefs.len()
                );
                levels.push(level);
                i += 1 + LEVEL_LUMP_COUNT;
            } else {
                lumps.push(Lump::new(entry.name.clone(), read_lump_data(reader, entry)?));
                i += 1;
            }
        }

        Ok(Self {
            kind,
            lumps,
            levels,
        })
    }

    /// Parse an archive from a file opened read-only.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path.as_ref())?);
        Self::read_from(&mut reader)
    }

    /// The lumps in the order they are written: each level expanded to its
    /// eleven lumps, then the free-standing lumps, then a fresh UMAPINFO.
    pub fn output_lumps(&self) -> Result<Vec<Lump>> {
        let mut lumps = Vec::with_capacity(self.levels.len() * (LEVEL_LUMP_COUNT + 1) + self.lumps.len() + 1);

        for level in &self.levels {
            lumps.extend(level.to_lumps()?);
        }

        if self.levels.is_empty() {
            lumps.extend(self.lumps.iter().cloned());
        } else {
            lumps.extend(self.lumps.iter().filter(|l| l.name != MAPINFO_LUMP).cloned());
            lumps.push(render_umapinfo(
                self.levels.iter().map(|l| (l.name.as_str(), &l.info)),
            ));
        }

        Ok(lumps)
    }

    /// Serialize the archive. Directory offsets are always recomputed from
    /// the lumps actually written.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let lumps = self.output_lumps()?;

        let too_large = || WadError::Config("archive exceeds the 2 GiB format limit".to_string());
        let data_len: usize = lumps.iter().map(|l| l.data.len()).sum();
        let directory_offset = i32::try_from(HEADER_SIZE + data_len).map_err(|_| too_large())?;
        let lump_count = i32::try_from(lumps.len()).map_err(|_| too_large())?;

        out.write_all(self.kind.identifier())?;
        out.write_i32::<LittleEndian>(lump_count)?;
        out.write_i32::<LittleEndian>(directory_offset)?;

        for lump in &lumps {
            out.write_all(&lump.data)?;
        }

        let mut offset = HEADER_SIZE as i32;
        for lump in &lumps {
            // Fits: the running total never exceeds directory_offset.
            let length = lump.data.len() as i32;
            out.write_i32::<LittleEndian>(offset)?;
            out.write_i32::<LittleEndian>(length)?;
            out.write_all(&encode_name(&lump.name)?)?;
            offset += length;
        }

        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }
}

/// An archive bound to the file it was opened from or will be saved to.
#[derive(Debug)]
pub struct WadFile {
    file: File,
    path: PathBuf,
    wad: Wad,
}

impl WadFile {
    /// Open and parse an existing archive for editing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new().read(true).write(true).open(&path)?;
        let wad = Wad::read_from(&mut BufReader::new(&mut file))?;
        info!(
            "opened {} ({}, {} lumps, {} levels)",
            path.display(),
            wad.kind.as_str(),
            wad.lumps.len(),
            wad.levels.len()
        );

        Ok(Self { file, path, wad })
    }

    /// Create (or truncate) a file holding a new, empty PWAD.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        Ok(Self {
            file,
            path,
            wad: Wad::new(WadKind::Pwad),
        })
    }

    /// Rewrite the whole file from the in-memory model.
    pub fn save(&mut self) -> Result<()> {
        let bytes = self.wad.to_bytes()?;

        self.file.seek(SeekFrom::Start(0))?;
        self.file.set_len(0)?;
        {
            let mut writer = BufWriter::new(&mut self.file);
            writer.write_all(&bytes)?;
            writer.flush()?;
        }
        self.file.sync_all()?;

        info!("saved {} ({} bytes)", self.path.display(), bytes.len());
        Ok(())
    }
}

impl Deref for WadFile {
    type Target = Wad;

    fn deref(&self) -> &Wad {
        &self.wad
    }
}

impl DerefMut for WadFile {
    fn deref_mut(&mut self) -> &mut Wad {
        &mut self.wad
    }
}
