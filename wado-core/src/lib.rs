use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

pub mod catalog;
pub mod container;
pub mod convert;
pub mod episode;
pub mod level;
pub mod levelinfo;
pub mod mapinfo;
pub mod name;
pub mod records;
pub mod replace;

#[cfg(test)]
mod test_support;

pub use container::{Lump, Wad, WadFile, WadKind};
pub use episode::{compose_episode, compose_episode_wad, LevelPool};
pub use level::{Game, Level};
pub use levelinfo::{Boss, BossAction, LevelInfo};

use container::{parse_header, HEADER_SIZE};
use convert::{convert_level, convert_wad};

#[derive(Debug, Error)]
pub enum WadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("truncated header: {available} of {} bytes present", HEADER_SIZE)]
    TruncatedHeader { available: usize },
    #[error("unrecognized archive identifier {identifier:?}")]
    UnknownIdentifier { identifier: String },
    #[error("truncated directory: {count} entries at offset {offset} run past end of file")]
    TruncatedDirectory { offset: i32, count: i32 },
    #[error("truncated lump {name}: {length} bytes at offset {offset} run past end of file")]
    TruncatedLump {
        name: String,
        offset: i32,
        length: i32,
    },
    #[error("{lump} lump is {length} bytes, not a multiple of {record_size}")]
    MisalignedLump {
        lump: &'static str,
        length: usize,
        record_size: usize,
    },
    #[error("level {level} has only {remaining} of its 10 lumps")]
    IncompleteLevelGroup { level: String, remaining: usize },
    #[error("name {name:?} is longer than 8 bytes")]
    InvalidName { name: String },
    #[error("need {needed} levels {bucket}, found {available}")]
    InsufficientLevels {
        bucket: &'static str,
        needed: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, WadError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertSettings {
    pub seed: u64,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSettings {
    pub seed: u64,
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    #[serde(default)]
    pub convert_doom1_levels: bool,
}

/// Read a settings file written as JSON.
pub fn load_settings<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    Ok(serde_json::from_reader(reader)?)
}

/// Convert a Doom archive into a Doom II one at `output_path`, leaving the
/// input untouched.
pub fn convert(settings: &ConvertSettings) -> Result<()> {
    if !settings.input_path.is_file() {
        return Err(WadError::Config(format!(
            "Input file does not exist: {}",
            settings.input_path.display()
        )));
    }

    info!(
        "converting {} -> {} (seed {})",
        settings.input_path.display(),
        settings.output_path.display(),
        settings.seed
    );
    fs::copy(&settings.input_path, &settings.output_path)?;

    let mut wad = WadFile::open(&settings.output_path)?;
    convert_wad(&mut wad, settings.seed);
    wad.save()
}

/// Every `*.wad` under `dir`, sorted, excluding `exclude`.
fn discover_wads(dir: &Path, exclude: &Path) -> Result<Vec<PathBuf>> {
    let exclude = fs::canonicalize(exclude).ok();

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_wad = entry
            .path()
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("wad"));
        if !is_wad {
            continue;
        }
        if exclude.is_some() && fs::canonicalize(entry.path()).ok() == exclude {
            continue;
        }
        paths.push(entry.path().to_path_buf());
    }
    paths.sort();
    Ok(paths)
}

/// Build a fresh nine-level episode from the levels found under `input_dir`.
pub fn generate(settings: &GenerateSettings) -> Result<()> {
    if !settings.input_dir.is_dir() {
        return Err(WadError::Config(format!(
            "Input directory does not exist: {}",
            settings.input_dir.display()
        )));
    }

    let sources = discover_wads(&settings.input_dir, &settings.output_path)?;
    info!(
        "found {} wad files under {}",
        sources.len(),
        settings.input_dir.display()
    );

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut pool = LevelPool::new();
    for path in &sources {
        let wad = match Wad::load(path) {
            Ok(wad) => wad,
            Err(err @ (WadError::UnknownIdentifier { .. } | WadError::TruncatedHeader { .. })) => {
                warn!("skipping {}: not a wad ({})", path.display(), err);
                continue;
            }
            Err(err) => return Err(err),
        };

        for mut level in wad.levels {
            match level.game() {
                Some(Game::Doom2) => pool.add(level),
                Some(Game::Doom) if settings.convert_doom1_levels => {
                    convert_level(&mut level, &mut rng);
                    pool.add(level);
                }
                _ => debug!("{}: not pooling {}", path.display(), level.name),
            }
        }
    }
    if pool.is_empty() {
        warn!("no poolable levels under {}", settings.input_dir.display());
    }
    info!(
        "pooled {} levels ({} with a secret exit)",
        pool.len(),
        pool.with_secret_exit.len()
    );

    let episode = compose_episode_wad(pool, &mut rng)?;

    let mut out = WadFile::create(&settings.output_path)?;
    *out = episode;
    out.save()
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelSummary {
    pub name: String,
    pub title: String,
    pub things: usize,
    pub linedefs: usize,
    pub sidedefs: usize,
    pub secret_exit: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WadSummary {
    pub identifier: String,
    pub lump_count: i32,
    pub directory_offset: i32,
    pub levels: Vec<LevelSummary>,
}

/// Describe an archive without changing it.
pub fn analyze(path: impl AsRef<Path>) -> Result<WadSummary> {
    let path = path.as_ref();
    let header = parse_header(&mut BufReader::new(File::open(path)?))?;
    let wad = Wad::load(path)?;

    Ok(WadSummary {
        identifier: wad.kind.as_str().to_string(),
        lump_count: header.lump_count,
        directory_offset: header.directory_offset,
        levels: wad
            .levels
            .iter()
            .map(|level| LevelSummary {
                name: level.name.clone(),
                title: level.info.name.clone(),
                things: level.things.len(),
                linedefs: level.linedefs.len(),
                sidedefs: level.sidedefs.len(),
                secret_exit: level.has_secret_exit(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Linedef, Thing};
    use crate::test_support::{build_wad, level_group};
    use tempfile::tempdir;

    fn write_wad(path: &Path, entries: &[(String, Vec<u8>)]) {
        fs::write(path, build_wad(b"PWAD", entries)).unwrap();
    }

    #[test]
    fn convert_leaves_input_untouched() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("doom.wad");
        let output = temp.path().join("doom2.wad");
        let things = vec![Thing {
            kind: 2001,
            ..Thing::default()
        }];
        let mut entries = level_group("E1M1", &things, &[], &[]);
        entries.push(("D_INTRO".to_string(), vec![1; 4]));
        let raw = build_wad(b"IWAD", &entries);
        fs::write(&input, &raw).unwrap();

        convert(&ConvertSettings {
            seed: 42,
            input_path: input.clone(),
            output_path: output.clone(),
        })
        .unwrap();

        assert_eq!(fs::read(&input).unwrap(), raw);
        let wad = Wad::load(&output).unwrap();
        assert_eq!(wad.kind, WadKind::Iwad);
        assert_eq!(wad.levels[0].name, "MAP01");
        assert_eq!(wad.levels[0].things[0].kind, 82);
        assert!(wad.lumps.iter().any(|l| l.name == "D_DM2TTL"));

    }

    #[test]
    fn convert_requires_existing_input() {
        let temp = tempdir().unwrap();
        let err = convert(&ConvertSettings {
            seed: 1,
            input_path: temp.path().join("missing.wad"),
            output_path: temp.path().join("never.wad"),
        })
        .unwrap_err();
        assert!(matches!(err, WadError::Config(_)));
    }

    #[test]
    fn generate_builds_a_nine_level_episode() {
        let temp = tempdir().unwrap();
        let dir = temp.path().to_path_buf();
        fs::create_dir_all(dir.join("nested")).unwrap();

        let secret = [Linedef {
            special: 124,
            ..Linedef::default()
        }];
        let mut first = Vec::new();
        for n in 1..=5 {
            first.extend(level_group(&format!("MAP{:02}", n), &[], &[], &[]));
        }
        first.extend(level_group("MAP31", &[], &secret, &[]));
        write_wad(&dir.join("a.WAD"), &first);

        let mut second = Vec::new();
        for n in 6..=9 {
            second.extend(level_group(&format!("MAP{:02}", n), &[], &[], &[]));
        }
        second.extend(level_group("E1M1", &[], &[], &[]));
        write_wad(&dir.join("nested").join("b.wad"), &second);

        // Files that merely carry the extension are skipped.
        fs::write(dir.join("short.wad"), b"not a wad").unwrap();
        fs::write(dir.join("zip.wad"), b"PK\x03\x04 twelve bytes or more").unwrap();
        fs::write(dir.join("notes.txt"), b"MAP01").unwrap();

        let output = dir.join("episode.wad");
        let settings = GenerateSettings {
            seed: 2024,
            input_dir: dir.clone(),
            output_path: output.clone(),
            convert_doom1_levels: false,
        };
        generate(&settings).unwrap();

        let wad = Wad::load(&output).unwrap();
        assert_eq!(wad.kind, WadKind::Pwad);
        let names: Vec<_> = wad.levels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            ["MAP01", "MAP02", "MAP03", "MAP04", "MAP05", "MAP06", "MAP07", "MAP08", "MAP09"]
        );
        assert_eq!(wad.levels.iter().filter(|l| l.has_secret_exit()).count(), 1);
        assert!(wad.lumps.iter().any(|l| l.name == "UMAPINFO"));

        // Running again over the same directory ignores the previous output.
        let first_run = fs::read(&output).unwrap();
        generate(&settings).unwrap();
        assert_eq!(fs::read(&output).unwrap(), first_run);

    }

    #[test]
    fn generate_fails_before_writing_when_pool_is_short() {
        let temp = tempdir().unwrap();
        let dir = temp.path().to_path_buf();
        write_wad(&dir.join("only.wad"), &level_group("MAP01", &[], &[], &[]));

        let output = dir.join("out.wad");
        let err = generate(&GenerateSettings {
            seed: 1,
            input_dir: dir.clone(),
            output_path: output.clone(),
            convert_doom1_levels: true,
        })
        .unwrap_err();
        assert!(matches!(err, WadError::InsufficientLevels { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn generate_on_an_empty_directory_reports_missing_levels() {
        let temp = tempdir().unwrap();
        let dir = temp.path().to_path_buf();
        fs::write(dir.join("notes.txt"), b"no archives here").unwrap();

        let output = dir.join("out.wad");
        let err = generate(&GenerateSettings {
            seed: 4,
            input_dir: dir.clone(),
            output_path: output.clone(),
            convert_doom1_levels: false,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            WadError::InsufficientLevels {
                needed: 8,
                available: 0,
                ..
            }
        ));
        assert!(!output.exists());
    }

    #[test]
    fn generate_aborts_on_a_corrupt_wad_in_the_pool() {
        let temp = tempdir().unwrap();
        let dir = temp.path().to_path_buf();

        let mut good = Vec::new();
        for n in 1..=9 {
            good.extend(level_group(&format!("MAP{:02}", n), &[], &[], &[]));
        }
        let secret = [Linedef {
            special: 51,
            ..Linedef::default()
        }];
        good.extend(level_group("MAP31", &[], &secret, &[]));
        write_wad(&dir.join("good.wad"), &good);

        let mut corrupt = level_group("MAP10", &[], &[], &[]);
        corrupt[1].1 = vec![0u8; 13];
        write_wad(&dir.join("corrupt.wad"), &corrupt);

        let output = dir.join("out.wad");
        let err = generate(&GenerateSettings {
            seed: 4,
            input_dir: dir.clone(),
            output_path: output.clone(),
            convert_doom1_levels: false,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            WadError::MisalignedLump {
                lump: "THINGS",
                length: 13,
                ..
            }
        ));
        assert!(!output.exists());

    }

    #[test]
    fn analyze_reports_levels() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("analyze.wad");
        let secret = [Linedef {
            special: 51,
            ..Linedef::default()
        }];
        let mut entries = vec![("PLAYPAL".to_string(), vec![0; 3])];
        entries.extend(level_group("MAP15", &[Thing::default()], &secret, &[]));
        write_wad(&path, &entries);

        let summary = analyze(&path).unwrap();
        assert_eq!(summary.identifier, "PWAD");
        assert_eq!(summary.lump_count, 12);
        assert_eq!(summary.directory_offset, 12 + 3 + 10 + 14);
        assert_eq!(summary.levels.len(), 1);
        assert_eq!(summary.levels[0].title, "Industrial Zone");
        assert!(summary.levels[0].secret_exit);
        assert_eq!(summary.levels[0].things, 1);

    }

    #[test]
    fn settings_load_from_json() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(
            &path,
            r#"{"seed": 7, "input_dir": "wads", "output_path": "out.wad"}"#,
        )
        .unwrap();

        let settings: GenerateSettings = load_settings(&path).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.input_dir, PathBuf::from("wads"));
        assert!(!settings.convert_doom1_levels);

        fs::write(&path, "{").unwrap();
        assert!(matches!(
            load_settings::<ConvertSettings>(&path),
            Err(WadError::Json(_))
        ));
    }
}
