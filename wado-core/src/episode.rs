use log::{debug, info};
use rand::Rng;

use crate::container::{Wad, WadKind};
use crate::level::Level;
use crate::{Result, WadError};

pub const EPISODE_LENGTH: usize = 9;
/// The slot that ends the episode.
pub const FINAL_SLOT: usize = 8;
/// The bonus level reached only through a secret exit.
pub const SECRET_LEVEL_SLOT: usize = 9;
/// Latest slot that may carry the secret exit.
pub const LAST_SECRET_EXIT_SLOT: usize = 7;

/// Levels available for placement, split by whether they contain a secret
/// exit trigger. Each level lives in exactly one bucket.
#[derive(Debug, Clone, Default)]
pub struct LevelPool {
    pub with_secret_exit: Vec<Level>,
    pub without_secret_exit: Vec<Level>,
}

impl LevelPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, level: Level) {
        if level.has_secret_exit() {
            self.with_secret_exit.push(level);
        } else {
            self.without_secret_exit.push(level);
        }
    }

    pub fn extend(&mut self, levels: impl IntoIterator<Item = Level>) {
        for level in levels {
            self.add(level);
        }
    }

    pub fn len(&self) -> usize {
        self.with_secret_exit.len() + self.without_secret_exit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn slot_name(slot: usize) -> String {
    format!("MAP{:02}", slot)
}

/// Fill the nine episode slots from `pool`.
///
/// One slot in 1..=7 is drawn first and receives a level with a secret exit,
/// which may repeat across runs of the same pool. Every other slot takes a
/// distinct secret-free level. Exits are rewired so the secret slot leads to
/// the bonus level and the bonus level returns to the slot after it.
pub fn compose_episode<R: Rng + ?Sized>(mut pool: LevelPool, rng: &mut R) -> Result<Vec<Level>> {
    let needed = EPISODE_LENGTH - 1;
    if pool.without_secret_exit.len() < needed {
        return Err(WadError::InsufficientLevels {
            bucket: "without secret exit",
            needed,
            available: pool.without_secret_exit.len(),
        });
    }
    if pool.with_secret_exit.is_empty() {
        return Err(WadError::InsufficientLevels {
            bucket: "with secret exit",
            needed: 1,
            available: 0,
        });
    }

    let secret_slot = rng.gen_range(1..=LAST_SECRET_EXIT_SLOT);
    info!("secret exit placed in {}", slot_name(secret_slot));

    let mut episode = Vec::with_capacity(EPISODE_LENGTH);
    for slot in 1..=EPISODE_LENGTH {
        let mut level = if slot == secret_slot {
            let i = rng.gen_range(0..pool.with_secret_exit.len());
            pool.with_secret_exit[i].clone()
        } else {
            let i = rng.gen_range(0..pool.without_secret_exit.len());
            pool.without_secret_exit.remove(i)
        };

        let name = slot_name(slot);
        let next = if slot == SECRET_LEVEL_SLOT {
            slot_name(secret_slot + 1)
        } else {
            slot_name(slot + 1)
        };
        let next_secret = if slot == secret_slot {
            slot_name(SECRET_LEVEL_SLOT)
        } else {
            next.clone()
        };

        info!("{} <- {} ({})", name, level.name, level.info.name);
        debug!("{}: next {}, secret {}", name, next, next_secret);

        level.name = name;
        level.info.label = format!("Level {}", slot);
        level.info.next = next;
        level.info.next_secret = next_secret;
        level.info.end_game = slot == FINAL_SLOT;
        episode.push(level);
    }

    Ok(episode)
}

/// Compose an episode and wrap it in a fresh PWAD.
pub fn compose_episode_wad<R: Rng + ?Sized>(pool: LevelPool, rng: &mut R) -> Result<Wad> {
    let mut wad = Wad::new(WadKind::Pwad);
    wad.levels = compose_episode(pool, rng)?;
    Ok(wad)
}
