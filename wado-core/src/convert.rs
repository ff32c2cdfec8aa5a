use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::catalog::{
    is_shift_texture, replacement_lump_name, replacement_texture, DOOM1_MONSTERS, ENEMY_ARACHNOTRON,
    ENEMY_ARCHVILE, ENEMY_BARON, ENEMY_CACODEMON, ENEMY_CHAINGUNNER, ENEMY_HELL_KNIGHT,
    ENEMY_IMP, ENEMY_PAIN_ELEMENTAL, ENEMY_REVENANT, ENEMY_ZOMBIEMAN, SHIFT_TEXTURE_OFFSET,
    THING_BERSERK, THING_HEALTH_BONUS, THING_MEDIKIT, THING_MEGASPHERE, THING_SHOTGUN,
    THING_STIMPACK, THING_SUPER_SHOTGUN,
};
use crate::container::{Lump, Wad};
use crate::level::{Game, Level};
use crate::replace::{replace_kinds, ReplacementTargets};

/// Map an `E<e>M<m>` slot to its `MAP<nn>` position, nine maps per episode.
pub fn doom2_slot_for(name: &str) -> Option<String> {
    if !Game::Doom.matches(name) {
        return None;
    }

    let b = name.as_bytes();
    let episode = (b[1] - b'0') as u32;
    let mission = (b[3] - b'0') as u32;
    if episode == 0 || mission == 0 {
        return None;
    }

    Some(format!("MAP{:02}", (episode - 1) * 9 + mission))
}

/// Move a Doom level into its Doom II slot, exits included.
pub fn rename_to_doom2_slot(level: &mut Level) -> bool {
    let Some(slot) = doom2_slot_for(&level.name) else {
        return false;
    };

    debug!("renaming {} to {}", level.name, slot);
    level.name = slot;
    if let Some(next) = doom2_slot_for(&level.info.next) {
        level.info.next = next;
    }
    if let Some(next_secret) = doom2_slot_for(&level.info.next_secret) {
        level.info.next_secret = next_secret;
    }
    true
}

/// Swap Doom-only wall textures for Doom II equivalents, shifting sidedefs
/// that use a texture which doubled in width. Returns the number of
/// sidedefs changed.
pub fn apply_texture_remap(level: &mut Level) -> usize {
    let mut changed = 0usize;
    for side in &mut level.sidedefs {
        let before = side.clone();

        if side.textures().iter().any(|tex| is_shift_texture(tex)) {
            side.x_offset = side.x_offset.wrapping_add(SHIFT_TEXTURE_OFFSET);
        }

        for tex in [
            &mut side.upper_texture,
            &mut side.lower_texture,
            &mut side.middle_texture,
        ] {
            if let Some(replacement) = replacement_texture(tex) {
                *tex = replacement.to_string();
            }
        }

        if *side != before {
            changed += 1;
        }
    }

    debug!("{}: remapped {} sidedefs", level.name, changed);
    changed
}

/// Repopulate a level with Doom II actors.
///
/// Every shotgun becomes a super shotgun, one each of megasphere, arch-vile,
/// berserk and super shotgun replace random Doom monsters, and fixed shares
/// of imps, cacodemons, barons and zombiemen become Doom II monsters or
/// health pickups.
pub fn apply_actor_mix<R: Rng + ?Sized>(level: &mut Level, rng: &mut R) {
    for i in level.find_things(&[THING_SHOTGUN]) {
        level.things[i].kind = THING_SUPER_SHOTGUN;
    }

    let passes: [(&[i16], ReplacementTargets); 5] = [
        (
            DOOM1_MONSTERS,
            ReplacementTargets::counts([
                (THING_MEGASPHERE, 1),
                (ENEMY_ARCHVILE, 1),
                (THING_BERSERK, 1),
                (THING_SUPER_SHOTGUN, 1),
            ]),
        ),
        (
            &[ENEMY_IMP],
            ReplacementTargets::weights([(ENEMY_CHAINGUNNER, 0.2)]),
        ),
        (
            &[ENEMY_CACODEMON],
            ReplacementTargets::weights([(ENEMY_PAIN_ELEMENTAL, 0.1)]),
        ),
        (
            &[ENEMY_BARON],
            ReplacementTargets::weights([
                (ENEMY_ARACHNOTRON, 0.1),
                (ENEMY_REVENANT, 0.1),
                (ENEMY_HELL_KNIGHT, 0.3),
            ]),
        ),
        (
            &[ENEMY_ZOMBIEMAN],
            ReplacementTargets::weights([
                (ENEMY_CHAINGUNNER, 0.1),
                (THING_MEDIKIT, 0.05),
                (THING_STIMPACK, 0.1),
                (THING_HEALTH_BONUS, 0.2),
            ]),
        ),
    ];

    for (kinds, targets) in &passes {
        let candidates = level.find_things(kinds);
        let replaced = replace_kinds(&mut level.things, candidates, targets, rng);
        debug!("{}: replaced {} of {:?}", level.name, replaced, kinds);
    }
}

/// Rename free-standing lumps that Doom II expects under another name.
pub fn rename_lumps(lumps: &mut [Lump]) -> usize {
    let mut renamed = 0usize;
    for lump in lumps {
        if let Some(new_name) = replacement_lump_name(&lump.name) {
            debug!("renaming lump {} to {}", lump.name, new_name);
            lump.name = new_name.to_string();
            renamed += 1;
        }
    }
    renamed
}

/// Level-local part of the conversion: textures first, then actors.
pub fn convert_level<R: Rng + ?Sized>(level: &mut Level, rng: &mut R) {
    apply_texture_remap(level);
    apply_actor_mix(level, rng);
}

/// Convert a whole Doom archive for play in Doom II.
pub fn convert_wad(wad: &mut Wad, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for level in &mut wad.levels {
        rename_to_doom2_slot(level);
        convert_level(level, &mut rng);
    }
    rename_lumps(&mut wad.lumps);
}
