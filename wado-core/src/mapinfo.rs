use crate::container::Lump;
use crate::levelinfo::LevelInfo;

pub const MAPINFO_LUMP: &str = "UMAPINFO";

/// Render a UMAPINFO lump with one block per `(slot, info)` pair, in order.
pub fn render_umapinfo<'a, I>(levels: I) -> Lump
where
    I: IntoIterator<Item = (&'a str, &'a LevelInfo)>,
{
    let mut out = String::new();
    for (slot, info) in levels {
        let last = info.end_game;

        out.push_str(&format!("MAP {}\n{{\n", slot));
        out.push_str(&format!("    levelname = \"{}\"\n", info.name));
        out.push_str(&format!("    label = \"{}\"\n", info.label));
        if !last {
            out.push_str(&format!("    next = \"{}\"\n", info.next));
            out.push_str(&format!("    nextsecret = \"{}\"\n", info.next_secret));
        }
        out.push_str("    intertext = clear\n");
        out.push_str("    intertextsecret = clear\n");
        out.push_str(&format!("    endgame = {}\n", last));
        out.push_str(&format!("    endcast = {}\n", last));
        out.push_str(&format!("    nointermission = {}\n", last));
        out.push_str("    bossaction = clear\n");
        for action in &info.boss_actions {
            out.push_str(&format!("    bossaction = {}\n", action));
        }
        out.push_str("}\n\n");
    }

    Lump::new(MAPINFO_LUMP, out.into_bytes())
}
