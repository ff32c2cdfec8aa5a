use crate::{Result, WadError};

/// Width of every lump and texture name on the wire.
pub const NAME_SIZE: usize = 8;

/// Decode an 8-byte, NUL-padded name.
///
/// Only trailing NULs are dropped. Each remaining byte maps to the char with
/// the same value, so any name read from an archive encodes back to the
/// bytes it came from.
pub fn decode_name(bytes: &[u8; NAME_SIZE]) -> String {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    bytes[..end].iter().map(|&b| char::from(b)).collect()
}

/// Encode a name into its 8-byte wire form.
///
/// The name is right-padded to eight characters and every space becomes a
/// NUL, so the archive never sees space padding. Characters above U+00FF
/// have no single-byte form and are rejected like overlong names.
pub fn encode_name(name: &str) -> Result<[u8; NAME_SIZE]> {
    let invalid = || WadError::InvalidName {
        name: name.to_string(),
    };

    let mut out = [0u8; NAME_SIZE];
    for (i, ch) in name.chars().enumerate() {
        let byte = u8::try_from(ch).map_err(|_| invalid())?;
        let slot = out.get_mut(i).ok_or_else(invalid)?;
        *slot = if byte == b' ' { 0 } else { byte };
    }
    Ok(out)
}
