//! Player-name prompt run once before the game loop starts.

use std::io::{BufRead, Write};

use crate::error::GameError;

pub const MAX_NAME_LEN: usize = 20;
pub const MAX_ATTEMPTS: u32 = 3;

/// Check a trimmed name: 1 to `MAX_NAME_LEN` characters.
pub fn validate_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Name cannot be empty. Please try again.".to_string());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!(
            "Name is too long (max {MAX_NAME_LEN} characters). Please try again."
        ));
    }
    Ok(name.to_string())
}

/// Ask for a name until a valid one arrives.
///
/// `Ok(None)` means the user cancelled (end of input).  Running out of
/// attempts is an `InvalidInput` error.
pub fn prompt_name<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Option<String>, GameError> {
    let io_err = |e: std::io::Error| GameError::InvalidInput(e.to_string());

    for _ in 0..MAX_ATTEMPTS {
        writeln!(out, "\n=== AIRFORCE ===").map_err(io_err)?;
        write!(out, "Enter your name (1-{MAX_NAME_LEN} characters): ").map_err(io_err)?;
        out.flush().map_err(io_err)?;

        let mut raw = Vec::new();
        if input.read_until(b'\n', &mut raw).map_err(io_err)? == 0 {
            writeln!(out, "\nGame cancelled by user.").map_err(io_err)?;
            return Ok(None);
        }
        let Ok(line) = String::from_utf8(raw) else {
            writeln!(out, "Name must be valid text. Please try again.").map_err(io_err)?;
            continue;
        };

        match validate_name(&line) {
            Ok(name) => return Ok(Some(name)),
            Err(msg) => writeln!(out, "{msg}").map_err(io_err)?,
        }
    }

    writeln!(out, "Too many invalid attempts. Exiting game.").map_err(io_err)?;
    Err(GameError::InvalidInput(format!(
        "no valid name after {MAX_ATTEMPTS} attempts"
    )))
}
