//! Identifier normalization.
//!
//! Turns a human readable name (`"Main Menu"`, `"myHUD"`, `"multi-word-name"`)
//! into an upper snake case constant name (`MAIN_MENU`, `MY_HUD`,
//! `MULTI_WORD_NAME`).
//!
//! An underscore is inserted at the first transition into an uppercase run
//! and at the first space of a run of spaces. Spaces themselves are never
//! copied. The first character is always kept verbatim, so a name starting
//! with a space or hyphen yields an identifier starting with that artifact.

use crate::error::{GenerateError, GenerateResult};

/// Normalize a raw name into a constant identifier.
///
/// Fails only for empty input.
pub fn normalize(raw: &str) -> GenerateResult<String> {
    let input: Vec<char> = raw.chars().map(|c| if c == '-' { '_' } else { c }).collect();

    let Some((&first, rest)) = input.split_first() else {
        return Err(GenerateError::malformed(raw, "name is empty"));
    };

    let mut output = String::with_capacity(raw.len() + 4);
    output.push(first);

    let mut prev = first;
    for &current in rest {
        if starts_segment(prev, current) {
            output.push('_');
        }
        if current != ' ' {
            output.push(current);
        }
        prev = current;
    }

    Ok(output.to_uppercase())
}

/// Whether `current` opens a new underscore-separated segment after `prev`.
fn starts_segment(prev: char, current: char) -> bool {
    if prev == '_' || prev == ' ' {
        return false;
    }
    if current == ' ' {
        return true;
    }
    current.is_uppercase() && !prev.is_uppercase()
}
