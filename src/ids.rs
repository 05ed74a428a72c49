//! Identifier helpers for the bounded id space `[1, MAX_ID]`.

/// Size of the browsable universe. Ids above it exist in the service
/// (alternate forms) but are never navigated to.
pub const MAX_ID: u16 = 1025;

/// Extracts the numeric id from a trailing-slash resource URL such as
/// `https://pokeapi.co/api/v2/pokemon-species/25/`.
///
/// The id is the second-to-last `/`-separated segment. Returns `None` when
/// that segment is not a number, which callers treat as "not found".
pub fn id_from_resource_url(url: &str) -> Option<u32> {
    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() < 2 {
        return None;
    }
    parts[parts.len() - 2].parse().ok()
}

/// Clamps any integer into `[1, MAX_ID]`.
pub fn clamp_id(raw: i64) -> u16 {
    if raw < 1 {
        1
    } else if raw > i64::from(MAX_ID) {
        MAX_ID
    } else {
        raw as u16
    }
}

/// Clamps free-form user input. Leading whitespace and an optional sign are
/// accepted, parsing stops at the first non-digit, and input without any
/// leading digits clamps to 1.
pub fn clamp_id_input(raw: &str) -> u16 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(10) else { break };
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(i64::from(digit));
    }

    if !seen_digit {
        return 1;
    }
    clamp_id(if negative { -value } else { value })
}

/// Whether an id lies inside the browsable universe.
pub fn in_range(id: u32) -> bool {
    (1..=u32::from(MAX_ID)).contains(&id)
}
