//! ISO-8601 duration conversion.
//!
//! The upstream reports video lengths as ISO-8601 durations (`PT1H2M3S`,
//! `P1DT30M`, ...). Anything that does not parse is reported as zero seconds.

use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^P(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    )
    .expect("valid ISO-8601 duration regex")
});

/// Convert an ISO-8601 duration string to whole seconds.
///
/// Fractional seconds are truncated. Never fails: empty, malformed or
/// overflowing input yields `0`.
pub fn duration_to_seconds(duration: &str) -> i64 {
    parse(duration.trim()).unwrap_or(0)
}

fn parse(input: &str) -> Option<i64> {
    // "P" and "PT" alone match the pattern but carry no component.
    if input.len() < 3 || input.ends_with('T') {
        return None;
    }
    let caps = ISO_DURATION.captures(input)?;

    let int = |idx: usize| -> Option<i64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse::<i64>().ok(),
            None => Some(0),
        }
    };

    let weeks = int(1)?;
    let days = int(2)?;
    let hours = int(3)?;
    let minutes = int(4)?;
    let seconds = match caps.get(5) {
        // Fraction is dropped; only the whole part can overflow.
        Some(m) => m.as_str().split('.').next()?.parse::<i64>().ok()?,
        None => 0,
    };

    weeks
        .checked_mul(7 * 24 * 3600)?
        .checked_add(days.checked_mul(24 * 3600)?)?
        .checked_add(hours.checked_mul(3600)?)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}
