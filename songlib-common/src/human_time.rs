//! Human-readable song durations
//!
//! Durations are stored as whole seconds and shown as `M:SS`, where the
//! minutes part is not wrapped into hours (`3661` → `61:01`).

/// Format seconds as `M:SS`
///
/// # Examples
///
/// ```
/// use songlib_common::human_time::format_duration;
///
/// assert_eq!(format_duration(0), "0:00");
/// assert_eq!(format_duration(185), "3:05");
/// assert_eq!(format_duration(3661), "61:01");
/// ```
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Parse a duration typed by the user
///
/// Splits on `:`. With exactly two parts the result is
/// `minutes * 60 + seconds`, each unparseable part counting as 0. Any other
/// shape is read as a raw number of seconds, 0 when unparseable. Negative
/// totals clamp to 0.
///
/// Each part is read like a lenient integer prompt: leading whitespace and an
/// optional sign, then leading digits; trailing garbage is ignored.
///
/// # Examples
///
/// ```
/// use songlib_common::human_time::parse_duration;
///
/// assert_eq!(parse_duration("3:05"), 185);
/// assert_eq!(parse_duration("61:01"), 3661);
/// assert_eq!(parse_duration("245"), 245);
/// assert_eq!(parse_duration("x:30"), 30);
/// assert_eq!(parse_duration("1:2:3"), 1);
/// assert_eq!(parse_duration("abc"), 0);
/// ```
pub fn parse_duration(input: &str) -> u32 {
    let parts: Vec<&str> = input.split(':').collect();
    let total = if parts.len() == 2 {
        let minutes = parse_leading_int(parts[0]).unwrap_or(0);
        let seconds = parse_leading_int(parts[1]).unwrap_or(0);
        minutes.saturating_mul(60).saturating_add(seconds)
    } else {
        parse_leading_int(input).unwrap_or(0)
    };

    total.clamp(0, u32::MAX as i64) as u32
}

/// Read an optionally signed run of leading digits
///
/// Returns `None` when no digit follows the optional sign.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    // Saturate instead of failing on absurdly long input
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
