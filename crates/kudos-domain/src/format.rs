//! Formatting of review age and star ratings

/// Glyph repeated once per whole rating point
pub const STAR_GLYPH: &str = "⭐";

/// Most stars a rating can render
pub const MAX_STARS: usize = 5;

const SECS_PER_DAY: u64 = 86_400;

/// Format the age of a review relative to `now`
///
/// Both arguments are Unix seconds. The elapsed time is rounded up to whole
/// days and bucketed into days (< 7), weeks (< 30), months (< 365) or years.
/// Units are pluralized only when the count is greater than one, so a review
/// from less than a day ago reads "1 day ago" and one from this very second
/// reads "0 day ago".
///
/// Returns an empty string when there is no timestamp (a zero timestamp is
/// treated as missing).
pub fn format_relative_age(timestamp: Option<i64>, now: i64) -> String {
    let timestamp = match timestamp {
        Some(ts) if ts != 0 => ts,
        _ => return String::new(),
    };

    let elapsed = now.saturating_sub(timestamp).unsigned_abs();
    let days = elapsed.div_ceil(SECS_PER_DAY);

    let (count, unit) = if days < 7 {
        (days, "day")
    } else if days < 30 {
        (days / 7, "week")
    } else if days < 365 {
        (days / 30, "month")
    } else {
        (days / 365, "year")
    };

    let plural = if count > 1 { "s" } else { "" };
    format!("{} {}{} ago", count, unit, plural)
}

/// Render a rating as a row of star glyphs
///
/// Uses the whole part of the rating only: 4.9 renders four stars. Ratings
/// below one (and non-finite values) render nothing; ratings past the scale
/// render [`MAX_STARS`].
pub fn render_stars(rating: f64) -> String {
    if !rating.is_finite() || rating < 1.0 {
        return String::new();
    }
    STAR_GLYPH.repeat((rating.floor() as usize).min(MAX_STARS))
}
