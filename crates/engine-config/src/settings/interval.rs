use std::time::Duration;
use tracing::warn;

/// Parses a duration string such as `"5s"`, `"250ms"` or `"1m 30s"`.
///
/// Missing, unparsable and zero durations all resolve to `default`; the
/// latter two are logged since they usually point at a typo.
pub fn parse_interval(field: &str, raw: Option<&str>, default: Duration) -> Duration {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };

    match humantime::parse_duration(raw) {
        Ok(duration) if !duration.is_zero() => duration,
        Ok(_) => {
            warn!(field, value = raw, ?default, "Zero duration, using default");
            default
        }
        Err(err) => {
            warn!(field, value = raw, ?default, error = %err, "Unparsable duration, using default");
            default
        }
    }
}
