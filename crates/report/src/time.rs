use chrono::{DateTime, Utc};

/// UTC wall-clock rendering of a unix timestamp (seconds).
pub fn absolute_time(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default()
}

/// Coarse age of `timestamp` relative to `now`, e.g. `"3 mins ago"`.
pub fn time_since(timestamp: u64, now: DateTime<Utc>) -> String {
    let elapsed = (now.timestamp() - i64::try_from(timestamp).unwrap_or(i64::MAX)).max(0);

    let (value, unit) = match elapsed {
        s if s < 60 => (s, "sec"),
        s if s < 3_600 => (s / 60, "min"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s => (s / 86_400, "day"),
    };
    let plural = if value == 1 { "" } else { "s" };
    format!("{value} {unit}{plural} ago")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn renders_utc_time() {
        assert_eq!(absolute_time(1_630_000_000), "2021-08-26 17:46:40 UTC");
        assert_eq!(absolute_time(u64::MAX), "");
    }

    #[test]
    fn renders_relative_age() {
        let now = at(1_000_000);
        assert_eq!(time_since(1_000_000, now), "0 secs ago");
        assert_eq!(time_since(999_999, now), "1 sec ago");
        assert_eq!(time_since(1_000_000 - 125, now), "2 mins ago");
        assert_eq!(time_since(1_000_000 - 7_200, now), "2 hours ago");
        assert_eq!(time_since(1_000_000 - 86_400, now), "1 day ago");
        // clock skew never yields a negative age
        assert_eq!(time_since(1_000_050, now), "0 secs ago");
    }
}
