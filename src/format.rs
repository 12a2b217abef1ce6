//! Human-readable size and timestamp strings for listing rows.

use chrono::{DateTime, Utc};

const SIZE_UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a byte count with binary units.
///
/// Bytes print as a whole number, every larger unit with two decimals.
/// TiB is the ceiling: anything bigger stays in TiB.
///
/// - `1023` → `"1023 B"`
/// - `1024` → `"1.00 KiB"`
/// - `1536` → `"1.50 KiB"`
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", SIZE_UNITS[unit])
}

/// Format Unix seconds as `YYYY-MM-DD HH:MM:SS` in UTC.
///
/// Seconds outside chrono's representable range render as the epoch.
pub fn format_timestamp(unix_seconds: u64) -> String {
    let dt = i64::try_from(unix_seconds)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    dt.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes() {
        assert_eq!(format_size(0), "0 B");
    }

    #[test]
    fn byte_boundary() {
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KiB");
    }

    #[test]
    fn fractional_kib() {
        assert_eq!(format_size(1536), "1.50 KiB");
    }

    #[test]
    fn mib_and_gib() {
        assert_eq!(format_size(1024 * 1024), "1.00 MiB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.00 GiB");
    }

    #[test]
    fn just_below_next_unit_stays_in_lower_unit() {
        assert_eq!(format_size(1024 * 1024 - 1), "1024.00 KiB");
    }

    #[test]
    fn tib_is_the_ceiling() {
        let one_tib = 1024u64.pow(4);
        assert_eq!(format_size(one_tib), "1.00 TiB");
        assert_eq!(format_size(one_tib * 2048), "2048.00 TiB");
        assert!(format_size(u64::MAX).ends_with(" TiB"));
    }

    #[test]
    fn epoch() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
    }

    #[test]
    fn zero_padded_fields() {
        // 2009-02-03 04:05:06 UTC
        assert_eq!(format_timestamp(1_233_633_906), "2009-02-03 04:05:06");
    }

    #[test]
    fn leap_day() {
        assert_eq!(format_timestamp(951_782_400), "2000-02-29 00:00:00");
    }

    #[test]
    fn end_of_day() {
        assert_eq!(format_timestamp(1_700_006_399), "2023-11-14 23:59:59");
    }

    #[test]
    fn out_of_range_falls_back_to_epoch() {
        assert_eq!(format_timestamp(u64::MAX), "1970-01-01 00:00:00");
    }
}
