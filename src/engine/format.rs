//! Display formatting for remaining time
//!
//! Precision is tiered so coarse time scales don't jitter with hundredths:
//! - >= 1 hour:    H:MM:SS
//! - >= 10 min:    M:SS
//! - >= 1 minute:  M:SS.t
//! - <  1 minute:  SS.hh

/// Format a remaining-seconds value for display.
///
/// The input is rounded to whole hundredths first and the tier is chosen
/// from the rounded value, so the printed digits are stable and never a
/// float truncation artifact (9.07 prints as "09.07", not "09.06").
pub fn format_time(seconds: f64) -> String {
    let total_hundredths = (seconds.max(0.0) * 100.0).round() as u64;
    let total_seconds = total_hundredths / 100;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        return format!("{hours}:{minutes:02}:{secs:02}");
    }
    if total_seconds < 60 {
        let hundredths = total_hundredths % 100;
        return format!("{secs:02}.{hundredths:02}");
    }
    if total_seconds < 600 {
        let tenths = (total_hundredths % 100) / 10;
        return format!("{minutes}:{secs:02}.{tenths}");
    }
    format!("{minutes}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tiers() {
        assert_eq!(format_time(3661.0), "1:01:01");
        assert_eq!(format_time(605.0), "10:05");
        assert_eq!(format_time(65.3), "1:05.3");
        assert_eq!(format_time(9.07), "09.07");
    }

    #[test]
    fn test_format_tier_boundaries() {
        assert_eq!(format_time(3600.0), "1:00:00");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(599.99), "9:59.9");
        assert_eq!(format_time(60.0), "1:00.0");
        assert_eq!(format_time(59.99), "59.99");
        assert_eq!(format_time(0.0), "00.00");
    }

    #[test]
    fn test_format_rounds_to_hundredths() {
        // Rounding can promote the value into the next tier; the printed
        // string must agree with itself either way
        assert_eq!(format_time(59.999), "1:00.0");
        assert_eq!(format_time(0.004), "00.00");
        assert_eq!(format_time(0.005), "00.01");
    }

    #[test]
    fn test_format_clamps_negative() {
        assert_eq!(format_time(-0.3), "00.00");
    }
}
