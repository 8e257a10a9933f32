//! Timestamp helpers for results filenames

use chrono::{DateTime, Local, TimeZone};

/// Format a results filename from a timestamp: `YYYYMMDDHHMMSS.csv`,
/// zero-padded, second resolution.
pub fn results_filename<Tz: TimeZone>(t: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}.csv", t.format("%Y%m%d%H%M%S"))
}

/// Results filename for the current local time
pub fn results_filename_now() -> String {
    results_filename(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_zero_padded_to_second_resolution() {
        let t = chrono::Utc.with_ymd_and_hms(2026, 3, 7, 4, 5, 6).unwrap();
        assert_eq!(results_filename(&t), "20260307040506.csv");
    }

    #[test]
    fn filename_now_has_expected_shape() {
        let name = results_filename_now();
        assert_eq!(name.len(), "YYYYMMDDHHMMSS.csv".len());
        assert!(name.ends_with(".csv"));
        assert!(name[..14].chars().all(|c| c.is_ascii_digit()));
    }
}
