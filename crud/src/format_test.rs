use super::*;

#[test]
fn datetime_matches_dashboard_style() {
    assert_eq!(format_datetime("2025-07-28T19:00:00Z"), "28 Jul 2025, 7:00 PM");
    assert_eq!(format_datetime("2025-07-05T09:30:00+05:00"), "05 Jul 2025, 9:30 AM");
}

#[test]
fn datetime_accepts_naive_timestamps() {
    assert_eq!(format_datetime("2025-01-02T00:15:00"), "02 Jan 2025, 12:15 AM");
    assert_eq!(format_datetime("2025-01-02T12:05"), "02 Jan 2025, 12:05 PM");
}

#[test]
fn datetime_passes_garbage_through() {
    assert_eq!(format_datetime("next tuesday"), "next tuesday");
    assert_eq!(format_datetime(""), "");
}

#[test]
fn date_formats_plain_and_full_timestamps() {
    assert_eq!(format_date("2025-07-28"), "28 Jul 2025");
    assert_eq!(format_date("2025-07-28T19:00:00Z"), "28 Jul 2025");
    assert_eq!(format_date("2025-07-28T19:00:00.123456"), "28 Jul 2025");
}

#[test]
fn date_passes_garbage_through() {
    assert_eq!(format_date("28/07/2025"), "28/07/2025");
}

#[test]
fn bytes_scale_and_trim() {
    assert_eq!(format_bytes(0), "0 B");
    assert_eq!(format_bytes(512), "512 B");
    assert_eq!(format_bytes(1024), "1 KB");
    assert_eq!(format_bytes(1536), "1.5 KB");
    assert_eq!(format_bytes(1_234_567), "1.18 MB");
    assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5 GB");
    assert_eq!(format_bytes(1_048_575), "1 MB");
    assert_eq!(format_bytes(1023), "1023 B");
}

#[test]
fn bytes_cap_at_terabytes() {
    assert_eq!(format_bytes(2048 * 1024 * 1024 * 1024 * 1024), "2048 TB");
}
