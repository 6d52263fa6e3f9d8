//! Romanian-locale display formatting for dates, amounts and distances.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Abbreviated month names, January first.
const MONTHS_SHORT: [&str; 12] = [
    "ian.", "feb.", "mar.", "apr.", "mai", "iun.", "iul.", "aug.", "sept.", "oct.", "nov.", "dec.",
];

/// Placeholder for a missing value.
pub const EMPTY_PLACEHOLDER: &str = "—";

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn month_short(dt: &NaiveDateTime) -> &'static str {
    use chrono::Datelike;
    MONTHS_SHORT[dt.month0() as usize]
}

/// `"2026-02-21"` → `"21 feb. 2026"`. Unparsable input is returned as is.
pub fn format_date(s: &str) -> String {
    use chrono::Datelike;
    match parse_iso(s) {
        Some(dt) => format!("{} {} {}", dt.day(), month_short(&dt), dt.year()),
        None => s.to_string(),
    }
}

/// `"2026-02-21T14:30:00"` → `"21 feb. 2026, 14:30"`.
pub fn format_date_time(s: &str) -> String {
    use chrono::{Datelike, Timelike};
    match parse_iso(s) {
        Some(dt) => format!(
            "{} {} {}, {:02}:{:02}",
            dt.day(),
            month_short(&dt),
            dt.year(),
            dt.hour(),
            dt.minute()
        ),
        None => s.to_string(),
    }
}

/// `"2026-02-21"` → `"21.02.2026"`; empty input → `"—"`.
pub fn format_date_short(s: &str) -> String {
    if s.trim().is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    match parse_iso(s) {
        Some(dt) => dt.format("%d.%m.%Y").to_string(),
        None => s.to_string(),
    }
}

/// Insert `.` between groups of three digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Format with a fixed number of decimals, or up to `decimals` with trailing
/// zeros trimmed.
fn format_decimal(n: f64, decimals: usize, trim: bool) -> String {
    let fixed = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = if trim {
        frac_part.trim_end_matches('0')
    } else {
        frac_part
    };

    let negative = n < 0.0 && fixed.chars().any(|c| c != '0' && c != '.');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

/// `1234.56` → `"1.234,56 RON"`.
pub fn format_currency(amount: f64) -> String {
    format!("{} RON", format_decimal(amount, 2, false))
}

/// `1234.0` → `"1.234"`; at most three decimals.
pub fn format_number(n: f64) -> String {
    format_decimal(n, 3, true)
}

/// `1234.0` → `"1.234 km"`.
pub fn format_km(km: f64) -> String {
    format!("{} km", format_number(km))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates() {
        assert_eq!(format_date("2026-02-21"), "21 feb. 2026");
        assert_eq!(format_date("2026-09-05"), "5 sept. 2026");
        assert_eq!(format_date("2026-05-01T08:00:00"), "1 mai 2026");
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn date_times() {
        assert_eq!(format_date_time("2026-02-21T14:30:00"), "21 feb. 2026, 14:30");
        assert_eq!(format_date_time("2026-02-21T09:05"), "21 feb. 2026, 09:05");
        assert_eq!(
            format_date_time("2026-02-21T14:30:00+02:00"),
            "21 feb. 2026, 14:30"
        );
        assert_eq!(format_date_time("2026-02-21"), "21 feb. 2026, 00:00");
    }

    #[test]
    fn short_dates() {
        assert_eq!(format_date_short("2026-02-21"), "21.02.2026");
        assert_eq!(format_date_short(""), "—");
        assert_eq!(format_date_short("ieri"), "ieri");
    }

    #[test]
    fn currency() {
        assert_eq!(format_currency(1234.56), "1.234,56 RON");
        assert_eq!(format_currency(0.0), "0,00 RON");
        assert_eq!(format_currency(1_000_000.0), "1.000.000,00 RON");
        assert_eq!(format_currency(-45.5), "-45,50 RON");
    }

    #[test]
    fn numbers() {
        assert_eq!(format_number(1234.0), "1.234");
        assert_eq!(format_number(320000.0), "320.000");
        assert_eq!(format_number(12.5), "12,5");
        assert_eq!(format_number(1.23456), "1,235");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn kilometres() {
        assert_eq!(format_km(1234.0), "1.234 km");
        assert_eq!(format_km(0.0), "0 km");
    }
}
