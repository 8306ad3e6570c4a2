//! Human-readable dates and text helpers shared by every page.

use crate::model::{EventDate, non_empty};

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month names used when a date has both a month and a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthStyle {
    /// "Jan 3, 1288 AD". Cards and the detail header.
    Short,
    /// "January 3, 1288 AD".
    #[default]
    Long,
}

fn era(year: i32) -> &'static str {
    if year < 0 { " BC" } else { " AD" }
}

/// "Dec 19, 1946 AD", "August 1945 AD", "2879 BC" or "Unknown date".
///
/// `month` is zero-based. A month-only date always uses the long name.
pub fn format_event_date(date: Option<&EventDate>, style: MonthStyle) -> String {
    let Some(year) = date.and_then(|d| d.year) else {
        return crate::UNKNOWN_DATE.to_string();
    };
    let abs_year = year.unsigned_abs();
    let era = era(year);
    let month = date.and_then(|d| d.month).map(|m| m as usize);
    let day = date.and_then(|d| d.day);

    match (month, day) {
        (Some(m), Some(day)) if m < 12 => {
            let name = match style {
                MonthStyle::Short => MONTHS_SHORT[m],
                MonthStyle::Long => MONTHS_LONG[m],
            };
            format!("{name} {day}, {abs_year}{era}")
        }
        (Some(m), _) if m < 12 => format!("{} {abs_year}{era}", MONTHS_LONG[m]),
        _ => format!("{abs_year}{era}"),
    }
}

/// Start date, plus " - end" when an end date exists.
pub fn format_date_span(
    date: Option<&EventDate>,
    end_date: Option<&EventDate>,
    style: MonthStyle,
) -> String {
    let start = format_event_date(date, style);
    match end_date {
        Some(end) => format!("{start} - {}", format_event_date(Some(end), style)),
        None => start,
    }
}

/// Bare year for legends: year 0 is "1 BC".
pub fn format_year(year: Option<i32>) -> String {
    match year {
        None => "Unknown".to_string(),
        Some(y) if y < 0 => format!("{} BC", y.unsigned_abs()),
        Some(0) => "1 BC".to_string(),
        Some(y) => format!("{y} AD"),
    }
}

/// "938 AD - 1009 AD", or "Various dates" unless both ends are known.
pub fn format_year_range(start: Option<i32>, end: Option<i32>) -> String {
    match (start, end) {
        (Some(_), Some(_)) => format!("{} - {}", format_year(start), format_year(end)),
        _ => "Various dates".to_string(),
    }
}

/// Compact label for map annotations and popups: display date, else year.
pub fn date_label(date: Option<&EventDate>) -> String {
    if let Some(label) = date.and_then(|d| non_empty(d.display_date.as_deref())) {
        return label.to_string();
    }
    match date.and_then(|d| d.year) {
        Some(year) => year.to_string(),
        None => "Unknown".to_string(),
    }
}

/// Split body text into paragraphs on blank lines.
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: Option<u32>, day: Option<u32>) -> EventDate {
        EventDate {
            year: Some(year),
            month,
            day,
            display_date: None,
        }
    }

    #[test]
    fn test_unknown_date() {
        assert_eq!(format_event_date(None, MonthStyle::Long), "Unknown date");
        assert_eq!(
            format_event_date(Some(&EventDate::default()), MonthStyle::Short),
            "Unknown date"
        );
    }

    #[test]
    fn test_year_only() {
        assert_eq!(format_event_date(Some(&EventDate::year(-2879)), MonthStyle::Long), "2879 BC");
        assert_eq!(format_event_date(Some(&EventDate::year(938)), MonthStyle::Short), "938 AD");
    }

    #[test]
    fn test_month_is_zero_based() {
        let d = date(1945, Some(8), Some(2));
        assert_eq!(format_event_date(Some(&d), MonthStyle::Short), "Sep 2, 1945 AD");
        assert_eq!(format_event_date(Some(&d), MonthStyle::Long), "September 2, 1945 AD");
    }

    #[test]
    fn test_month_without_day_is_long() {
        let d = date(1945, Some(7), None);
        assert_eq!(format_event_date(Some(&d), MonthStyle::Short), "August 1945 AD");
    }

    #[test]
    fn test_out_of_range_month_drops_to_year() {
        let d = date(1288, Some(12), Some(1));
        assert_eq!(format_event_date(Some(&d), MonthStyle::Long), "1288 AD");
    }

    #[test]
    fn test_date_span() {
        let start = EventDate::year(1955);
        let end = EventDate::year(1975);
        assert_eq!(
            format_date_span(Some(&start), Some(&end), MonthStyle::Long),
            "1955 AD - 1975 AD"
        );
        assert_eq!(format_date_span(Some(&start), None, MonthStyle::Long), "1955 AD");
    }

    #[test]
    fn test_format_year() {
        assert_eq!(format_year(Some(-111)), "111 BC");
        assert_eq!(format_year(Some(0)), "1 BC");
        assert_eq!(format_year(Some(1010)), "1010 AD");
        assert_eq!(format_year(None), "Unknown");
    }

    #[test]
    fn test_year_range() {
        assert_eq!(format_year_range(Some(-2879), Some(-258)), "2879 BC - 258 BC");
        assert_eq!(format_year_range(Some(939), None), "Various dates");
    }

    #[test]
    fn test_date_label() {
        let d = EventDate {
            display_date: Some("Spring 938".into()),
            ..EventDate::year(938)
        };
        assert_eq!(date_label(Some(&d)), "Spring 938");
        assert_eq!(date_label(Some(&EventDate::year(-40))), "-40");
        assert_eq!(date_label(None), "Unknown");
    }

    #[test]
    fn test_paragraphs() {
        let text = "First.\n\n  Second line.\n\n\n\nThird.";
        assert_eq!(paragraphs(text), ["First.", "Second line.", "Third."]);
        assert!(paragraphs("").is_empty());
    }
}
