use chrono::NaiveDate;

const ISO_DATE: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE).ok()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(ISO_DATE).to_string()
}

/// The calendar day after `s`, as an ISO date string.
pub fn next_day(s: &str) -> Option<String> {
    parse_date(s)
        .and_then(|d| d.succ_opt())
        .map(format_date)
}

/// "Sat, Oct 18" style label used in visitor listings.
/// Falls back to the raw value when it is not a valid ISO date.
pub fn display_date(s: &str) -> String {
    match parse_date(s) {
        Some(d) => d.format("%a, %b %-d").to_string(),
        None => s.to_string(),
    }
}
