use super::new_id;
use crate::files::ImageRef;
use crate::utils::{date, time};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One scheduled visit.
///
/// Times and date are kept as their stored text ("HH:MM", "YYYY-MM-DD") so a
/// single bad value in an imported backup does not make the whole visitor
/// list unreadable; typed accessors parse on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    /// Blank for records stored without one; migration assigns it.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub id_image_uri: ImageRef,
    pub arrival: String,
    pub departure: String,
    #[serde(default = "today_iso")]
    pub date: String,
}

fn today_iso() -> String {
    date::format_date(date::today())
}

impl Visitor {
    pub fn new(
        name: &str,
        id_image_uri: ImageRef,
        arrival: NaiveTime,
        departure: NaiveTime,
        day: NaiveDate,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.to_string(),
            id_image_uri,
            arrival: time::store_time(arrival),
            departure: time::store_time(departure),
            date: date::format_date(day),
        }
    }

    pub fn arrival_time(&self) -> Option<NaiveTime> {
        time::parse_time(&self.arrival)
    }

    pub fn departure_time(&self) -> Option<NaiveTime> {
        time::parse_time(&self.departure)
    }

    pub fn visit_date(&self) -> Option<NaiveDate> {
        date::parse_date(&self.date)
    }

    /// (arrival, departure) in 12-hour form, "--:--" when unreadable.
    pub fn display_times(&self) -> (String, String) {
        (
            time::display_time(&self.arrival),
            time::display_time(&self.departure),
        )
    }
}
