use crate::models::Visitor;
use crate::utils::date;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Visitors split around a reference day. Every visitor lands in exactly one
/// of the three lists; each list is sorted by (date, arrival) ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub today: Vec<Visitor>,
    pub upcoming: Vec<Visitor>,
    pub previous: Vec<Visitor>,
    upcoming_limit: usize,
    previous_limit: usize,
}

/// (date, arrival) ordering on the stored ISO text, which sorts
/// chronologically for well-formed values.
pub fn by_date_then_arrival(a: &Visitor, b: &Visitor) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.arrival.cmp(&b.arrival))
}

impl Partition {
    pub fn split(
        visitors: &[Visitor],
        today: NaiveDate,
        upcoming_limit: usize,
        previous_limit: usize,
    ) -> Self {
        let today = date::format_date(today);

        let mut sorted = visitors.to_vec();
        sorted.sort_by(by_date_then_arrival);

        let mut p = Partition {
            upcoming_limit,
            previous_limit,
            ..Default::default()
        };

        for v in sorted {
            match v.date.as_str().cmp(today.as_str()) {
                Ordering::Equal => p.today.push(v),
                Ordering::Greater => p.upcoming.push(v),
                Ordering::Less => p.previous.push(v),
            }
        }

        p
    }

    /// The soonest upcoming visits.
    pub fn upcoming_shown(&self) -> &[Visitor] {
        let n = self.upcoming.len().min(self.upcoming_limit);
        &self.upcoming[..n]
    }

    /// The most recent past visits, still in ascending order.
    pub fn previous_shown(&self) -> &[Visitor] {
        let start = self.previous.len().saturating_sub(self.previous_limit);
        &self.previous[start..]
    }

    pub fn len(&self) -> usize {
        self.today.len() + self.upcoming.len() + self.previous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
