//! Inclusive calendar-day window over ticket creation time

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Ticket;

/// Calendar-day range, both ends inclusive, interpreted in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// The last `days` calendar days ending on `today`
    pub fn trailing_days(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN);
        Self::new(start, today)
    }

    pub fn is_ordered(&self) -> bool {
        self.start_date <= self.end_date
    }

    /// 00:00:00.000 UTC on the start day
    pub fn start_instant(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.start_date.and_time(NaiveTime::MIN))
    }

    /// 23:59:59.999 UTC on the end day
    pub fn end_instant(&self) -> DateTime<Utc> {
        let day_start = Utc.from_utc_datetime(&self.end_date.and_time(NaiveTime::MIN));
        day_start
            .checked_add_signed(Duration::days(1) - Duration::milliseconds(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Inclusive at both ends
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start_instant() <= instant && instant <= self.end_instant()
    }

    /// Tickets created inside the window, in their original order
    pub fn filter<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
        tickets.iter().filter(|t| self.contains(t.created_at)).collect()
    }
}
