//! Month, week and day buckets for the meeting calendar.
//!
//! Weeks start on Sunday. Grids are built from the meetings handed in; no
//! recurrence is computed.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Timelike};

use crate::models::Meeting;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    /// False for the leading and trailing days that pad a month grid.
    pub in_current_month: bool,
    pub meetings: Vec<&'a Meeting>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourSlot<'a> {
    pub hour: u32,
    pub meetings: Vec<&'a Meeting>,
}

/// Meetings keyed by start date, each bucket in start order.
pub fn group_by_date(meetings: &[Meeting]) -> BTreeMap<NaiveDate, Vec<&Meeting>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Meeting>> = BTreeMap::new();
    for meeting in meetings {
        days.entry(meeting.data_hora_inicio.date()).or_default().push(meeting);
    }
    for bucket in days.values_mut() {
        bucket.sort_by_key(|m| m.data_hora_inicio);
    }
    days
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Whole weeks covering the month of `anchor`. Returns an empty grid only
/// if the month cannot be represented.
pub fn month_grid(meetings: &[Meeting], anchor: NaiveDate) -> Vec<Vec<CalendarDay<'_>>> {
    let Some(first) = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1) else {
        return Vec::new();
    };
    let by_date = group_by_date(meetings);

    let mut weeks = Vec::new();
    let mut day = week_start(first);
    loop {
        let week: Vec<CalendarDay<'_>> = (0..7)
            .map(|offset| {
                let date = day + Duration::days(offset);
                calendar_day(&by_date, date, date.month() == first.month())
            })
            .collect();
        weeks.push(week);
        day += Duration::days(7);
        if day.month() != first.month() || day.year() != first.year() {
            break;
        }
    }
    weeks
}

/// The seven days of the week containing `anchor`.
pub fn week_days(meetings: &[Meeting], anchor: NaiveDate) -> Vec<CalendarDay<'_>> {
    let by_date = group_by_date(meetings);
    let start = week_start(anchor);
    (0..7)
        .map(|offset| calendar_day(&by_date, start + Duration::days(offset), true))
        .collect()
}

/// One slot per hour of `date` from `first_hour` to `last_hour` inclusive.
/// Meetings outside the range are left out.
pub fn day_slots(meetings: &[Meeting], date: NaiveDate, first_hour: u32, last_hour: u32) -> Vec<HourSlot<'_>> {
    let todays = super::todays_meetings(meetings, date);
    (first_hour..=last_hour.min(23))
        .map(|hour| HourSlot {
            hour,
            meetings: todays
                .iter()
                .copied()
                .filter(|m| m.data_hora_inicio.hour() == hour)
                .collect(),
        })
        .collect()
}

/// Grid header labels, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

fn calendar_day<'a>(
    by_date: &BTreeMap<NaiveDate, Vec<&'a Meeting>>,
    date: NaiveDate,
    in_current_month: bool,
) -> CalendarDay<'a> {
    CalendarDay {
        date,
        in_current_month,
        meetings: by_date.get(&date).cloned().unwrap_or_default(),
    }
}
