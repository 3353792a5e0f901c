//! Read-only projections over a controller's list.
//!
//! Everything here is a pure function of its inputs: no state, no I/O, and
//! the source slices are never modified.

pub mod calendar;
pub mod dashboard;
pub mod status;

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{Meeting, Task};

/// Meetings starting at or after `now`, soonest first, at most `limit`.
pub fn upcoming_meetings(meetings: &[Meeting], now: NaiveDateTime, limit: Option<usize>) -> Vec<&Meeting> {
    let mut upcoming: Vec<&Meeting> = meetings
        .iter()
        .filter(|m| m.data_hora_inicio >= now)
        .collect();
    upcoming.sort_by_key(|m| m.data_hora_inicio);
    if let Some(limit) = limit {
        upcoming.truncate(limit);
    }
    upcoming
}

/// Tasks not yet marked done, in list order, at most `limit`.
pub fn pending_tasks(tasks: &[Task], limit: Option<usize>) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| !t.concluida)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Pending tasks ordered by deadline (undated last), then priority.
pub fn pending_tasks_by_deadline(tasks: &[Task], limit: Option<usize>) -> Vec<&Task> {
    let mut pending = pending_tasks(tasks, None);
    pending.sort_by_key(|t| {
        (
            t.prazo.is_none(),
            t.prazo,
            t.prioridade.map_or(u8::MAX, |p| p.rank()),
        )
    });
    if let Some(limit) = limit {
        pending.truncate(limit);
    }
    pending
}

/// Meetings whose start falls on `today`, in start order.
pub fn todays_meetings(meetings: &[Meeting], today: NaiveDate) -> Vec<&Meeting> {
    let mut todays: Vec<&Meeting> = meetings
        .iter()
        .filter(|m| m.data_hora_inicio.date() == today)
        .collect();
    todays.sort_by_key(|m| m.data_hora_inicio);
    todays
}
