use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use chrono::{Local, Utc};

use crate::errors::{AppError, render};
use crate::models::{Meeting, Person, Room, Task};
use crate::store::MockStore;
use crate::templates_structs::{DashboardTemplate, MeetingRow, StatusBar, TaskRow};
use crate::views::{self, dashboard};

const UPCOMING_LIMIT: usize = 5;
const PENDING_LIMIT: usize = 5;

/// GET /dashboard
pub async fn index(store: web::Data<MockStore>) -> Result<HttpResponse, AppError> {
    let people: Vec<Person> = store.typed();
    let rooms: Vec<Room> = store.typed();
    let meetings: Vec<Meeting> = store.typed();
    let tasks: Vec<Task> = store.typed();

    let now = Utc::now().naive_utc();
    let room_names: HashMap<&str, &str> = rooms.iter().map(|r| (r.id.as_str(), r.nome.as_str())).collect();
    let row = |m: &Meeting| MeetingRow::new(m, m.sala_id.as_deref().and_then(|id| room_names.get(id).copied()));

    let summary = dashboard::summary(&people, &rooms, &meetings, &tasks);

    let tmpl = DashboardTemplate {
        generated_at: Local::now().format("%d/%m/%Y %H:%M").to_string(),
        meeting_bars: StatusBar::meetings(&summary.meetings_by_status),
        room_bars: StatusBar::rooms(&summary.rooms_by_status),
        todays_meetings: views::todays_meetings(&meetings, now.date())
            .into_iter()
            .map(row)
            .collect(),
        upcoming_meetings: views::upcoming_meetings(&meetings, now, Some(UPCOMING_LIMIT))
            .into_iter()
            .map(row)
            .collect(),
        pending_tasks: views::pending_tasks_by_deadline(&tasks, Some(PENDING_LIMIT))
            .into_iter()
            .map(TaskRow::new)
            .collect(),
        room_usage: dashboard::meetings_by_room(&rooms, &meetings),
        summary,
    };
    render(tmpl)
}
