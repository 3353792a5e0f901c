//! Aggregates for the dashboard charts.

use std::collections::HashMap;

use crate::models::{Meeting, MeetingStatus, Person, PersonStatus, Room, RoomStatus, Task};

/// One bar of a status chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: String,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomUsage {
    pub room_id: String,
    pub room_name: String,
    pub meetings: usize,
    pub booked_minutes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_people: usize,
    pub active_people: usize,
    pub total_rooms: usize,
    pub free_rooms: usize,
    pub total_meetings: usize,
    pub total_tasks: usize,
    pub pending_tasks: usize,
    pub meetings_by_status: Vec<StatusCount>,
    pub rooms_by_status: Vec<StatusCount>,
}

pub fn summary(people: &[Person], rooms: &[Room], meetings: &[Meeting], tasks: &[Task]) -> DashboardSummary {
    let meetings_by_status = MeetingStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status: status.as_str().to_string(),
            label: status.label().to_string(),
            count: meetings.iter().filter(|m| m.status == status).count(),
        })
        .collect();

    let rooms_by_status = RoomStatus::SELECTABLE
        .into_iter()
        .map(|status| StatusCount {
            status: status.as_str().to_string(),
            label: status.label().to_string(),
            count: rooms.iter().filter(|r| r.status == status).count(),
        })
        .collect();

    DashboardSummary {
        total_people: people.len(),
        active_people: people.iter().filter(|p| p.status == PersonStatus::Ativo).count(),
        total_rooms: rooms.len(),
        free_rooms: rooms.iter().filter(|r| r.status == RoomStatus::Livre).count(),
        total_meetings: meetings.len(),
        total_tasks: tasks.len(),
        pending_tasks: tasks.iter().filter(|t| !t.concluida).count(),
        meetings_by_status,
        rooms_by_status,
    }
}

/// Meetings and booked minutes per room, busiest first. Cancelled meetings
/// and meetings pointing at unknown rooms are not counted.
pub fn meetings_by_room(rooms: &[Room], meetings: &[Meeting]) -> Vec<RoomUsage> {
    let mut tally: HashMap<&str, (usize, i64)> = HashMap::new();
    for meeting in meetings.iter().filter(|m| m.status != MeetingStatus::Cancelada) {
        if let Some(sala_id) = meeting.sala_id.as_deref() {
            let entry = tally.entry(sala_id).or_default();
            entry.0 += 1;
            entry.1 += meeting.duracao_minutos.max(0);
        }
    }

    let mut usage: Vec<RoomUsage> = rooms
        .iter()
        .map(|room| {
            let (meetings, booked_minutes) = tally.get(room.id.as_str()).copied().unwrap_or_default();
            RoomUsage {
                room_id: room.id.clone(),
                room_name: room.nome.clone(),
                meetings,
                booked_minutes,
            }
        })
        .collect();
    usage.sort_by(|a, b| b.meetings.cmp(&a.meetings).then_with(|| a.room_name.cmp(&b.room_name)));
    usage
}
