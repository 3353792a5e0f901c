use askama::Template;

use crate::models::{Meeting, Task};
use crate::models::wire::DATE_FORMAT;
use crate::views::dashboard::{DashboardSummary, RoomUsage, StatusCount};
use crate::views::status;

/// A meeting line, with everything the template prints already formatted.
pub struct MeetingRow {
    pub titulo: String,
    pub when: String,
    pub duracao_minutos: i64,
    pub sala: String,
    pub status_label: String,
    pub status_color: &'static str,
    pub status_icon: &'static str,
}

impl MeetingRow {
    pub fn new(meeting: &Meeting, room_name: Option<&str>) -> Self {
        MeetingRow {
            titulo: meeting.titulo.clone(),
            when: meeting.data_hora_inicio.format("%d/%m/%Y %H:%M").to_string(),
            duracao_minutos: meeting.duracao_minutos,
            sala: room_name.unwrap_or("-").to_string(),
            status_label: meeting.status.label().to_string(),
            status_color: status::meeting_status_color(meeting.status.as_str()),
            status_icon: status::meeting_status_icon(meeting.status.as_str()),
        }
    }
}

pub struct TaskRow {
    pub descricao: String,
    pub prazo: String,
    pub prioridade: String,
    pub prioridade_color: &'static str,
}

impl TaskRow {
    pub fn new(task: &Task) -> Self {
        let prioridade = task.prioridade.map(|p| p.as_str()).unwrap_or_default();
        TaskRow {
            descricao: task.descricao.clone(),
            prazo: task
                .prazo
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string()),
            prioridade: task.prioridade.map(|p| p.label().to_string()).unwrap_or_default(),
            prioridade_color: status::task_priority_color(prioridade),
        }
    }
}

/// Status chart bar with its color token resolved.
pub struct StatusBar {
    pub label: String,
    pub count: usize,
    pub color: &'static str,
}

impl StatusBar {
    pub fn meetings(counts: &[StatusCount]) -> Vec<StatusBar> {
        Self::from_counts(counts, status::meeting_status_color)
    }

    pub fn rooms(counts: &[StatusCount]) -> Vec<StatusBar> {
        Self::from_counts(counts, status::room_status_color)
    }

    fn from_counts(counts: &[StatusCount], color: fn(&str) -> &'static str) -> Vec<StatusBar> {
        counts
            .iter()
            .map(|c| StatusBar {
                label: c.label.clone(),
                count: c.count,
                color: color(&c.status),
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub generated_at: String,
    pub summary: DashboardSummary,
    pub meeting_bars: Vec<StatusBar>,
    pub room_bars: Vec<StatusBar>,
    pub todays_meetings: Vec<MeetingRow>,
    pub upcoming_meetings: Vec<MeetingRow>,
    pub pending_tasks: Vec<TaskRow>,
    pub room_usage: Vec<RoomUsage>,
}
