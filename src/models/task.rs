use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::resource::Resource;
use super::wire::{self, non_blank};
use crate::auth::validate::{self, Checks, FieldError};

/// Task phase relative to its meeting. The wire name is `statusTarefa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    PreReuniao,
    PosReuniao,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// The only values the backend accepts.
    pub const ALLOWED: [TaskStatus; 2] = [TaskStatus::PreReuniao, TaskStatus::PosReuniao];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::PreReuniao => "PRE_REUNIAO",
            TaskStatus::PosReuniao => "POS_REUNIAO",
            TaskStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::PreReuniao => "Pré-reunião",
            TaskStatus::PosReuniao => "Pós-reunião",
            TaskStatus::Unknown => "Desconhecido",
        }
    }

    /// `None` for anything outside [`TaskStatus::ALLOWED`].
    pub fn parse_allowed(raw: &str) -> Option<TaskStatus> {
        let raw = raw.trim();
        Self::ALLOWED
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Baixa,
    Media,
    Alta,
    #[serde(other)]
    Unknown,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Baixa => "BAIXA",
            TaskPriority::Media => "MEDIA",
            TaskPriority::Alta => "ALTA",
            TaskPriority::Unknown => "UNKNOWN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskPriority::Baixa => "Baixa",
            TaskPriority::Media => "Média",
            TaskPriority::Alta => "Alta",
            TaskPriority::Unknown => "Desconhecida",
        }
    }

    /// Sort key, most urgent first.
    pub fn rank(self) -> u8 {
        match self {
            TaskPriority::Alta => 0,
            TaskPriority::Media => 1,
            TaskPriority::Baixa => 2,
            TaskPriority::Unknown => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_tarefa: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prioridade: Option<TaskPriority>,
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none")]
    pub responsavel_id: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none")]
    pub reuniao_id: Option<String>,
    #[serde(default, with = "wire::opt_date", skip_serializing_if = "Option::is_none")]
    pub prazo: Option<NaiveDate>,
    #[serde(default)]
    pub concluida: bool,
}

/// Task form state. `status_tarefa` and `prazo` hold the raw input text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub descricao: String,
    pub status_tarefa: String,
    pub prioridade: Option<TaskPriority>,
    pub responsavel_id: String,
    pub reuniao_id: String,
    pub prazo: String,
    pub concluida: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub descricao: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_tarefa: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioridade: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsavel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reuniao_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "wire::opt_date")]
    pub prazo: Option<NaiveDate>,
    pub concluida: bool,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_tarefa: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioridade: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsavel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reuniao_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "wire::opt_date")]
    pub prazo: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concluida: Option<bool>,
}

impl TaskPatch {
    pub fn completed(concluida: bool) -> Self {
        TaskPatch {
            concluida: Some(concluida),
            ..Default::default()
        }
    }
}

fn known_priority(p: Option<TaskPriority>) -> Option<TaskPriority> {
    p.filter(|p| *p != TaskPriority::Unknown)
}

impl Resource for Task {
    type Draft = TaskDraft;
    type NewPayload = NewTask;
    type Patch = TaskPatch;

    const COLLECTION: &'static str = "tarefas";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            descricao: self.descricao.clone(),
            status_tarefa: self
                .status_tarefa
                .filter(|s| *s != TaskStatus::Unknown)
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            prioridade: self.prioridade,
            responsavel_id: self.responsavel_id.clone().unwrap_or_default(),
            reuniao_id: self.reuniao_id.clone().unwrap_or_default(),
            prazo: self
                .prazo
                .map(|d| d.format(wire::DATE_FORMAT).to_string())
                .unwrap_or_default(),
            concluida: self.concluida,
        }
    }

    fn validate(draft: &TaskDraft) -> Vec<FieldError> {
        let mut checks = Checks::new();
        checks
            .check("descricao", validate::validate_required(&draft.descricao, "Descrição", 1000))
            .check("prazo", validate::validate_optional_date(&draft.prazo, "Prazo"));
        checks.finish()
    }

    fn new_payload(draft: &TaskDraft) -> NewTask {
        NewTask {
            descricao: draft.descricao.trim().to_string(),
            status_tarefa: TaskStatus::parse_allowed(&draft.status_tarefa),
            prioridade: known_priority(draft.prioridade),
            responsavel_id: non_blank(&draft.responsavel_id),
            reuniao_id: non_blank(&draft.reuniao_id),
            prazo: wire::parse_date(&draft.prazo),
            concluida: draft.concluida,
        }
    }

    fn patch(draft: &TaskDraft) -> TaskPatch {
        TaskPatch {
            descricao: non_blank(&draft.descricao),
            status_tarefa: TaskStatus::parse_allowed(&draft.status_tarefa),
            prioridade: known_priority(draft.prioridade),
            responsavel_id: non_blank(&draft.responsavel_id),
            reuniao_id: non_blank(&draft.reuniao_id),
            prazo: wire::parse_date(&draft.prazo),
            concluida: Some(draft.concluida),
        }
    }
}
