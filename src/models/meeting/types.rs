use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::wire;

/// Lifecycle of a meeting. See [`MeetingStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    #[default]
    Agendada,
    EmAndamento,
    Finalizada,
    Cancelada,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default)]
    pub titulo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pauta: Option<String>,
    #[serde(with = "wire::datetime")]
    pub data_hora_inicio: NaiveDateTime,
    #[serde(default)]
    pub duracao_minutos: i64,
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none")]
    pub sala_id: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none")]
    pub organizador_id: Option<String>,
    #[serde(default, deserialize_with = "wire::id_list")]
    pub participantes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ata_reuniao: Option<String>,
    #[serde(default)]
    pub status: MeetingStatus,
    #[serde(default, with = "wire::opt_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "wire::opt_datetime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Meeting {
    pub fn ends_at(&self) -> NaiveDateTime {
        self.data_hora_inicio + chrono::Duration::minutes(self.duracao_minutos.max(0))
    }
}

/// Meeting form state. `duracao` and `data_hora_inicio` hold the raw input text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingDraft {
    pub titulo: String,
    pub descricao: String,
    pub pauta: String,
    pub data_hora_inicio: String,
    pub duracao: String,
    pub sala_id: String,
    pub organizador_id: String,
    pub participantes: Vec<String>,
    pub ata_reuniao: String,
    /// Shown in the form; never written back on create or update.
    pub status: Option<MeetingStatus>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pauta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_hora_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duracao_minutos: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sala_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizador_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participantes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ata_reuniao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MeetingStatus>,
}

impl MeetingPatch {
    pub fn status(status: MeetingStatus) -> Self {
        MeetingPatch {
            status: Some(status),
            ..Default::default()
        }
    }
}
