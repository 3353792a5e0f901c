use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::resource::Resource;
use super::wire::{self, non_blank};
use crate::auth::validate::{self, Checks, FieldError};

/// Canonical room states are LIVRE, OCUPADA and RESERVADA. MANUTENCAO comes
/// from an older backend contract and is accepted on read only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    #[default]
    Livre,
    Ocupada,
    Reservada,
    Manutencao,
    #[serde(other)]
    Unknown,
}

impl RoomStatus {
    /// States a form may offer.
    pub const SELECTABLE: [RoomStatus; 3] =
        [RoomStatus::Livre, RoomStatus::Ocupada, RoomStatus::Reservada];

    pub fn as_str(self) -> &'static str {
        match self {
            RoomStatus::Livre => "LIVRE",
            RoomStatus::Ocupada => "OCUPADA",
            RoomStatus::Reservada => "RESERVADA",
            RoomStatus::Manutencao => "MANUTENCAO",
            RoomStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoomStatus::Livre => "Livre",
            RoomStatus::Ocupada => "Ocupada",
            RoomStatus::Reservada => "Reservada",
            RoomStatus::Manutencao => "Manutenção",
            RoomStatus::Unknown => "Desconhecido",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub capacidade: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localizacao: Option<String>,
    #[serde(default, deserialize_with = "wire::string_list")]
    pub recursos: Vec<String>,
    #[serde(default)]
    pub status: RoomStatus,
    #[serde(default, with = "wire::opt_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "wire::opt_datetime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomDraft {
    pub nome: String,
    pub capacidade: i64,
    pub localizacao: String,
    pub recursos: Vec<String>,
    pub status: RoomStatus,
}

impl RoomDraft {
    /// Split a free-text resource field ("projetor, tv") into the list form.
    pub fn set_recursos_text(&mut self, text: &str) {
        self.recursos = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub nome: String,
    pub capacidade: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localizacao: Option<String>,
    pub recursos: Vec<String>,
    pub status: RoomStatus,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacidade: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localizacao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recursos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
}

fn clean_recursos(recursos: &[String]) -> Vec<String> {
    recursos.iter().filter_map(|r| non_blank(r)).collect()
}

/// Legacy and unknown states are never written back.
fn writable_status(status: RoomStatus) -> RoomStatus {
    if RoomStatus::SELECTABLE.contains(&status) {
        status
    } else {
        RoomStatus::default()
    }
}

impl Resource for Room {
    type Draft = RoomDraft;
    type NewPayload = NewRoom;
    type Patch = RoomPatch;

    const COLLECTION: &'static str = "salas";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> RoomDraft {
        RoomDraft {
            nome: self.nome.clone(),
            capacidade: self.capacidade,
            localizacao: self.localizacao.clone().unwrap_or_default(),
            recursos: self.recursos.clone(),
            status: self.status,
        }
    }

    fn validate(draft: &RoomDraft) -> Vec<FieldError> {
        let mut checks = Checks::new();
        checks
            .check("nome", validate::validate_required(&draft.nome, "Nome", 120))
            .check("capacidade", validate::validate_positive(draft.capacidade, "Capacidade"))
            .check(
                "localizacao",
                validate::validate_optional(&draft.localizacao, "Localização", 200),
            );
        checks.finish()
    }

    fn new_payload(draft: &RoomDraft) -> NewRoom {
        NewRoom {
            nome: draft.nome.trim().to_string(),
            capacidade: draft.capacidade,
            localizacao: non_blank(&draft.localizacao),
            recursos: clean_recursos(&draft.recursos),
            status: writable_status(draft.status),
        }
    }

    fn patch(draft: &RoomDraft) -> RoomPatch {
        RoomPatch {
            nome: non_blank(&draft.nome),
            capacidade: Some(draft.capacidade),
            localizacao: non_blank(&draft.localizacao),
            recursos: Some(clean_recursos(&draft.recursos)),
            // A legacy state is left alone on the backend rather than overwritten.
            status: RoomStatus::SELECTABLE
                .contains(&draft.status)
                .then_some(draft.status),
        }
    }
}
