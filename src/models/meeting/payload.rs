use serde::Serialize;

use super::types::{Meeting, MeetingDraft, MeetingPatch, MeetingStatus};
use crate::auth::validate::{self, Checks, FieldError};
use crate::models::resource::Resource;
use crate::models::wire::{self, non_blank};

/// Create body in the shape the backend expects.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeeting {
    pub titulo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pauta: Option<String>,
    pub data_hora_inicio: String,
    pub duracao_minutos: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sala_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizador_id: Option<String>,
    pub participantes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ata_reuniao: Option<String>,
    pub status: MeetingStatus,
}

/// Numeric parse of the raw duration input, 0 when it is not a number.
pub fn parse_duration(raw: &str) -> i64 {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        .unwrap_or(0)
}

/// Participants form a set: blanks dropped, first occurrence wins.
fn participant_set(ids: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids.iter().filter_map(|id| non_blank(id)) {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

fn normalized_start(raw: &str) -> String {
    wire::parse_datetime(raw)
        .map(|dt| wire::format_datetime(&dt))
        .unwrap_or_else(|| raw.trim().to_string())
}

impl Resource for Meeting {
    type Draft = MeetingDraft;
    type NewPayload = NewMeeting;
    type Patch = MeetingPatch;

    const COLLECTION: &'static str = "reunioes";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> MeetingDraft {
        MeetingDraft {
            titulo: self.titulo.clone(),
            descricao: self.descricao.clone().unwrap_or_default(),
            pauta: self.pauta.clone().unwrap_or_default(),
            data_hora_inicio: self.data_hora_inicio.format("%Y-%m-%dT%H:%M").to_string(),
            duracao: self.duracao_minutos.to_string(),
            sala_id: self.sala_id.clone().unwrap_or_default(),
            organizador_id: self.organizador_id.clone().unwrap_or_default(),
            participantes: self.participantes.clone(),
            ata_reuniao: self.ata_reuniao.clone().unwrap_or_default(),
            status: Some(self.status),
        }
    }

    fn validate(draft: &MeetingDraft) -> Vec<FieldError> {
        let mut checks = Checks::new();
        checks
            .check("titulo", validate::validate_required(&draft.titulo, "Título", 200))
            .check("descricao", validate::validate_optional(&draft.descricao, "Descrição", 2000))
            .check("pauta", validate::validate_optional(&draft.pauta, "Pauta", 5000))
            .check(
                "dataHoraInicio",
                validate::validate_datetime(&draft.data_hora_inicio, "Início"),
            )
            .check("duracao", validate::validate_duration(&draft.duracao))
            .check("salaId", validate::validate_required(&draft.sala_id, "Sala", 64))
            .check(
                "organizadorId",
                validate::validate_required(&draft.organizador_id, "Organizador", 64),
            );
        checks.finish()
    }

    /// New meetings always start `AGENDADA`.
    fn new_payload(draft: &MeetingDraft) -> NewMeeting {
        let descricao = non_blank(&draft.descricao);
        NewMeeting {
            titulo: draft.titulo.trim().to_string(),
            pauta: non_blank(&draft.pauta).or_else(|| descricao.clone()),
            descricao,
            data_hora_inicio: normalized_start(&draft.data_hora_inicio),
            duracao_minutos: parse_duration(&draft.duracao),
            sala_id: non_blank(&draft.sala_id),
            organizador_id: non_blank(&draft.organizador_id),
            participantes: participant_set(&draft.participantes),
            ata_reuniao: non_blank(&draft.ata_reuniao),
            status: MeetingStatus::Agendada,
        }
    }

    /// Editor saves never carry `status`; lifecycle moves go through
    /// `change_status` so the transition rules apply.
    fn patch(draft: &MeetingDraft) -> MeetingPatch {
        MeetingPatch {
            titulo: non_blank(&draft.titulo),
            descricao: non_blank(&draft.descricao),
            pauta: non_blank(&draft.pauta),
            data_hora_inicio: wire::parse_datetime(&draft.data_hora_inicio)
                .map(|dt| wire::format_datetime(&dt)),
            duracao_minutos: draft.duracao.trim().parse::<i64>().ok(),
            sala_id: non_blank(&draft.sala_id),
            organizador_id: non_blank(&draft.organizador_id),
            participantes: Some(participant_set(&draft.participantes)),
            ata_reuniao: non_blank(&draft.ata_reuniao),
            status: None,
        }
    }
}
