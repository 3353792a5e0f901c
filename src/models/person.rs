use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::resource::Resource;
use super::wire::{self, non_blank};
use crate::auth::validate::{self, Checks, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonStatus {
    #[default]
    Ativo,
    Inativo,
    #[serde(other)]
    Unknown,
}

impl PersonStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PersonStatus::Ativo => "ATIVO",
            PersonStatus::Inativo => "INATIVO",
            PersonStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PersonStatus::Ativo => "Ativo",
            PersonStatus::Inativo => "Inativo",
            PersonStatus::Unknown => "Desconhecido",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departamento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo: Option<String>,
    #[serde(default)]
    pub status: PersonStatus,
    #[serde(default, with = "wire::opt_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "wire::opt_datetime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonDraft {
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub departamento: String,
    pub cargo: String,
    pub status: PersonStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departamento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo: Option<String>,
    pub status: PersonStatus,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departamento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PersonStatus>,
}

/// `Unknown` only ever comes from the backend; forms fall back to the default.
fn known_status(status: PersonStatus) -> PersonStatus {
    match status {
        PersonStatus::Unknown => PersonStatus::default(),
        other => other,
    }
}

impl Resource for Person {
    type Draft = PersonDraft;
    type NewPayload = NewPerson;
    type Patch = PersonPatch;

    const COLLECTION: &'static str = "pessoas";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> PersonDraft {
        PersonDraft {
            nome: self.nome.clone(),
            email: self.email.clone(),
            telefone: self.telefone.clone().unwrap_or_default(),
            departamento: self.departamento.clone().unwrap_or_default(),
            cargo: self.cargo.clone().unwrap_or_default(),
            status: self.status,
        }
    }

    fn validate(draft: &PersonDraft) -> Vec<FieldError> {
        let mut checks = Checks::new();
        checks
            .check("nome", validate::validate_required(&draft.nome, "Nome", 120))
            .check("email", validate::validate_email(&draft.email))
            .check("telefone", validate::validate_optional(&draft.telefone, "Telefone", 30))
            .check(
                "departamento",
                validate::validate_optional(&draft.departamento, "Departamento", 100),
            )
            .check("cargo", validate::validate_optional(&draft.cargo, "Cargo", 100));
        checks.finish()
    }

    fn new_payload(draft: &PersonDraft) -> NewPerson {
        NewPerson {
            nome: draft.nome.trim().to_string(),
            email: draft.email.trim().to_string(),
            telefone: non_blank(&draft.telefone),
            departamento: non_blank(&draft.departamento),
            cargo: non_blank(&draft.cargo),
            status: known_status(draft.status),
        }
    }

    fn patch(draft: &PersonDraft) -> PersonPatch {
        PersonPatch {
            nome: non_blank(&draft.nome),
            email: non_blank(&draft.email),
            telefone: non_blank(&draft.telefone),
            departamento: non_blank(&draft.departamento),
            cargo: non_blank(&draft.cargo),
            status: Some(known_status(draft.status)),
        }
    }
}
