//! Meeting lifecycle tests.
//!
//! Transitions are enforced by the controller: a rejected move issues no
//! request at all.

mod common;

use salaplan::controller::CollectionController;
use salaplan::errors::ClientError;
use salaplan::models::{Meeting, MeetingStatus};
use common::*;

fn meetings() -> std::sync::Arc<FakeClient<Meeting>> {
    FakeClient::with_records(vec![
        meeting_json("1", "Agendada", "2030-01-01T09:00:00", "AGENDADA"),
        meeting_json("2", "Em andamento", "2030-01-01T10:00:00", "EM_ANDAMENTO"),
        meeting_json("3", "Finalizada", "2030-01-01T11:00:00", "FINALIZADA"),
        meeting_json("4", "Cancelada", "2030-01-01T12:00:00", "CANCELADA"),
    ])
}

#[tokio::test]
async fn test_scheduled_meeting_can_start() {
    let fake = meetings();
    let ctrl = CollectionController::new(fake.clone());
    ctrl.fetch_all().await.unwrap();

    ctrl.change_status("1", MeetingStatus::EmAndamento).await.expect("start");

    let meeting = ctrl.items().into_iter().find(|m| m.id == "1").unwrap();
    assert_eq!(meeting.status, MeetingStatus::EmAndamento);
    assert_eq!(meeting.titulo, "Agendada");
    assert_eq!(fake.calls(), vec!["list", "update 1", "list"]);
}

#[tokio::test]
async fn test_terminal_meetings_reject_every_transition() {
    let fake = meetings();
    let ctrl = CollectionController::new(fake.clone());
    ctrl.fetch_all().await.unwrap();

    for id in ["3", "4"] {
        for next in MeetingStatus::ALL {
            let err = ctrl.change_status(id, next).await.unwrap_err();
            assert!(
                matches!(err, ClientError::InvalidTransition { .. }),
                "{id} -> {next:?} gave {err:?}"
            );
        }
        assert!(ctrl.available_transitions(id).is_empty());
    }

    // Only the initial list went out.
    assert_eq!(fake.calls(), vec!["list"]);
    assert_eq!(fake.record("3").unwrap()["status"], "FINALIZADA");
}

#[tokio::test]
async fn test_invalid_transition_is_recorded() {
    let fake = meetings();
    let ctrl = CollectionController::new(fake.clone());
    ctrl.fetch_all().await.unwrap();

    let err = ctrl.change_status("2", MeetingStatus::Agendada).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::InvalidTransition {
            from: "EM_ANDAMENTO".to_string(),
            to: "AGENDADA".to_string(),
        }
    );
    assert_eq!(ctrl.error(), Some(err));
    assert_eq!(ctrl.take_notices().len(), 1);
}

#[tokio::test]
async fn test_status_of_unlisted_meeting_is_read_from_backend() {
    let fake = meetings();
    let ctrl = CollectionController::new(fake.clone());

    // Nothing fetched yet, so the current status comes from get_by_id.
    let err = ctrl.change_status("3", MeetingStatus::Cancelada).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidTransition { .. }));
    assert_eq!(fake.calls(), vec!["get 3"]);

    ctrl.change_status("2", MeetingStatus::Finalizada).await.expect("finish");
    assert_eq!(fake.record("2").unwrap()["status"], "FINALIZADA");
}

#[tokio::test]
async fn test_available_transitions_follow_current_status() {
    let fake = meetings();
    let ctrl = CollectionController::new(fake.clone());
    ctrl.fetch_all().await.unwrap();

    assert_eq!(
        ctrl.available_transitions("1"),
        vec![MeetingStatus::EmAndamento, MeetingStatus::Cancelada]
    );
    assert_eq!(ctrl.available_transitions("2"), vec![MeetingStatus::Finalizada]);
    assert!(ctrl.available_transitions("missing").is_empty());
}

#[tokio::test]
async fn test_editor_save_cannot_reopen_terminal_meeting() {
    let fake = meetings();
    let ctrl = CollectionController::new(fake.clone());
    ctrl.fetch_all().await.unwrap();

    let finished = ctrl.items().into_iter().find(|m| m.id == "3").unwrap();
    ctrl.open_editor(Some(&finished));
    let mut draft = ctrl.editor().draft;
    draft.titulo = "Retrospectiva".to_string();
    draft.status = Some(MeetingStatus::Agendada);
    ctrl.submit(draft).await.expect("save");

    let record = fake.record("3").unwrap();
    assert_eq!(record["titulo"], "Retrospectiva");
    assert_eq!(record["status"], "FINALIZADA");
    let meeting = ctrl.items().into_iter().find(|m| m.id == "3").unwrap();
    assert_eq!(meeting.status, MeetingStatus::Finalizada);
}

#[tokio::test]
async fn test_new_meeting_always_starts_scheduled() {
    let fake = FakeClient::<Meeting>::new();
    let ctrl = CollectionController::new(fake.clone());

    ctrl.open_editor(None);
    let mut draft = ctrl.editor().draft;
    draft.titulo = "Kickoff".to_string();
    draft.data_hora_inicio = "2030-02-01T09:00".to_string();
    draft.duracao = "30".to_string();
    draft.sala_id = "1".to_string();
    draft.organizador_id = "1".to_string();
    draft.status = Some(MeetingStatus::Cancelada);
    ctrl.submit(draft).await.expect("create");

    assert_eq!(fake.record("1").unwrap()["status"], "AGENDADA");
    assert_eq!(ctrl.items()[0].status, MeetingStatus::Agendada);
    assert_eq!(fake.calls(), vec!["create", "list"]);
}
