//! Collection controller tests.
//!
//! Most run against `FakeClient` so failures and timing can be scripted; the
//! room scenario also runs end to end against the mock backend.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use salaplan::client::CollectionClient;
use salaplan::controller::{CollectionController, ControllerOptions, DeleteGate, LoadState, NoticeLevel};
use salaplan::errors::ClientError;
use salaplan::models::{Meeting, MeetingDraft, Person, PersonDraft, Room, RoomDraft, RoomStatus, Task};
use common::*;

fn controller<R: salaplan::models::Resource>(fake: &Arc<FakeClient<R>>) -> CollectionController<R> {
    CollectionController::new(fake.clone())
}

fn room_draft(nome: &str, capacidade: i64) -> RoomDraft {
    RoomDraft {
        nome: nome.to_string(),
        capacidade,
        localizacao: "1º andar".to_string(),
        ..Default::default()
    }
}

fn seeded_rooms() -> Arc<FakeClient<Room>> {
    FakeClient::with_records(vec![room_json("1", "Sala 1"), room_json("2", "Sala 2"), room_json("3", "Sala 3")])
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_mount_loads_the_collection() {
    let fake = seeded_rooms();
    let ctrl = controller(&fake);
    assert_eq!(ctrl.load_state(), LoadState::Idle);

    ctrl.mount().await.expect("mount");
    assert_eq!(ctrl.load_state(), LoadState::Loaded);
    assert_eq!(ctrl.items().len(), 3);
    assert_eq!(fake.calls(), vec!["list"]);
}

#[tokio::test]
async fn test_malformed_record_does_not_hide_the_rest() {
    let fake = FakeClient::<Meeting>::with_records(vec![
        meeting_json("1", "Planejamento", "2030-01-01T09:00:00", "AGENDADA"),
        json!({ "id": "2", "dataHoraInicio": null }),
    ]);
    let ctrl = controller(&fake);

    ctrl.fetch_all().await.expect("fetch");
    assert_eq!(ctrl.load_state(), LoadState::Loaded);
    assert_eq!(ctrl.error(), None);
    let ids: Vec<String> = ctrl.items().into_iter().map(|m| m.id).collect();
    assert_eq!(ids, vec!["1"]);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_list() {
    let fake = seeded_rooms();
    let ctrl = controller(&fake);
    ctrl.fetch_all().await.expect("first fetch");
    let before = ctrl.items();

    fake.fail_next(ClientError::Http {
        status: 500,
        body: "boom".to_string(),
    });
    let err = ctrl.fetch_all().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(ctrl.items(), before);
    assert_eq!(ctrl.load_state(), LoadState::Failed);
    assert_eq!(ctrl.error(), Some(err));
    let notices = ctrl.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);

    // The next good fetch clears the error.
    ctrl.fetch_all().await.expect("recovery");
    assert_eq!(ctrl.error(), None);
    assert_eq!(ctrl.load_state(), LoadState::Loaded);
}

#[tokio::test]
async fn test_overlapping_fetches_last_response_wins() {
    let fake = FakeClient::<Room>::with_records(vec![room_json("1", "Sala 1")]);
    let ctrl = controller(&fake);

    // The first fetch reads one record, then stalls; the second reads two and
    // returns at once. The stale first response lands last and is kept whole.
    fake.delay_next_list(Duration::from_millis(80));
    let slow = ctrl.fetch_all();
    let fast = async {
        fake.push_record(room_json("2", "Sala 2"));
        let result = ctrl.fetch_all().await;
        assert_eq!(ctrl.items().len(), 2);
        result
    };
    let (slow, fast) = tokio::join!(slow, fast);
    slow.expect("slow fetch");
    fast.expect("fast fetch");

    let ids: Vec<String> = ctrl.items().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["1"]);
}

#[tokio::test]
async fn test_fetch_times_out() {
    let fake = seeded_rooms();
    let ctrl = CollectionController::with_options(
        fake.clone(),
        ControllerOptions {
            timeout: Duration::from_millis(20),
        },
    );

    fake.delay_next_list(Duration::from_millis(300));
    let err = ctrl.fetch_all().await.unwrap_err();
    assert_eq!(err, ClientError::TimedOut);
    assert_eq!(ctrl.load_state(), LoadState::Failed);
    assert!(ctrl.items().is_empty());
}

#[tokio::test]
async fn test_dispose_drops_in_flight_results() {
    let fake = seeded_rooms();
    let ctrl = controller(&fake);

    fake.delay_next_list(Duration::from_millis(100));
    let (result, _) = tokio::join!(ctrl.fetch_all(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        ctrl.dispose();
    });

    assert_eq!(result.unwrap_err(), ClientError::Cancelled);
    assert!(ctrl.is_disposed());
    assert!(ctrl.items().is_empty());
    assert!(ctrl.take_notices().is_empty());

    // Nothing is sent once disposed.
    assert_eq!(ctrl.fetch_all().await.unwrap_err(), ClientError::Cancelled);
    assert_eq!(fake.calls(), vec!["list"]);
}

#[tokio::test]
async fn test_auth_failure_flags_expired_session() {
    let fake = seeded_rooms();
    let ctrl = controller(&fake);
    assert!(!ctrl.session_expired());

    fake.fail_next(ClientError::Auth("token rejected".to_string()));
    assert!(ctrl.fetch_all().await.unwrap_err().is_auth());
    assert!(ctrl.session_expired());
}

// ---------------------------------------------------------------------------
// Create / update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_adds_exactly_one_record() {
    let fake = seeded_rooms();
    let ctrl = controller(&fake);
    ctrl.fetch_all().await.unwrap();
    let before = ctrl.items();

    ctrl.open_editor(None);
    assert!(ctrl.editor().visible);
    ctrl.submit(room_draft("Sala A", 10)).await.expect("submit");

    let after = ctrl.items();
    assert_eq!(after.len(), before.len() + 1);
    let created = after.iter().find(|r| !before.contains(r)).expect("new record");
    assert!(!created.id.is_empty());
    assert_eq!(created.nome, "Sala A");
    assert_eq!(created.capacidade, 10);
    assert_eq!(created.localizacao.as_deref(), Some("1º andar"));
    assert_eq!(created.status, RoomStatus::Livre);
    assert!(!ctrl.editor().visible);
    assert_eq!(ctrl.take_notices()[0].level, NoticeLevel::Info);
}

#[tokio::test]
async fn test_update_changes_only_the_target() {
    let fake = seeded_rooms();
    let ctrl = controller(&fake);
    ctrl.fetch_all().await.unwrap();
    let before = ctrl.items();

    let target = before[1].clone();
    ctrl.open_editor(Some(&target));
    assert_eq!(ctrl.editor().target.as_deref(), Some("2"));
    assert_eq!(ctrl.editor().draft.nome, "Sala 2");

    let mut draft = ctrl.editor().draft;
    draft.nome = "Sala 2 (reformada)".to_string();
    draft.capacidade = 30;
    ctrl.submit(draft).await.expect("submit");

    let after = ctrl.items();
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(after.iter()) {
        if old.id == "2" {
            assert_eq!(new.nome, "Sala 2 (reformada)");
            assert_eq!(new.capacidade, 30);
        } else {
            assert_eq!(old, new);
        }
    }
    assert!(fake.calls().contains(&"update 2".to_string()));
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_the_client() {
    let fake = FakeClient::<Person>::new();
    let ctrl = controller(&fake);
    ctrl.open_editor(None);

    let draft = PersonDraft {
        nome: "  ".to_string(),
        email: "not-an-email".to_string(),
        ..Default::default()
    };
    let err = ctrl.submit(draft.clone()).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    let fields: Vec<String> = ctrl.field_errors().into_iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["nome", "email"]);
    assert!(fake.calls().is_empty());
    // The form stays open with what the user typed.
    assert!(ctrl.editor().visible);
    assert_eq!(ctrl.editor().draft, draft);
}

#[tokio::test]
async fn test_failed_submit_keeps_editor_open() {
    let fake = seeded_rooms();
    let ctrl = controller(&fake);
    ctrl.fetch_all().await.unwrap();
    ctrl.open_editor(None);

    fake.fail_next(ClientError::Http {
        status: 500,
        body: "db down".to_string(),
    });
    let draft = room_draft("Sala B", 4);
    assert!(ctrl.submit(draft.clone()).await.is_err());

    assert!(ctrl.editor().visible);
    assert_eq!(ctrl.editor().draft, draft);
    assert_eq!(ctrl.items().len(), 3);
    assert_eq!(fake.record_count(), 3);
}

#[tokio::test]
async fn test_meeting_duration_is_sent_as_a_number() {
    let fake = FakeClient::<Meeting>::new();
    let ctrl = controller(&fake);
    ctrl.open_editor(None);

    ctrl.submit(MeetingDraft {
        titulo: "Alinhamento".to_string(),
        data_hora_inicio: "2030-02-03T09:30".to_string(),
        duracao: "45".to_string(),
        sala_id: "1".to_string(),
        organizador_id: "1".to_string(),
        ..Default::default()
    })
    .await
    .expect("submit");

    let created = &ctrl.items()[0];
    let sent = fake.record(&created.id).expect("record");
    assert_eq!(sent["duracaoMinutos"], json!(45));
    assert_eq!(sent["dataHoraInicio"], json!("2030-02-03T09:30:00"));
    assert_eq!(sent["status"], json!("AGENDADA"));
    assert_eq!(created.duracao_minutos, 45);
}

#[tokio::test]
async fn test_concurrent_updates_last_write_wins() {
    // Not detected or prevented: two editors saving the same record both
    // succeed and the later write is what remains.
    let fake = seeded_rooms();
    let first = controller(&fake);
    let second = controller(&fake);
    first.fetch_all().await.unwrap();
    second.fetch_all().await.unwrap();

    let target = first.items()[0].clone();
    first.open_editor(Some(&target));
    second.open_editor(Some(&target));

    let mut a = first.editor().draft;
    a.capacidade = 11;
    let mut b = second.editor().draft;
    b.capacidade = 22;

    first.submit(a).await.expect("first save");
    second.submit(b).await.expect("second save");

    first.fetch_all().await.unwrap();
    assert_eq!(first.items()[0].capacidade, 22);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let fake = seeded_rooms();
    let ctrl = controller(&fake);
    ctrl.fetch_all().await.unwrap();

    // Confirming with nothing pending does nothing.
    assert!(!ctrl.confirm_remove().await.unwrap());

    ctrl.request_remove("2");
    assert_eq!(ctrl.delete_gate(), DeleteGate::PendingDelete { id: "2".to_string() });
    ctrl.cancel_remove();
    assert_eq!(ctrl.delete_gate(), DeleteGate::Idle);
    assert!(!ctrl.confirm_remove().await.unwrap());

    assert!(!fake.calls().iter().any(|c| c.starts_with("delete")));
    assert_eq!(ctrl.items().len(), 3);
}

#[tokio::test]
async fn test_confirmed_delete_removes_only_that_record() {
    let fake = seeded_rooms();
    let ctrl = controller(&fake);
    ctrl.fetch_all().await.unwrap();

    ctrl.request_remove("2");
    assert!(ctrl.confirm_remove().await.expect("delete"));

    let ids: Vec<String> = ctrl.items().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(ctrl.delete_gate(), DeleteGate::Idle);
    assert_eq!(fake.calls().iter().filter(|c| c.starts_with("delete")).count(), 1);
}

#[tokio::test]
async fn test_failed_delete_keeps_the_list() {
    let fake = seeded_rooms();
    let ctrl = controller(&fake);
    ctrl.fetch_all().await.unwrap();

    ctrl.request_remove("9");
    let err = ctrl.confirm_remove().await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(ctrl.items().len(), 3);
    assert_eq!(ctrl.error(), Some(err));
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_room_scenario_against_mock_backend() {
    let api = spawn_api();
    let (client, _tokens) = remote::<Room>(&api.base_url);
    let client: Arc<dyn CollectionClient<Room>> = Arc::new(client);
    let ctrl = CollectionController::new(client);

    ctrl.mount().await.expect("mount");
    let before = ctrl.items().len();

    ctrl.open_editor(None);
    ctrl.submit(room_draft("Sala A", 10)).await.expect("submit");

    let rooms = ctrl.items();
    assert_eq!(rooms.len(), before + 1);
    let room = rooms.iter().find(|r| r.nome == "Sala A").expect("created room");
    assert!(!room.id.is_empty());
    assert_eq!(room.status.as_str(), "LIVRE");
    assert!(room.created_at.is_some());

    api.stop().await;
}

#[tokio::test]
async fn test_task_completion_refetches() {
    let fake = FakeClient::<Task>::with_records(vec![task_json("1", "Enviar pauta", false)]);
    let ctrl = controller(&fake);
    ctrl.fetch_all().await.unwrap();

    ctrl.set_completed("1", true).await.expect("complete");
    assert!(ctrl.items()[0].concluida);
    assert_eq!(fake.calls(), vec!["list", "update 1", "list"]);
}
