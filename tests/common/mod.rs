//! Shared test infrastructure.
//!
//! - `spawn_api()` / `spawn_api_with()` - the mock backend on a random local port
//! - `remote()` - a `RemoteCollection` pointed at a spawned backend
//! - `FakeClient` - scripted in-memory `CollectionClient` for controller tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{App, HttpServer, dev::ServerHandle, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use salaplan::auth::middleware::ApiToken;
use salaplan::auth::token_store::MemoryTokenStore;
use salaplan::client::{CollectionClient, RemoteCollection, decode_records};
use salaplan::errors::ClientError;
use salaplan::handlers;
use salaplan::models::Resource;
use salaplan::store::MockStore;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TEST_TOKEN: &str = "test-token-0123456789";

// ============================================================================
// MOCK BACKEND
// ============================================================================

pub struct TestApi {
    pub base_url: String,
    pub store: web::Data<MockStore>,
    handle: ServerHandle,
}

impl TestApi {
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Spawn the mock backend with an empty store.
pub fn spawn_api() -> TestApi {
    spawn_api_with(MockStore::new())
}

/// Spawn the mock backend on an ephemeral port. Must run inside an actix
/// runtime (`#[actix_web::test]`).
pub fn spawn_api_with(store: MockStore) -> TestApi {
    let store = web::Data::new(store);
    let token = web::Data::new(ApiToken(TEST_TOKEN.to_string()));
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test port");
    let port = listener.local_addr().expect("local addr").port();

    let app_store = store.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_store.clone())
            .app_data(token.clone())
            .configure(handlers::configure)
    })
    .listen(listener)
    .expect("Failed to listen")
    .workers(1)
    .disable_signals()
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    TestApi {
        base_url: format!("http://127.0.0.1:{port}"),
        store,
        handle,
    }
}

/// A client for `R` with `TEST_TOKEN` already stored.
pub fn remote<R: Resource>(base_url: &str) -> (RemoteCollection<R>, Arc<MemoryTokenStore>) {
    let tokens = Arc::new(MemoryTokenStore::with_token(TEST_TOKEN));
    let client = RemoteCollection::new(reqwest::Client::new(), base_url, tokens.clone())
        .expect("Failed to build client");
    (client, tokens)
}

pub fn object(value: Value) -> serde_json::Map<String, Value> {
    value.as_object().cloned().expect("expected a JSON object")
}

// ============================================================================
// FAKE CLIENT
// ============================================================================

/// In-memory stand-in for a remote collection. Records are plain JSON, so
/// creates and updates go through the same payload serialization as the real
/// client. Failures and list delays are scripted per call.
pub struct FakeClient<R> {
    records: Mutex<Vec<Value>>,
    failures: Mutex<VecDeque<ClientError>>,
    list_delays: Mutex<VecDeque<Duration>>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> FakeClient<R> {
    pub fn new() -> Arc<Self> {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<Value>) -> Arc<Self> {
        Arc::new(FakeClient {
            next_id: AtomicUsize::new(records.len() + 1),
            records: Mutex::new(records),
            failures: Mutex::new(VecDeque::new()),
            list_delays: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            _resource: PhantomData,
        })
    }

    /// The next call (of any kind) fails with `err`.
    pub fn fail_next(&self, err: ClientError) {
        self.failures.lock().unwrap().push_back(err);
    }

    /// The next `list` call sleeps for `delay` after reading the records.
    pub fn delay_next_list(&self, delay: Duration) {
        self.list_delays.lock().unwrap().push_back(delay);
    }

    pub fn push_record(&self, record: Value) {
        self.records.lock().unwrap().push(record);
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn record(&self, id: &str) -> Option<Value> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r["id"] == json!(id))
            .cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn begin(&self, call: String) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found(id: &str) -> ClientError {
        ClientError::Http {
            status: 404,
            body: format!("{} {} not found", R::COLLECTION, id),
        }
    }
}

#[async_trait]
impl<R: Resource> CollectionClient<R> for FakeClient<R> {
    async fn list(&self) -> Result<Vec<R>, ClientError> {
        self.begin("list".to_string())?;
        let snapshot = self.records.lock().unwrap().clone();
        let delay = self.list_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(decode_records(snapshot))
    }

    async fn get_by_id(&self, id: &str) -> Result<R, ClientError> {
        self.begin(format!("get {id}"))?;
        let record = self.record(id).ok_or_else(|| Self::not_found(id))?;
        Ok(serde_json::from_value(record)?)
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, ClientError> {
        self.begin("create".to_string())?;
        let mut record = serde_json::to_value(R::new_payload(draft))?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        record["id"] = json!(id);
        self.records.lock().unwrap().push(record.clone());
        Ok(serde_json::from_value(record)?)
    }

    async fn update(&self, id: &str, patch: &R::Patch) -> Result<R, ClientError> {
        self.begin(format!("update {id}"))?;
        let changes = serde_json::to_value(patch)?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r["id"] == json!(id))
            .ok_or_else(|| Self::not_found(id))?;
        if let (Some(target), Value::Object(changes)) = (record.as_object_mut(), changes) {
            target.extend(changes);
        }
        Ok(serde_json::from_value(record.clone())?)
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.begin(format!("delete {id}"))?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r["id"] != json!(id));
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn room_json(id: &str, nome: &str) -> Value {
    json!({ "id": id, "nome": nome, "capacidade": 8, "status": "LIVRE", "recursos": [] })
}

pub fn meeting_json(id: &str, titulo: &str, start: &str, status: &str) -> Value {
    json!({
        "id": id,
        "titulo": titulo,
        "dataHoraInicio": start,
        "duracaoMinutos": 60,
        "salaId": "1",
        "organizadorId": "1",
        "participantes": ["1"],
        "status": status
    })
}

pub fn task_json(id: &str, descricao: &str, concluida: bool) -> Value {
    json!({ "id": id, "descricao": descricao, "statusTarefa": "PRE_REUNIAO", "concluida": concluida })
}
