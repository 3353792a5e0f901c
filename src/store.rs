//! In-memory collections behind the mock backend.
//!
//! Records are kept as raw JSON objects so the server stores whatever shape a
//! client sends, the way a schemaless backend would. Typed views are decoded
//! on demand for the dashboard.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::{Duration, NaiveDateTime, Utc};
use rand::Rng;
use serde_json::{Map, Value, json};

use crate::client::decode_records;
use crate::models::Resource;
use crate::models::wire::format_datetime;

pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Pessoas,
    Salas,
    Reunioes,
    Tarefas,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Pessoas,
        Collection::Salas,
        Collection::Reunioes,
        Collection::Tarefas,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Collection::Pessoas => "pessoas",
            Collection::Salas => "salas",
            Collection::Reunioes => "reunioes",
            Collection::Tarefas => "tarefas",
        }
    }

    pub fn from_path(path: &str) -> Option<Collection> {
        Self::ALL.into_iter().find(|c| c.path() == path)
    }

    /// Fill fields the backend defaults when a create omits them.
    fn apply_defaults(self, record: &mut Record) {
        let defaults = match self {
            Collection::Pessoas => vec![("status", json!("ATIVO"))],
            Collection::Salas => vec![("status", json!("LIVRE")), ("recursos", json!([]))],
            Collection::Reunioes => vec![("status", json!("AGENDADA")), ("participantes", json!([]))],
            Collection::Tarefas => vec![("concluida", json!(false))],
        };
        for (key, value) in defaults {
            match record.get(key) {
                None | Some(Value::Null) => {
                    record.insert(key.to_string(), value);
                }
                Some(_) => {}
            }
        }
    }
}

pub struct MockStore {
    collections: Mutex<HashMap<Collection, Vec<Record>>>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    pub fn new() -> Self {
        MockStore {
            collections: Mutex::new(Collection::ALL.into_iter().map(|c| (c, Vec::new())).collect()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Collection, Vec<Record>>> {
        self.collections.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn list(&self, collection: Collection) -> Vec<Record> {
        self.lock().get(&collection).cloned().unwrap_or_default()
    }

    pub fn count(&self, collection: Collection) -> usize {
        self.lock().get(&collection).map_or(0, Vec::len)
    }

    /// Record counts keyed by collection path.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let collections = self.lock();
        Collection::ALL
            .into_iter()
            .map(|c| (c.path().to_string(), collections.get(&c).map_or(0, Vec::len)))
            .collect()
    }

    pub fn get(&self, collection: Collection, id: &str) -> Option<Record> {
        self.lock()
            .get(&collection)?
            .iter()
            .find(|r| record_id(r) == Some(id))
            .cloned()
    }

    /// Store a new record. The server owns `id`, `createdAt` and `updatedAt`;
    /// client-supplied values for them are overwritten.
    pub fn insert(&self, collection: Collection, mut record: Record) -> Record {
        let now = format_datetime(&now());
        record.insert("id".to_string(), Value::String(new_id()));
        record.insert("createdAt".to_string(), Value::String(now.clone()));
        record.insert("updatedAt".to_string(), Value::String(now));
        collection.apply_defaults(&mut record);

        self.lock().entry(collection).or_default().push(record.clone());
        log::debug!("{}: inserted {:?}", collection.path(), record.get("id"));
        record
    }

    /// Merge `changes` into the stored record. `id` and `createdAt` never
    /// change. Returns `None` when the id is unknown.
    pub fn update(&self, collection: Collection, id: &str, changes: Record) -> Option<Record> {
        let mut collections = self.lock();
        let record = collections
            .get_mut(&collection)?
            .iter_mut()
            .find(|r| record_id(r) == Some(id))?;

        for (key, value) in changes {
            if key == "id" || key == "createdAt" {
                continue;
            }
            record.insert(key, value);
        }
        record.insert("updatedAt".to_string(), Value::String(format_datetime(&now())));
        Some(record.clone())
    }

    pub fn remove(&self, collection: Collection, id: &str) -> bool {
        let mut collections = self.lock();
        let Some(records) = collections.get_mut(&collection) else {
            return false;
        };
        let before = records.len();
        records.retain(|r| record_id(r) != Some(id));
        records.len() != before
    }

    /// Decode a collection into typed records. Records that do not decode
    /// are skipped with a warning.
    pub fn typed<R: Resource>(&self) -> Vec<R> {
        let Some(collection) = Collection::from_path(R::COLLECTION) else {
            return Vec::new();
        };
        let records = self.list(collection).into_iter().map(Value::Object).collect();
        decode_records(records)
    }

    /// A store with a handful of people, rooms, meetings and tasks around
    /// `now`.
    pub fn seeded(now: NaiveDateTime) -> Self {
        let store = MockStore::new();
        let object = |value: Value| match value {
            Value::Object(map) => map,
            _ => Record::new(),
        };

        let ana = store.insert(
            Collection::Pessoas,
            object(json!({
                "nome": "Ana Souza", "email": "ana.souza@example.com",
                "departamento": "Engenharia", "cargo": "Gerente de Projetos"
            })),
        );
        let bruno = store.insert(
            Collection::Pessoas,
            object(json!({
                "nome": "Bruno Lima", "email": "bruno.lima@example.com",
                "telefone": "+55 11 99999-0000", "departamento": "Financeiro"
            })),
        );
        store.insert(
            Collection::Pessoas,
            object(json!({ "nome": "Carla Dias", "email": "carla.dias@example.com", "status": "INATIVO" })),
        );

        let atlantico = store.insert(
            Collection::Salas,
            object(json!({
                "nome": "Sala Atlântico", "capacidade": 12, "localizacao": "2º andar",
                "recursos": ["projetor", "videoconferência"]
            })),
        );
        let pampa = store.insert(
            Collection::Salas,
            object(json!({ "nome": "Sala Pampa", "capacidade": 6, "localizacao": "Térreo", "status": "RESERVADA" })),
        );

        let at = |offset: Duration| format_datetime(&(now + offset));
        let planning = store.insert(
            Collection::Reunioes,
            object(json!({
                "titulo": "Planejamento do trimestre",
                "pauta": "Metas e orçamento",
                "dataHoraInicio": at(Duration::hours(2)),
                "duracaoMinutos": 60,
                "salaId": atlantico["id"],
                "organizadorId": ana["id"],
                "participantes": [ana["id"], bruno["id"]]
            })),
        );
        store.insert(
            Collection::Reunioes,
            object(json!({
                "titulo": "Revisão de contratos",
                "dataHoraInicio": at(Duration::days(1)),
                "duracaoMinutos": 30,
                "salaId": pampa["id"],
                "organizadorId": bruno["id"],
                "participantes": [bruno["id"]]
            })),
        );
        store.insert(
            Collection::Reunioes,
            object(json!({
                "titulo": "Retrospectiva",
                "dataHoraInicio": at(Duration::days(-2)),
                "duracaoMinutos": 45,
                "salaId": atlantico["id"],
                "organizadorId": ana["id"],
                "status": "FINALIZADA",
                "ataReuniao": "Ações registradas no quadro da equipe."
            })),
        );

        store.insert(
            Collection::Tarefas,
            object(json!({
                "descricao": "Enviar pauta aos participantes",
                "statusTarefa": "PRE_REUNIAO",
                "prioridade": "ALTA",
                "responsavelId": ana["id"],
                "reuniaoId": planning["id"],
                "prazo": (now + Duration::days(1)).date().to_string()
            })),
        );
        store.insert(
            Collection::Tarefas,
            object(json!({
                "descricao": "Publicar ata",
                "statusTarefa": "POS_REUNIAO",
                "prioridade": "MEDIA",
                "responsavelId": bruno["id"],
                "reuniaoId": planning["id"]
            })),
        );

        log::info!("Seeded mock store: {:?}", store.counts());
        store
    }
}

fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn new_id() -> String {
    let bytes: [u8; 8] = rand::rng().random();
    hex::encode(bytes)
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
