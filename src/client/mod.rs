mod remote;

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::token_store::TokenStore;
use crate::config::Config;
use crate::errors::ClientError;
use crate::models::{Meeting, Person, Resource, Room, Task};

pub use remote::{RemoteCollection, UpdateMethod, decode_records};

/// The operations a controller needs from a remote collection.
#[async_trait]
pub trait CollectionClient<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, ClientError>;

    async fn get_by_id(&self, id: &str) -> Result<R, ClientError>;

    async fn create(&self, draft: &R::Draft) -> Result<R, ClientError>;

    /// Send only the fields present in `patch`.
    async fn update(&self, id: &str, patch: &R::Patch) -> Result<R, ClientError>;

    async fn delete(&self, id: &str) -> Result<(), ClientError>;
}

/// One client per collection, sharing a connection pool and token store.
pub struct Api {
    pub pessoas: Arc<RemoteCollection<Person>>,
    pub salas: Arc<RemoteCollection<Room>>,
    pub reunioes: Arc<RemoteCollection<Meeting>>,
    pub tarefas: Arc<RemoteCollection<Task>>,
}

impl Api {
    pub fn from_config(config: &Config, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let http = config.http_client()?;
        let base = config.api_base_url.as_str();
        Ok(Api {
            pessoas: Arc::new(RemoteCollection::new(http.clone(), base, tokens.clone())?),
            salas: Arc::new(RemoteCollection::new(http.clone(), base, tokens.clone())?),
            reunioes: Arc::new(
                RemoteCollection::new(http.clone(), base, tokens.clone())?
                    .with_update_method(config.update_method()),
            ),
            tarefas: Arc::new(
                RemoteCollection::new(http, base, tokens)?
                    .with_update_method(config.update_method()),
            ),
        })
    }
}
