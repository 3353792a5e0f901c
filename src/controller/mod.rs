//! Keeps a local copy of one remote collection in sync with the backend.
//!
//! Every mutation is followed by a full refetch; the controller never
//! patches its list in place. All state lives behind a mutex that is never
//! held across an await, so overlapping operations interleave freely and
//! whichever response lands last decides the list.

mod meeting;
mod state;
mod task;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::auth::validate::FieldError;
use crate::client::CollectionClient;
use crate::config::Config;
use crate::errors::ClientError;
use crate::models::Resource;

pub use state::{DeleteGate, Editor, LoadState, Notice, NoticeLevel, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Upper bound for any single remote operation.
    pub timeout: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        ControllerOptions {
            timeout: Duration::from_secs(15),
        }
    }
}

impl From<&Config> for ControllerOptions {
    fn from(config: &Config) -> Self {
        ControllerOptions {
            timeout: config.request_timeout,
        }
    }
}

struct ControllerState<R: Resource> {
    items: Vec<R>,
    load_state: LoadState,
    error: Option<ClientError>,
    field_errors: Vec<FieldError>,
    editor: Editor<R::Draft>,
    delete_gate: DeleteGate,
    notices: Vec<Notice>,
    session_expired: bool,
}

impl<R: Resource> Default for ControllerState<R> {
    fn default() -> Self {
        ControllerState {
            items: Vec::new(),
            load_state: LoadState::Idle,
            error: None,
            field_errors: Vec::new(),
            editor: Editor::default(),
            delete_gate: DeleteGate::Idle,
            notices: Vec::new(),
            session_expired: false,
        }
    }
}

impl<R: Resource> ControllerState<R> {
    fn record_failure(&mut self, err: ClientError) {
        if err.is_auth() {
            self.session_expired = true;
        }
        self.notices.push(Notice::error(err.to_string()));
        self.error = Some(err);
    }
}

pub struct CollectionController<R: Resource> {
    client: Arc<dyn CollectionClient<R>>,
    state: Mutex<ControllerState<R>>,
    cancel: CancellationToken,
    options: ControllerOptions,
}

impl<R: Resource> CollectionController<R> {
    pub fn new(client: Arc<dyn CollectionClient<R>>) -> Self {
        Self::with_options(client, ControllerOptions::default())
    }

    pub fn with_options(client: Arc<dyn CollectionClient<R>>, options: ControllerOptions) -> Self {
        CollectionController {
            client,
            state: Mutex::new(ControllerState::default()),
            cancel: CancellationToken::new(),
            options,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState<R>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ---------- Reads ----------

    pub fn items(&self) -> Vec<R> {
        self.lock().items.clone()
    }

    /// Borrow the current list without cloning it (for view filters).
    pub fn with_items<T>(&self, f: impl FnOnce(&[R]) -> T) -> T {
        f(self.lock().items.as_slice())
    }

    pub fn load_state(&self) -> LoadState {
        self.lock().load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state() == LoadState::Loading
    }

    pub fn error(&self) -> Option<ClientError> {
        self.lock().error.clone()
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.lock().field_errors.clone()
    }

    pub fn editor(&self) -> Editor<R::Draft> {
        self.lock().editor.clone()
    }

    pub fn delete_gate(&self) -> DeleteGate {
        self.lock().delete_gate.clone()
    }

    /// True once any call failed with an auth error; the view should send
    /// the user back to the login entry point.
    pub fn session_expired(&self) -> bool {
        self.lock().session_expired
    }

    /// Drain queued notices.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.lock().notices)
    }

    pub fn snapshot(&self) -> Snapshot<R, R::Draft> {
        let state = self.lock();
        Snapshot {
            items: state.items.clone(),
            load_state: state.load_state,
            error: state.error.clone(),
            field_errors: state.field_errors.clone(),
            editor: state.editor.clone(),
            delete_gate: state.delete_gate.clone(),
            session_expired: state.session_expired,
        }
    }

    pub fn dismiss_error(&self) {
        self.commit(|s| s.error = None);
    }

    // ---------- Lifecycle ----------

    /// Stop committing results. In-flight requests are dropped at their next
    /// poll and nothing they return reaches the state.
    pub fn dispose(&self) {
        log::debug!("{}: controller disposed", R::COLLECTION);
        self.cancel.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run a remote call bounded by the timeout and the cancellation token.
    async fn guarded<T>(
        &self,
        call: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<T, ClientError> {
        if self.is_disposed() {
            return Err(ClientError::Cancelled);
        }
        tokio::select! {
            _ = self.cancel.cancelled() => Err(ClientError::Cancelled),
            outcome = tokio::time::timeout(self.options.timeout, call) => {
                outcome.unwrap_or(Err(ClientError::TimedOut))
            }
        }
    }

    /// Apply a state change unless the controller has been disposed.
    fn commit(&self, f: impl FnOnce(&mut ControllerState<R>)) -> bool {
        if self.is_disposed() {
            log::debug!("{}: dropping state update after dispose", R::COLLECTION);
            return false;
        }
        f(&mut *self.lock());
        true
    }

    fn fail(&self, err: &ClientError) {
        if *err == ClientError::Cancelled {
            return;
        }
        log::warn!("{}: {}", R::COLLECTION, err);
        self.commit(|s| s.record_failure(err.clone()));
    }

    // ---------- Operations ----------

    /// First load when the view appears.
    pub async fn mount(&self) -> Result<(), ClientError> {
        self.fetch_all().await
    }

    /// Replace the list with the backend's collection. On failure the
    /// previous list is kept and the error recorded.
    pub async fn fetch_all(&self) -> Result<(), ClientError> {
        if !self.commit(|s| s.load_state = LoadState::Loading) {
            return Err(ClientError::Cancelled);
        }

        match self.guarded(self.client.list()).await {
            Ok(items) => {
                let count = items.len();
                let committed = self.commit(|s| {
                    s.items = items;
                    s.load_state = LoadState::Loaded;
                    s.error = None;
                });
                if !committed {
                    return Err(ClientError::Cancelled);
                }
                log::debug!("{}: loaded {} records", R::COLLECTION, count);
                Ok(())
            }
            Err(e) => {
                if e != ClientError::Cancelled {
                    self.commit(|s| s.load_state = LoadState::Failed);
                }
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Show the form, prefilled from `existing` or reset for a new record.
    pub fn open_editor(&self, existing: Option<&R>) {
        self.commit(|s| {
            s.field_errors.clear();
            s.editor = match existing {
                Some(record) => Editor {
                    visible: true,
                    draft: record.to_draft(),
                    target: Some(record.id().to_string()),
                },
                None => Editor {
                    visible: true,
                    draft: R::Draft::default(),
                    target: None,
                },
            };
        });
    }

    pub fn close_editor(&self) {
        self.commit(|s| {
            s.field_errors.clear();
            s.editor = Editor::default();
        });
    }

    /// Edit the draft in place, as a form does on every keystroke.
    pub fn update_draft(&self, f: impl FnOnce(&mut R::Draft)) {
        self.commit(|s| f(&mut s.editor.draft));
    }

    /// Create, or update the edit target. Invalid drafts never reach the
    /// network; failures leave the editor open with the draft intact.
    pub async fn submit(&self, draft: R::Draft) -> Result<(), ClientError> {
        let field_errors = R::validate(&draft);
        if !field_errors.is_empty() {
            let err = ClientError::Validation(field_errors.clone());
            self.commit(|s| {
                s.editor.draft = draft;
                s.field_errors = field_errors;
                s.error = Some(err.clone());
            });
            return Err(err);
        }

        let mut target = None;
        self.commit(|s| {
            s.field_errors.clear();
            s.editor.draft = draft.clone();
            target = s.editor.target.clone();
        });

        let outcome = match &target {
            Some(id) => {
                let patch = R::patch(&draft);
                self.guarded(self.client.update(id, &patch)).await
            }
            None => self.guarded(self.client.create(&draft)).await,
        };

        match outcome {
            Ok(saved) => {
                let message = match target {
                    Some(_) => format!("Registro {} atualizado", saved.id()),
                    None => format!("Registro {} criado", saved.id()),
                };
                self.commit(|s| s.notices.push(Notice::info(message)));
                self.refresh_after_mutation().await?;
                self.close_editor();
                Ok(())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// First half of a delete: remember what the user asked to remove.
    pub fn request_remove(&self, id: &str) {
        self.commit(|s| {
            s.delete_gate = DeleteGate::PendingDelete { id: id.to_string() };
        });
    }

    pub fn cancel_remove(&self) {
        self.commit(|s| s.delete_gate = DeleteGate::Idle);
    }

    /// Second half of a delete. Returns `Ok(false)` when nothing was pending.
    pub async fn confirm_remove(&self) -> Result<bool, ClientError> {
        let mut pending = None;
        self.commit(|s| {
            if let DeleteGate::PendingDelete { id } = std::mem::take(&mut s.delete_gate) {
                pending = Some(id);
            }
        });
        let Some(id) = pending else {
            return Ok(false);
        };

        match self.guarded(self.client.delete(&id)).await {
            Ok(()) => {
                self.commit(|s| s.notices.push(Notice::info(format!("Registro {id} removido"))));
                self.refresh_after_mutation().await?;
                Ok(true)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Send a partial update outside the editor, then refetch.
    async fn apply_patch(&self, id: &str, patch: R::Patch) -> Result<(), ClientError> {
        match self.guarded(self.client.update(id, &patch)).await {
            Ok(_) => self.refresh_after_mutation().await,
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// The mutation already succeeded; a failed refetch is recorded by
    /// `fetch_all` but does not undo it. Only disposal aborts the caller.
    async fn refresh_after_mutation(&self) -> Result<(), ClientError> {
        match self.fetch_all().await {
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            _ => Ok(()),
        }
    }
}
