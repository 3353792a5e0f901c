use crate::auth::validate::FieldError;
use crate::errors::ClientError;

/// Where the controller is in its fetch cycle.
///
/// `Idle` only before the first fetch. Every refresh (mount, or the refetch
/// after a mutation) passes through `Loading` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// The create/edit form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Editor<D> {
    pub visible: bool,
    pub draft: D,
    /// Id of the record being edited; `None` while creating.
    pub target: Option<String>,
}

/// Two-step delete: nothing is deleted unless a pending request is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteGate {
    #[default]
    Idle,
    PendingDelete { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A non-blocking message for the toast area.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Point-in-time copy of everything a view renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<R, D> {
    pub items: Vec<R>,
    pub load_state: LoadState,
    pub error: Option<ClientError>,
    pub field_errors: Vec<FieldError>,
    pub editor: Editor<D>,
    pub delete_gate: DeleteGate,
    pub session_expired: bool,
}
