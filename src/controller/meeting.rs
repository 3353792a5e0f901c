use super::CollectionController;
use crate::errors::ClientError;
use crate::models::{Meeting, MeetingPatch, MeetingStatus};

impl CollectionController<Meeting> {
    /// Move a meeting along its lifecycle.
    ///
    /// The transition is checked here, not only in the view: a move out of a
    /// terminal state issues no request and records `InvalidTransition`.
    ///
    /// The current status is the locally cached one (read from the backend
    /// only when the meeting is not in the list), so it may be stale. The
    /// backend has the final say on the stored status.
    pub async fn change_status(&self, id: &str, next: MeetingStatus) -> Result<(), ClientError> {
        let current = match self.current_status(id) {
            Some(status) => status,
            None => match self.guarded(self.client.get_by_id(id)).await {
                Ok(meeting) => meeting.status,
                Err(e) => {
                    self.fail(&e);
                    return Err(e);
                }
            },
        };

        if !current.can_transition_to(next) {
            let err = ClientError::InvalidTransition {
                from: current.as_str().to_string(),
                to: next.as_str().to_string(),
            };
            self.fail(&err);
            return Err(err);
        }

        log::info!("Meeting {} {} -> {}", id, current.as_str(), next.as_str());
        self.apply_patch(id, MeetingPatch::status(next)).await
    }

    /// Actions to offer for a meeting in the local list.
    pub fn available_transitions(&self, id: &str) -> Vec<MeetingStatus> {
        self.current_status(id)
            .map(|s| s.available_transitions().to_vec())
            .unwrap_or_default()
    }

    fn current_status(&self, id: &str) -> Option<MeetingStatus> {
        self.with_items(|items| items.iter().find(|m| m.id == id).map(|m| m.status))
    }
}
