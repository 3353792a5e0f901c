use super::CollectionController;
use crate::errors::ClientError;
use crate::models::Task;
use crate::models::task::TaskPatch;

impl CollectionController<Task> {
    /// Flip the completion flag without opening the editor.
    pub async fn set_completed(&self, id: &str, concluida: bool) -> Result<(), ClientError> {
        self.apply_patch(id, TaskPatch::completed(concluida)).await
    }
}
