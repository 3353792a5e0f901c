use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::validate::FieldError;

/// Schema of one remote collection.
///
/// Each entity supplies its path, its form draft, and the mapping from that
/// draft to the JSON the backend expects. One generic client and controller
/// serve every collection through this trait.
pub trait Resource:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Form state; blank strings stand for absent optional values.
    type Draft: Clone + Default + Debug + PartialEq + Send + Sync + 'static;
    /// Body of a create request.
    type NewPayload: Serialize + Send + Sync;
    /// Body of an update request. Absent fields must not be serialized.
    type Patch: Serialize + Default + Debug + Send + Sync;

    /// Path segment under the API base URL, e.g. `salas`.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Copy a record's fields into an editable draft.
    fn to_draft(&self) -> Self::Draft;

    fn validate(draft: &Self::Draft) -> Vec<FieldError>;

    fn new_payload(draft: &Self::Draft) -> Self::NewPayload;

    fn patch(draft: &Self::Draft) -> Self::Patch;
}
