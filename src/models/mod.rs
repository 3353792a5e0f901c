pub mod meeting;
pub mod person;
pub mod resource;
pub mod room;
pub mod task;
pub mod wire;

pub use meeting::{Meeting, MeetingDraft, MeetingPatch, MeetingStatus};
pub use person::{Person, PersonDraft, PersonPatch, PersonStatus};
pub use resource::Resource;
pub use room::{Room, RoomDraft, RoomPatch, RoomStatus};
pub use task::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
