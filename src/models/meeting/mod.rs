mod payload;
mod status;
mod types;

pub use payload::{NewMeeting, parse_duration};
pub use types::*;
