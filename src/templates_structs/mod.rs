// Response and template context structures for the mock backend.

mod api;
mod dashboard;

pub use api::*;
pub use dashboard::*;
