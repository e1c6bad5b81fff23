pub mod dispatcher;
pub mod mentor_notes;
pub mod task_engine;
pub mod view;

pub use dispatcher::{ClearCompletedReport, MutationDispatcher, SharedEngine};
pub use mentor_notes::MentorCallNotes;
pub use task_engine::{Applied, ConfirmedMutation, TaskEngine};
pub use view::{derive_view, view_counts, ViewCounts};
