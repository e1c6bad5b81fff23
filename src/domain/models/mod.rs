pub mod config;
pub mod note;
pub mod task;
pub mod view;

pub use config::{Config, DatabaseConfig, LoggingConfig};
pub use note::{validate_note, MentorCallNote, NoteId, StoredNote};
pub use task::{DueDate, NewTask, Priority, Task, TaskDraft, TaskKey, TaskPatch};
pub use view::{SortMode, StatusFilter, Tab, ViewParameters};
