//! Port trait definitions (Hexagonal Architecture)
//!
//! Async interfaces that storage adapters implement:
//! - TaskStore: persistent keyed collection of tasks
//! - MentorCallNoteEndpoint: note records at the store boundary
//!
//! The services depend only on these traits, never on a concrete store.

pub mod note_endpoint;
pub mod task_store;

pub use note_endpoint::MentorCallNoteEndpoint;
pub use task_store::TaskStore;
