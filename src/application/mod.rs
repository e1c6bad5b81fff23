pub mod board;

pub use board::{Board, EMPTY_NOTES_MESSAGE, EMPTY_VIEW_MESSAGE};
