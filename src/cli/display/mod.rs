pub mod table;

pub use table::{list_table, note_table, render_list, task_table};
