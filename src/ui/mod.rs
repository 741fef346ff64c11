//! egui rendering. Widgets read from and write to [`crate::state::AppState`];
//! no filtering or fetching happens here.

pub mod forms;
pub mod panels;
pub mod plot;
pub mod table;
