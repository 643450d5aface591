mod schema;
mod task_choice;
mod ui_choice;

pub use schema::*;
pub use task_choice::*;
pub use ui_choice::UIChoice;
