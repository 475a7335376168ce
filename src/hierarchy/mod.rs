pub mod completion;
pub mod delete;
pub mod subtasks;

pub use completion::{after_completion, ParentDecision};
pub use delete::delete_tree;
pub use subtasks::save_tasks;
