//! Application services for the task list.

mod actions;
mod controller;

pub use actions::TaskActionService;
pub use controller::{TaskListController, TaskListView, filter_tasks};
