pub mod controller;
pub mod edit_session;
pub mod task_ops;
pub mod view;

pub use controller::TaskList;
