// ghcard managers
// Managers own stateful component instances.

pub mod widget_manager;
