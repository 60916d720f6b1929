pub mod app_dirs;
pub mod menu;
pub mod model;
pub mod pick;
pub mod session;
pub mod store;
pub mod tui;

mod tui_shell;
