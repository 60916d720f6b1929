use anyhow::Result;

mod app;
mod celebration;
mod editor;

use app::App;
use celebration::Celebration;
use editor::Editor;

pub fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}
