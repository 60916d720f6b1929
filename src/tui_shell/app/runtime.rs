use std::io::{self, IsTerminal, Stdout};

use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::{App, event_loop};

/// Puts the terminal back the way it was on drop, including when setup
/// fails halfway or the loop returns early.
struct TerminalSession {
    raw: bool,
    screen: bool,
}

impl TerminalSession {
    fn enter(stdout: &mut Stdout) -> Result<Self> {
        let mut session = TerminalSession {
            raw: false,
            screen: false,
        };
        enable_raw_mode().context("enable raw mode")?;
        session.raw = true;
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("enter alternate screen")?;
        session.screen = true;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.screen {
            execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen).ok();
        }
        if self.raw {
            disable_raw_mode().ok();
        }
    }
}

pub(in crate::tui_shell) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("menupick needs an interactive terminal; try `menupick pick`");
    }

    let mut stdout = io::stdout();
    let _session = TerminalSession::enter(&mut stdout)?;

    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::load(opts);
    let res = event_loop::run_loop(&mut terminal, &mut app);
    app.finish();
    terminal.show_cursor().ok();

    res
}
