use std::io;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use serde_json::json;
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use crate::menu::MenuFormat;
use crate::pick::OsRandom;
use crate::session::{DEFAULT_MENU, Session, Submission};
use crate::store::LocalStore;

use super::{Celebration, Editor};

mod event_loop;
mod render;
mod runtime;
mod trace;

pub(super) use runtime::run;
use trace::TraceWriter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Focus {
    Editor,
    Button,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::Editor => Focus::Button,
            Focus::Button => Focus::Editor,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum EntryKind {
    Output,
    Error,
}

#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct StatusEntry {
    pub(in crate::tui_shell) ts: String,
    pub(in crate::tui_shell) kind: EntryKind,
    pub(in crate::tui_shell) text: String,
}

pub(in crate::tui_shell) struct App {
    pub(in crate::tui_shell) store: LocalStore,
    pub(in crate::tui_shell) format: MenuFormat,
    pub(in crate::tui_shell) session: Session,
    rng: OsRandom,

    pub(in crate::tui_shell) editor: Editor,
    pub(in crate::tui_shell) focus: Focus,
    pub(in crate::tui_shell) celebration: Celebration,

    pub(in crate::tui_shell) trace: Option<TraceWriter>,

    // Every status message this session; the last one is on screen.
    pub(in crate::tui_shell) log: Vec<StatusEntry>,

    pub(in crate::tui_shell) quit: bool,
}

impl App {
    /// Build the app over `store`, restoring the last submitted menu text.
    ///
    /// Unreadable config or storage is reported in the status line and the
    /// defaults are used instead.
    pub(in crate::tui_shell) fn new(store: LocalStore) -> Self {
        let mut errors = Vec::new();

        let config = store.read_config().unwrap_or_else(|err| {
            errors.push(format!("{:#}", err));
            Default::default()
        });
        let format = config.menu_format().unwrap_or_else(|err| {
            errors.push(format!("config: {:#}", err));
            MenuFormat::default()
        });
        let session = Session::restore(&store).unwrap_or_else(|err| {
            errors.push(format!("{:#}", err));
            Session::new(DEFAULT_MENU)
        });

        let mut editor = Editor::default();
        editor.set(session.raw_text());

        let mut app = App {
            store,
            format,
            session,
            rng: OsRandom,
            editor,
            focus: Focus::Editor,
            celebration: Celebration::new(Duration::from_millis(config.celebration_ms)),
            trace: None,
            log: Vec::new(),
            quit: false,
        };
        for msg in errors {
            app.push_error(msg);
        }
        app
    }

    pub(in crate::tui_shell) fn load(opts: crate::tui::TuiRunOptions) -> Self {
        let mut app = App::new(LocalStore::open(&opts.data_dir));
        app.enable_trace(opts.trace);
        app
    }

    pub(in crate::tui_shell) fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    /// Mirror the editor buffer into the session after every edit.
    pub(in crate::tui_shell) fn text_changed(&mut self) {
        self.session.set_raw_text(self.editor.buf.as_str());
    }

    pub(in crate::tui_shell) fn submit(&mut self, now: Instant) {
        self.text_changed();
        let outcome = self
            .session
            .submit(&self.store, &mut self.rng, &self.format);
        match outcome {
            Ok(Submission::Picked {
                item,
                candidates,
                generation,
            }) => {
                self.celebration.restart(now, generation);
                self.push_output(format!("picked 1 of {}", candidates));
                self.trace_event(
                    "submit",
                    json!({
                        "candidates": candidates,
                        "picked": item,
                        "generation": generation,
                    }),
                );
            }
            Ok(Submission::NoItems) => {
                self.trace_event("no_items", json!({ "chars": self.editor.buf.chars().count() }));
            }
            Err(err) => {
                let msg = format!("{:#}", err);
                self.trace_event("error", json!({ "message": msg }));
                self.push_error(msg);
            }
        }
    }

    pub(in crate::tui_shell) fn push_output(&mut self, text: String) {
        self.push_entry(EntryKind::Output, text);
    }

    pub(in crate::tui_shell) fn push_error(&mut self, text: String) {
        self.push_entry(EntryKind::Error, text);
    }

    fn push_entry(&mut self, kind: EntryKind, text: String) {
        self.log.push(StatusEntry {
            ts: now_ts(),
            kind,
            text,
        });
    }

    pub(in crate::tui_shell) fn last_status(&self) -> Option<&StatusEntry> {
        self.log.last()
    }

    pub(in crate::tui_shell) fn finish(&mut self) {
        let picks = self.session.generation();
        self.trace_event("session_end", json!({ "picks": picks }));
    }
}

pub(in crate::tui_shell) fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

fn ts_ui_format() -> Option<&'static [FormatItem<'static>]> {
    static FMT: OnceLock<Option<Vec<FormatItem<'static>>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[hour padding:zero]:[minute padding:zero]:[second padding:zero]",
        )
        .ok()
    })
    .as_deref()
}

pub(in crate::tui_shell) fn fmt_ts_ui(ts: &str) -> String {
    OffsetDateTime::parse(ts, &Rfc3339)
        .ok()
        .zip(ts_ui_format())
        .and_then(|(dt, fmt)| dt.format(fmt).ok())
        .unwrap_or_else(|| ts.to_string())
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
