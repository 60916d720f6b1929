use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};

use super::*;

/// One line of the trace file.
#[derive(Debug, Serialize)]
struct TraceEvent<'a> {
    seq: u64,
    ts: String,
    event: &'a str,
    payload: Value,
}

/// Append-only JSONL record of a picking session.
#[derive(Debug)]
pub(in crate::tui_shell) struct TraceWriter {
    out: BufWriter<File>,
    seq: u64,
}

impl TraceWriter {
    pub(in crate::tui_shell) fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create trace directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open trace file {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
            seq: 0,
        })
    }

    /// Each event is flushed so a crashed session still leaves a readable trace.
    pub(in crate::tui_shell) fn record(&mut self, event: &str, payload: Value) -> Result<()> {
        self.seq += 1;
        let line = TraceEvent {
            seq: self.seq,
            ts: now_ts(),
            event,
            payload,
        };
        serde_json::to_writer(&mut self.out, &line)
            .with_context(|| format!("serialize trace event {}", event))?;
        writeln!(self.out).context("write trace line")?;
        self.out.flush().context("flush trace")?;
        Ok(())
    }
}

impl App {
    pub(in crate::tui_shell) fn enable_trace(&mut self, path: Option<std::path::PathBuf>) {
        let Some(path) = path else {
            return;
        };
        match TraceWriter::open(&path) {
            Ok(writer) => {
                self.trace = Some(writer);
                let payload = json!({
                    "data_dir": self.store.root().display().to_string(),
                    "restored_chars": self.editor.buf.chars().count(),
                    "header_marker": self.format.header_marker,
                });
                self.trace_event("session_start", payload);
            }
            Err(err) => self.push_error(format!("trace disabled: {:#}", err)),
        }
    }

    /// A failing trace is dropped after one error; the session carries on.
    pub(in crate::tui_shell) fn trace_event(&mut self, event: &str, payload: Value) {
        let Some(writer) = self.trace.as_mut() else {
            return;
        };
        if let Err(err) = writer.record(event, payload) {
            self.trace = None;
            self.push_error(format!("trace disabled: {:#}", err));
        }
    }
}
