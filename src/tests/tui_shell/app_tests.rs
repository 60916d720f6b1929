use ratatui::backend::TestBackend;

use super::*;
use crate::model::AppConfig;
use crate::session::RAW_TEXT_KEY;
use crate::store::KeyValueStore;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        let code = if c == '\n' {
            KeyCode::Enter
        } else {
            KeyCode::Char(c)
        };
        event_loop::handle_key(app, key(code), Instant::now());
    }
}

fn screen(app: &App, now: Instant) -> Result<Vec<String>> {
    let mut terminal = Terminal::new(TestBackend::new(60, 30)).context("create terminal")?;
    terminal
        .draw(|f| render::draw(f, app, now))
        .context("draw")?;
    let buf = terminal.backend().buffer();
    let rows = (0..buf.area.height)
        .map(|y| {
            (0..buf.area.width)
                .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                .collect::<String>()
        })
        .collect();
    Ok(rows)
}

fn app_in(dir: &tempfile::TempDir) -> App {
    App::new(LocalStore::open(dir.path()))
}

#[test]
fn first_launch_shows_default_menu_and_placeholder() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let app = app_in(&tmp);
    assert_eq!(app.editor.buf, DEFAULT_MENU);
    assert_eq!(app.session.raw_text(), DEFAULT_MENU);
    assert!(app.log.is_empty());

    let rows = screen(&app, Instant::now())?;
    assert!(rows.iter().any(|r| r.trim() == "?"));
    Ok(())
}

#[test]
fn typed_menu_is_picked_and_persisted() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let mut app = app_in(&tmp);
    event_loop::handle_key(&mut app, ctrl('u'), Instant::now());
    assert_eq!(app.session.raw_text(), "");

    type_text(&mut app, "noodles\t12\n餐厅： x\n");
    let now = Instant::now();
    event_loop::handle_key(&mut app, ctrl('r'), now);

    assert_eq!(app.session.result(), Some("noodles"));
    assert!(app.celebration.is_playing(now));
    assert_eq!(
        app.store.get(RAW_TEXT_KEY)?.as_deref(),
        Some("noodles\t12\n餐厅： x\n")
    );
    assert_eq!(app.last_status().map(|e| e.kind), Some(EntryKind::Output));

    let rows = screen(&app, now + Duration::from_secs(5))?;
    assert!(rows.iter().any(|r| r.trim() == "noodles"));
    Ok(())
}

#[test]
fn button_focus_submits_on_enter() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let mut app = app_in(&tmp);
    event_loop::handle_key(&mut app, ctrl('u'), Instant::now());
    event_loop::handle_paste(&mut app, "rice\t3\r\n");

    event_loop::handle_key(&mut app, key(KeyCode::Tab), Instant::now());
    assert_eq!(app.focus, Focus::Button);
    event_loop::handle_key(&mut app, key(KeyCode::Enter), Instant::now());
    assert_eq!(app.session.result(), Some("rice"));
    assert_eq!(app.editor.buf, "rice\t3\n");
    Ok(())
}

#[test]
fn empty_menu_keeps_the_previous_result_silently() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let mut app = app_in(&tmp);
    event_loop::handle_key(&mut app, ctrl('u'), Instant::now());
    type_text(&mut app, "soup");
    event_loop::handle_key(&mut app, key(KeyCode::F(5)), Instant::now());
    assert_eq!(app.session.result(), Some("soup"));
    let entries = app.log.len();

    event_loop::handle_key(&mut app, ctrl('u'), Instant::now());
    let later = Instant::now() + Duration::from_secs(10);
    event_loop::handle_key(&mut app, ctrl('r'), later);
    assert_eq!(app.session.result(), Some("soup"));
    assert_eq!(app.session.generation(), 1);
    assert!(!app.celebration.is_playing(later));
    assert_eq!(app.log.len(), entries);
    Ok(())
}

#[test]
fn restart_relaunch_restores_submitted_text() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    {
        let mut app = app_in(&tmp);
        event_loop::handle_key(&mut app, ctrl('u'), Instant::now());
        type_text(&mut app, "dumplings");
        event_loop::handle_key(&mut app, ctrl('r'), Instant::now());
    }
    let app = app_in(&tmp);
    assert_eq!(app.editor.buf, "dumplings");
    assert_eq!(app.session.result(), None);
    Ok(())
}

#[test]
fn bad_config_is_reported_and_defaults_apply() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let store = LocalStore::open(tmp.path());
    store.write_config(&AppConfig {
        delimiter: "||".to_string(),
        ..AppConfig::default()
    })?;
    let app = App::new(store);
    assert_eq!(app.format, MenuFormat::default());
    let status = app.last_status().map(|e| (e.kind, e.text.clone()));
    assert!(matches!(status, Some((EntryKind::Error, ref t)) if t.contains("delimiter")));
    Ok(())
}

#[test]
fn trace_records_session_events() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let trace_path = tmp.path().join("logs/trace.jsonl");
    let mut app = App::load(crate::tui::TuiRunOptions {
        data_dir: tmp.path().join("data"),
        trace: Some(trace_path.clone()),
    });
    event_loop::handle_key(&mut app, ctrl('u'), Instant::now());
    event_loop::handle_key(&mut app, ctrl('r'), Instant::now());
    type_text(&mut app, "tea");
    event_loop::handle_key(&mut app, ctrl('r'), Instant::now());
    app.finish();

    let raw = std::fs::read_to_string(&trace_path).context("read trace")?;
    let events: Vec<serde_json::Value> = raw
        .lines()
        .map(serde_json::from_str)
        .collect::<std::result::Result<_, _>>()
        .context("parse trace")?;
    let names: Vec<&str> = events
        .iter()
        .filter_map(|e| e["event"].as_str())
        .collect();
    assert_eq!(names, vec!["session_start", "no_items", "submit", "session_end"]);
    assert_eq!(events[2]["payload"]["picked"], "tea");
    assert_eq!(events[3]["seq"], 4);
    Ok(())
}

#[test]
fn quit_keys_stop_the_loop() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let mut app = app_in(&tmp);
    event_loop::handle_key(&mut app, key(KeyCode::Esc), Instant::now());
    assert!(app.quit);

    let mut app = app_in(&tmp);
    event_loop::handle_key(&mut app, ctrl('c'), Instant::now());
    assert!(app.quit);
    Ok(())
}

#[test]
fn trace_lines_carry_sequence_and_timestamps() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let path = tmp.path().join("trace.jsonl");
    let mut writer = TraceWriter::open(&path)?;
    writer.record("first", json!({ "n": 1 }))?;
    writer.record("second", json!(null))?;

    // Reopening appends rather than truncating.
    let mut reopened = TraceWriter::open(&path)?;
    reopened.record("third", json!({}))?;

    let raw = std::fs::read_to_string(&path).context("read trace")?;
    let lines: Vec<serde_json::Value> = raw
        .lines()
        .map(serde_json::from_str)
        .collect::<std::result::Result<_, _>>()
        .context("parse trace")?;
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1]["seq"], 2);
    assert_eq!(lines[1]["event"], "second");
    assert_eq!(lines[2]["seq"], 1);
    for line in &lines {
        let ts = line["ts"].as_str().context("ts is a string")?;
        assert!(OffsetDateTime::parse(ts, &Rfc3339).is_ok(), "bad ts {ts}");
    }
    Ok(())
}
