use super::*;

const IDLE_POLL: Duration = Duration::from_millis(50);
const ANIMATION_POLL: Duration = Duration::from_millis(16);

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let now = Instant::now();
        terminal
            .draw(|f| super::render::draw(f, app, now))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        let poll = if app.celebration.is_playing(now) {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        };
        if event::poll(poll).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => {
                    handle_key(app, k, Instant::now())
                }
                Event::Paste(text) => handle_paste(app, &text),
                _ => {}
            }
        }
    }
}

pub(super) fn handle_paste(app: &mut App, text: &str) {
    app.focus = Focus::Editor;
    app.editor.insert_str(text);
    app.text_changed();
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.quit = true;
            return;
        }
        KeyCode::Esc => {
            app.quit = true;
            return;
        }
        KeyCode::Char('r') if ctrl => {
            app.submit(now);
            return;
        }
        KeyCode::F(5) => {
            app.submit(now);
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Button => handle_button_key(app, key, now),
        Focus::Editor => handle_editor_key(app, key),
    }
}

fn handle_button_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.submit(now),
        KeyCode::Up => app.focus = Focus::Editor,
        _ => {}
    }
}

fn handle_editor_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let editor = &mut app.editor;

    match key.code {
        KeyCode::Enter => editor.newline(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Char('u') if ctrl => editor.clear(),
        KeyCode::Char(c) if !ctrl => editor.insert_char(c),

        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Down => editor.move_down(),
        KeyCode::Home => editor.move_home(),
        KeyCode::End => editor.move_end(),
        _ => return,
    }
    app.text_changed();
}
