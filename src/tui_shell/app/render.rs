use super::*;

const TITLE: &str = "🍔 今晚吃什么？";
const PLACEHOLDER: &str = "?";
const FIELD_LABEL: &str = "内容";
const FIELD_HELP: &str = "复制菜单表格内容到下面.";
const BUTTON_LABEL: &str = "随机 ✨";
const KEY_HINTS: &str = "Ctrl+R randomize  Tab focus  Esc quit";
const EDITOR_ROWS: u16 = 8;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App, now: Instant) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(EDITOR_ROWS + 2),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(area);

    let header = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    draw_result(frame, app, chunks[1], now);

    frame.render_widget(
        Paragraph::new(Span::styled(
            FIELD_LABEL,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            FIELD_HELP,
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        )),
        chunks[3],
    );

    draw_editor(frame, app, chunks[4]);
    draw_button(frame, app, chunks[5]);
    draw_status(frame, app, chunks[6]);
}

fn draw_result(frame: &mut ratatui::Frame, app: &App, area: Rect, now: Instant) {
    // Confetti first so the result text lands on top of it.
    let buf = frame.buffer_mut();
    for p in app.celebration.particles(now, area) {
        if let Some(cell) = buf.cell_mut((p.x, p.y)) {
            cell.set_char(p.glyph).set_fg(p.color);
        }
    }

    let text = app.session.result().unwrap_or(PLACEHOLDER);
    let scale = app.celebration.scale(now);
    let mut style = Style::default().add_modifier(Modifier::BOLD);
    let shown = if scale >= 1.25 {
        style = style.fg(Color::Yellow);
        spread(text)
    } else {
        text.to_string()
    };

    let row = Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1.min(area.height),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(shown, style)).alignment(Alignment::Center),
        row,
    );
}

/// Terminal cells cannot grow, so a "larger" result is letter-spaced instead.
fn spread(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

fn draw_editor(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Editor;
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (row, col) = app.editor.cursor_position();
    let height = inner.height as usize;
    let scroll = if height > 0 && row >= height {
        row + 1 - height
    } else {
        0
    };

    let lines: Vec<Line> = app
        .editor
        .display_lines()
        .into_iter()
        .skip(scroll)
        .take(height)
        .map(Line::from)
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    if focused && inner.width > 0 && inner.height > 0 {
        let x = inner.x + (col as u16).min(inner.width - 1);
        let y = inner.y + (row - scroll) as u16;
        frame.set_cursor_position((x, y));
    }
}

fn draw_button(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let width = 14.min(area.width);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    };
    let style = if app.focus == Focus::Button {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let button = Paragraph::new(Span::styled(BUTTON_LABEL, style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(button, rect);
}

fn draw_status(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let line = match app.last_status() {
        Some(entry) => {
            let style = match entry.kind {
                EntryKind::Output => Style::default().fg(Color::White),
                EntryKind::Error => Style::default().fg(Color::Red),
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", fmt_ts_ui(&entry.ts)),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(entry.text.as_str(), style),
                Span::raw("  "),
                Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)),
            ])
        }
        None => Line::from(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::TOP)),
        area,
    );
}
