//! Terminal UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use filterman_core::cursor::rows;
use filterman_core::{normalize, App, InputTarget, Mode, Row};

// Catppuccin Mocha colors
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const YELLOW: Color = Color::Rgb(249, 226, 175);
const GREEN: Color = Color::Rgb(166, 227, 161);
const BLUE: Color = Color::Rgb(137, 180, 250);
const MAUVE: Color = Color::Rgb(203, 166, 247);
const TEAL: Color = Color::Rgb(148, 226, 213);

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Areas
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_areas(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    match app.mode {
        Mode::Input => draw_input_dialog(frame, app),
        Mode::ConfirmLoad => draw_confirm_dialog(frame),
        Mode::Help => draw_help(frame),
        Mode::Normal => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let pairs = app.request_export().len();
    let title_text = format!(
        " Filterman - {} [{} areas, {} pairs] edited {}",
        app.title(),
        app.store.len(),
        pairs,
        app.store.updated_at.format("%H:%M:%S")
    );

    let title_bar = Paragraph::new(title_text).style(Style::default().fg(TEXT).bg(SURFACE0));
    frame.render_widget(title_bar, area);
}

fn draw_areas(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title(format!("Areas ({})", app.store.len()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = rows(&app.store);
    if layout.is_empty() {
        let hint = Paragraph::new("No areas yet. Press 'a' to add some (e.g. A1, B1-B3, 5).")
            .style(Style::default().fg(SUBTEXT0));
        frame.render_widget(hint, inner);
        return;
    }

    let visible = inner.height as usize;
    let scroll = if app.selection.row >= visible {
        app.selection.row - visible + 1
    } else {
        0
    };

    let items: Vec<ListItem> = layout
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible)
        .map(|(i, row)| {
            let selected = i == app.selection.row;
            let marker = if selected { ">" } else { " " };
            let base = if selected {
                Style::default().bg(SURFACE1)
            } else {
                Style::default()
            };

            let line = match row {
                Row::Area(handle) => {
                    let Some(entry) = app.store.area(*handle) else {
                        return ListItem::new("");
                    };
                    let mut spans = vec![
                        Span::styled(format!("{} Area: ", marker), base.fg(SUBTEXT0)),
                        Span::styled(entry.id.clone(), base.fg(TEXT).add_modifier(Modifier::BOLD)),
                    ];
                    if entry.is_wildcard() {
                        spans.push(Span::styled("  (all)", base.fg(YELLOW)));
                    }
                    Line::from(spans)
                }
                Row::SubArea(handle, sub_handle) => {
                    let token = app
                        .store
                        .area(*handle)
                        .and_then(|a| a.sub_area(*sub_handle))
                        .map(|s| s.token.as_str())
                        .unwrap_or("");
                    let mut spans = vec![
                        Span::styled(format!("{}     - ", marker), base.fg(SUBTEXT0)),
                        Span::styled(token.to_string(), base.fg(TEAL)),
                    ];
                    let out = normalize(token.trim());
                    if out != token.trim() {
                        spans.push(Span::styled(format!("  -> {}", out), base.fg(SUBTEXT0)));
                    }
                    Line::from(spans)
                }
            };
            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_str = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Input => "INPUT",
        Mode::ConfirmLoad => "CONFIRM",
        Mode::Help => "HELP",
    };

    let status = app.status_message.as_deref().unwrap_or("");

    let help_hint = "a add | s sub-area | d delete | w save | o open | y/Y copy | ? help";

    let status_text = format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { help_hint } else { status },
    );

    let status_bar =
        Paragraph::new(status_text).style(Style::default().fg(SUBTEXT0).bg(SURFACE0));

    frame.render_widget(status_bar, area);
}

fn draw_input_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 5, frame.area());
    frame.render_widget(Clear, area);

    let title = match app.input_target {
        InputTarget::AreaSpec => "Enter areas (e.g. A1, B1-C3)",
        InputTarget::AreaId(_) => "Edit area",
        InputTarget::SubArea(_, _) => "Edit sub-area (* for all)",
        InputTarget::SavePath => "Save to file",
        InputTarget::LoadPath => "Open file",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GREEN))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = Paragraph::new(format!("{}_", app.input_buffer)).style(Style::default().fg(TEXT));
    frame.render_widget(input, inner);
}

fn draw_confirm_dialog(frame: &mut Frame) {
    let area = centered_rect(60, 5, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(YELLOW))
        .title("Load filters");

    let text = vec![
        Line::from("Loading a new file will clear all unsaved changes."),
        Line::from(Span::styled("Continue? (y/n)", Style::default().fg(SUBTEXT0))),
    ];
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let heading = Style::default().fg(MAUVE).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Navigation", heading)),
        Line::from("  j/k      Move down/up"),
        Line::from("  g/G      Go to top/bottom"),
        Line::from(""),
        Line::from(Span::styled("Editing", heading)),
        Line::from("  a        Add areas (A1, B1-B3, 5-7)"),
        Line::from("  s        Add sub-area to selected area"),
        Line::from("  i/Enter  Edit selected area or sub-area"),
        Line::from("  d        Delete area / remove sub-area"),
        Line::from(""),
        Line::from(Span::styled("File", heading)),
        Line::from("  w        Save"),
        Line::from("  o        Open"),
        Line::from("  y/Y      Copy areas / sub-areas"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(SUBTEXT0))),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
