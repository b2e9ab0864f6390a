//! Shared UI pieces around the play field: layout, status bar, info panel
//! frame, start prompt and the game-over banner.

use crate::core::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const STATUS_BAR_HEIGHT: u16 = 2;

/// Areas returned by [`create_game_layout`].
pub struct GameLayout {
    /// Everything left of the info panel and above the status bar.
    pub content: Rect,
    /// Canvas-shaped play field, centered in `content`.
    pub field: Rect,
    pub status_bar: Rect,
    /// Right column, full inner height.
    pub info_panel: Rect,
}

/// Outer frame with the title on its top border, split into play area,
/// status bar and info panel.
///
/// ```text
/// ┌─ ->Dino Link<- ─────────────────┬─ Run ───────┐
/// │   ┌─────────────────────────┐   │             │
/// │   │ [field, 920:280]        │   │  [info]     │
/// │   └─────────────────────────┘   │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [left, info_panel] = split(
        inner,
        Direction::Horizontal,
        [Constraint::Min(0), Constraint::Length(info_panel_width)],
    );
    let [content, status_bar] = split(
        left,
        Direction::Vertical,
        [Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)],
    );

    GameLayout {
        content,
        field: letterbox(content),
        status_bar,
        info_panel,
    }
}

fn split(area: Rect, direction: Direction, constraints: [Constraint; 2]) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);
    [chunks[0], chunks[1]]
}

/// Largest rectangle inside `area` with the canvas aspect ratio, counting
/// two pixel rows per terminal row.
pub fn letterbox(area: Rect) -> Rect {
    let scale = (area.width as f64 / CANVAS_WIDTH).min(area.height as f64 * 2.0 / CANVAS_HEIGHT);
    let width = ((CANVAS_WIDTH * scale + 1e-9).floor() as u16).min(area.width);
    let height = ((CANVAS_HEIGHT * scale / 2.0 - 1e-9).ceil() as u16).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Two-line status bar: the phase word, then `[key] action` pairs.
pub fn render_status_bar(frame: &mut Frame, area: Rect, status: Span, controls: &[(&str, &str)]) {
    if area.height == 0 {
        return;
    }

    let mut top = area;
    top.height = 1;
    frame.render_widget(
        Paragraph::new(Line::from(status)).alignment(Alignment::Center),
        top,
    );

    if area.height < 2 || controls.is_empty() {
        return;
    }

    let spans: Vec<Span> = controls
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let gap = if i == 0 { "" } else { "  " };
            [
                Span::raw(gap),
                Span::styled(format!("[{}]", key), Style::default().fg(Color::White)),
                Span::styled(format!(" {}", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    let mut bottom = top;
    bottom.y += 1;
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        bottom,
    );
}

/// Bordered side panel tinted with `accent`; returns the inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect, accent: Color) -> Rect {
    let block = Block::default()
        .title(Span::styled(" Run ", Style::default().fg(accent)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// "Label: value" line for the info panel.
pub fn info_line(label: &str, value: String, value_color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(
            value,
            Style::default()
                .fg(value_color)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Single centered line over the middle of `area`.
pub fn render_start_prompt(frame: &mut Frame, area: Rect, prompt: &str) {
    let width = prompt.chars().count() as u16;
    if area.height < 3 || area.width < width {
        return;
    }

    let center_y = area.y + area.height / 2;
    let x = area.x + (area.width - width) / 2;

    let line = Paragraph::new(Line::from(vec![Span::styled(
        prompt.to_string(),
        Style::default()
            .fg(Color::White)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )]));
    frame.render_widget(line, Rect::new(x, center_y, width, 1));
}

/// Game-over banner over the middle of the play field.
///
/// Does not clear the field, so the frozen scene stays visible around it.
pub fn render_game_over_banner(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let banner_height: u16 = 4;
    let banner_width = (message.chars().count().max(title.chars().count()) as u16 + 6)
        .min(area.width);
    if area.height < banner_height || banner_width == 0 {
        return;
    }

    let banner_area = Rect::new(
        area.x + (area.width - banner_width) / 2,
        area.y + (area.height - banner_height) / 2,
        banner_width,
        banner_height,
    );
    frame.render_widget(Clear, banner_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(banner_area);
    frame.render_widget(block, banner_area);

    let lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Shown instead of the game when the terminal cannot fit it.
pub fn render_too_small(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    frame.render_widget(Clear, area);
    let text = vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{}x{} < {}x{}",
            area.width, area.height, min_width, min_height
        )),
    ];
    let y = area.y + area.height.saturating_sub(2) / 2;
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, area.height.min(2)),
    );
}
