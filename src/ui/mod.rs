//! Terminal presentation. Reads game state; never mutates it.

pub mod game_common;
pub mod game_scene;
pub mod title;

use crate::assets::Assets;
use crate::core::constants::{MIN_SURFACE_HEIGHT, MIN_SURFACE_WIDTH, PLAYER_COUNT};
use crate::core::game_state::GameState;
use crate::palette::tier_for_score;
use crate::player::ControlBindings;
use game_common::{
    create_game_layout, info_line, render_game_over_banner, render_info_panel_frame,
    render_start_prompt, render_status_bar, render_too_small,
};
use game_scene::{player_color, render_play_field, to_color};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const INFO_PANEL_WIDTH: u16 = 22;
const BORDER_COLOR: Color = Color::LightYellow;

/// Where the session stands, from the host's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing armed yet; players shown idle.
    Idle,
    Running,
    GameOver,
}

/// Everything one draw needs.
pub struct View<'a> {
    pub state: &'a GameState,
    pub assets: &'a Assets,
    pub bindings: &'a [ControlBindings; PLAYER_COUNT],
    pub phase: Phase,
    /// Typewriter title as revealed so far.
    pub title: &'a str,
    pub show_hitboxes: bool,
}

pub fn draw(frame: &mut Frame, view: &View) {
    let area = frame.size();
    if area.width < MIN_SURFACE_WIDTH || area.height < MIN_SURFACE_HEIGHT {
        render_too_small(frame, area, MIN_SURFACE_WIDTH, MIN_SURFACE_HEIGHT);
        return;
    }

    let layout = create_game_layout(frame, area, view.title, BORDER_COLOR, INFO_PANEL_WIDTH);

    render_play_field(
        frame,
        layout.field,
        view.state,
        view.assets,
        view.show_hitboxes,
    );

    match view.phase {
        Phase::Idle => render_start_prompt(frame, layout.field, "[ Press Enter to Start ]"),
        Phase::GameOver => render_game_over_banner(
            frame,
            layout.field,
            "GAME OVER",
            &format!("Final score: {}", view.state.score),
        ),
        Phase::Running => {}
    }

    render_status(frame, layout.status_bar, view);
    render_info_panel(frame, layout.info_panel, view);
}

fn render_status(frame: &mut Frame, area: Rect, view: &View) {
    let hitbox_action = if view.show_hitboxes {
        "Hide hitboxes"
    } else {
        "Hitboxes"
    };
    let (status, color, start_action) = match view.phase {
        Phase::Idle => ("Ready", Color::LightYellow, "Start"),
        Phase::Running => ("Run!", Color::LightGreen, "Restart"),
        Phase::GameOver => ("Game over", Color::Yellow, "Restart"),
    };
    render_status_bar(
        frame,
        area,
        Span::styled(status, Style::default().fg(color)),
        &[
            ("Enter", start_action),
            ("H", hitbox_action),
            ("Q", "Quit"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, view: &View) {
    let state = view.state;
    let inner = render_info_panel_frame(frame, area, to_color(state.colors().sky));

    let mut lines: Vec<Line> = vec![
        info_line("Score", state.score.to_string(), Color::White),
        info_line("Speed", format!("{:.0}", state.speed), Color::White),
        info_line(
            "Sky",
            format!("{}/30", tier_for_score(state.score) + 1),
            Color::White,
        ),
        info_line(
            "Alive",
            format!("{}/{}", state.living_players(), state.players.len()),
            Color::White,
        ),
        Line::from(""),
        Line::from(Span::styled("Controls:", Style::default().fg(Color::Yellow))),
    ];

    for (index, binding) in view.bindings.iter().enumerate() {
        let status = match state.players.get(index) {
            Some(player) if player.is_dead => " (out)",
            _ => "",
        };
        lines.push(Line::from(vec![
            Span::styled(" \u{2588} ", Style::default().fg(player_color(index))),
            Span::styled(
                format!("P{} {}{}", index + 1, binding.label(), status),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
