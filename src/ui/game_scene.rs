//! Play field rendering.
//!
//! Uses half-block pixel rendering: the 920x280 canvas is scaled into a
//! colour grid, and pairs of vertical pixels are packed into one terminal
//! row with `▀` (fg = top pixel, bg = bottom pixel).

use crate::assets::{Assets, Sprite, SpriteId};
use crate::collision::{obstacle_hitbox, player_hitbox, Hitbox};
use crate::core::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, FLOOR_HEIGHT, FLOOR_Y};
use crate::core::game_state::GameState;
use crate::palette::{ColorPair, Rgb};
use crate::world::ObstacleKind;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HALF_TOP: char = '\u{2580}'; // ▀

// ── Entity colours ───────────────────────────────────────────────────
const PLAYER_COLORS: [Color; 2] = [Color::Rgb(255, 200, 60), Color::Rgb(80, 190, 255)];
const DEAD_COLOR: Color = Color::Rgb(200, 60, 60);
const CACTUS_COLOR: Color = Color::Rgb(60, 140, 60);
const PTERODACTYL_COLOR: Color = Color::Rgb(160, 80, 160);
const CLOUD_COLOR: Color = Color::Rgb(245, 245, 245);
const HITBOX_COLOR: Color = Color::Rgb(255, 40, 40);

/// Colour of player `index`, shared with the legend.
pub fn player_color(index: usize) -> Color {
    PLAYER_COLORS[index % PLAYER_COLORS.len()]
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Canvas-space colour grid.
struct PixelGrid {
    width: usize,
    height: usize,
    /// Grid pixels per canvas unit.
    scale: f64,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Largest grid that fits `cols` x `rows` pixels at the canvas aspect ratio.
    fn fit(cols: usize, rows: usize) -> Self {
        let scale = (cols as f64 / CANVAS_WIDTH).min(rows as f64 / CANVAS_HEIGHT);
        let width = (CANVAS_WIDTH * scale + 1e-9).floor() as usize;
        let height = (CANVAS_HEIGHT * scale + 1e-9).floor() as usize;
        Self {
            width,
            height,
            scale,
            pixels: vec![Color::Reset; width * height],
        }
    }

    fn set(&mut self, col: i64, row: i64, color: Color) {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return;
        }
        self.pixels[row as usize * self.width + col as usize] = color;
    }

    fn get(&self, col: usize, row: usize) -> Color {
        self.pixels[row * self.width + col]
    }

    /// Sky at the top fading to the floor colour at the bottom.
    fn fill_background(&mut self, colors: ColorPair) {
        let last = self.height.saturating_sub(1).max(1) as f64;
        for row in 0..self.height {
            let color = to_color(colors.sky.lerp(colors.floor, row as f64 / last));
            for col in 0..self.width {
                self.pixels[row * self.width + col] = color;
            }
        }
    }

    /// Canvas box to half-open pixel ranges.
    fn span(&self, x: f64, y: f64, w: f64, h: f64) -> (i64, i64, i64, i64) {
        (
            (x * self.scale).floor() as i64,
            ((x + w) * self.scale).ceil() as i64,
            (y * self.scale).floor() as i64,
            ((y + h) * self.scale).ceil() as i64,
        )
    }

    /// Scale `sprite` into the canvas box, nearest-neighbour.
    fn stamp(&mut self, sprite: &Sprite, x: f64, y: f64, w: f64, h: f64, color: Color) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let (x0, y0) = (x * self.scale, y * self.scale);
        let (pw, ph) = (w * self.scale, h * self.scale);
        let (c0, c1, r0, r1) = self.span(x, y, w, h);

        for row in r0..r1 {
            let v = (row as f64 + 0.5 - y0) / ph;
            if !(0.0..1.0).contains(&v) {
                continue;
            }
            let sprite_row = (v * sprite.height() as f64) as usize;
            for col in c0..c1 {
                let u = (col as f64 + 0.5 - x0) / pw;
                if !(0.0..1.0).contains(&u) {
                    continue;
                }
                let sprite_col = (u * sprite.width() as f64) as usize;
                if sprite.is_set(sprite_col, sprite_row) {
                    self.set(col, row, color);
                }
            }
        }
    }

    fn outline(&mut self, hitbox: &Hitbox, color: Color) {
        let (c0, c1, r0, r1) = self.span(hitbox.x, hitbox.y, hitbox.width, hitbox.height);
        if c1 <= c0 || r1 <= r0 {
            return;
        }
        for col in c0..c1 {
            self.set(col, r0, color);
            self.set(col, r1 - 1, color);
        }
        for row in r0..r1 {
            self.set(c0, row, color);
            self.set(c1 - 1, row, color);
        }
    }

    /// Pack pixel rows in pairs into terminal lines.
    fn into_lines(self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity((self.height + 1) / 2);
        for pair in (0..self.height).step_by(2) {
            let mut spans: Vec<Span> = Vec::new();
            let mut cur_fg = Color::Reset;
            let mut cur_bg = Color::Reset;
            let mut cur_text = String::new();

            for col in 0..self.width {
                let fg = self.get(col, pair);
                let bg = if pair + 1 < self.height {
                    self.get(col, pair + 1)
                } else {
                    Color::Reset
                };

                if (fg != cur_fg || bg != cur_bg) && !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
                cur_text.push(HALF_TOP);
            }
            if !cur_text.is_empty() {
                spans.push(Span::styled(
                    cur_text,
                    Style::default().fg(cur_fg).bg(cur_bg),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines
    }
}

/// Draw the world into `area`, centered and letterboxed.
pub fn render_play_field(
    frame: &mut Frame,
    area: Rect,
    state: &GameState,
    assets: &Assets,
    show_hitboxes: bool,
) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let mut grid = PixelGrid::fit(area.width as usize, area.height as usize * 2);
    if grid.width == 0 || grid.height == 0 {
        return;
    }

    let colors = state.colors();
    grid.fill_background(colors);

    // ── Clouds ────────────────────────────────────────────────────────
    if let Some(sprite) = assets.get(SpriteId::Cloud) {
        for cloud in &state.clouds {
            grid.stamp(sprite, cloud.x, cloud.y, cloud.width, cloud.height, CLOUD_COLOR);
        }
    }

    // ── Floor: two tiles back to back ─────────────────────────────────
    if let Some(sprite) = assets.get(SpriteId::Floor) {
        let ink = to_color(colors.floor.lerp(Rgb::from_u32(0x000000), 0.6));
        for tile_x in state.floor.tile_offsets() {
            grid.stamp(sprite, tile_x, FLOOR_Y, CANVAS_WIDTH, FLOOR_HEIGHT, ink);
        }
    }

    // ── Players ───────────────────────────────────────────────────────
    for (index, player) in state.players.iter().enumerate() {
        let color = if player.is_dead {
            DEAD_COLOR
        } else {
            player_color(index)
        };
        if let Some(sprite) = assets.get(player.sprite) {
            grid.stamp(sprite, player.x, player.y, player.width, player.height, color);
        }
    }

    // ── Obstacles ─────────────────────────────────────────────────────
    for obstacle in &state.obstacles {
        let color = match obstacle.kind {
            ObstacleKind::Cactus { .. } => CACTUS_COLOR,
            ObstacleKind::Pterodactyl { .. } => PTERODACTYL_COLOR,
        };
        if let Some(sprite) = assets.get(obstacle.sprite) {
            grid.stamp(
                sprite,
                obstacle.x,
                obstacle.y,
                obstacle.width,
                obstacle.height,
                color,
            );
        }
    }

    if show_hitboxes {
        for player in state.players.iter().filter(|p| !p.is_dead) {
            grid.outline(&player_hitbox(player), HITBOX_COLOR);
        }
        for obstacle in &state.obstacles {
            grid.outline(&obstacle_hitbox(obstacle), HITBOX_COLOR);
        }
    }

    // ── Stamp to terminal ─────────────────────────────────────────────
    let grid_cols = grid.width as u16;
    let grid_rows = ((grid.height + 1) / 2) as u16;
    let field = Rect::new(
        area.x + (area.width.saturating_sub(grid_cols)) / 2,
        area.y + (area.height.saturating_sub(grid_rows)) / 2,
        grid_cols.min(area.width),
        grid_rows.min(area.height),
    );
    frame.render_widget(Paragraph::new(grid.into_lines()), field);

    render_score(frame, field, state.score);
}

/// "Score: N" in the top-left corner of the field.
fn render_score(frame: &mut Frame, field: Rect, score: u64) {
    let text = format!(" Score: {} ", score);
    let width = (text.chars().count() as u16).min(field.width);
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::White).bg(Color::Black)),
        Rect::new(field.x, field.y, width, field.height.min(1)),
    );
}
