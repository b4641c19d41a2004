use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    GridSize, Palette, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT,
    GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL,
};
use crate::engine::GameEvent;
use crate::game::GridSnapshot;
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::render_game_over_menu;

/// Presentation-side copy of the game, rebuilt from [`GameEvent`]s.
#[derive(Debug, Clone)]
pub struct Screen {
    pub snapshot: GridSnapshot,
    pub length: usize,
    pub game_over: bool,
    /// Step delay after the latest speed-up; `None` until food is eaten.
    pub delay: Option<Duration>,
    pub tile_width: u16,
}

impl Screen {
    #[must_use]
    pub fn new(snapshot: GridSnapshot, tile_width: u16) -> Self {
        Self {
            length: snapshot.length(),
            snapshot,
            game_over: false,
            delay: None,
            tile_width,
        }
    }

    /// True once the game-over event has been received.
    #[must_use]
    pub fn accepts_restart(&self) -> bool {
        self.game_over
    }

    /// Clears the game-over overlay ahead of a new game.
    pub fn restart(&mut self) {
        self.game_over = false;
        self.delay = None;
    }

    /// Folds one event from the simulation thread into the view.
    pub fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::Frame(snapshot) => self.snapshot = snapshot,
            GameEvent::Status { length } => self.length = length,
            GameEvent::SpeedUp { delay } => self.delay = Some(delay),
            GameEvent::GameOver { length } => {
                self.length = length;
                self.game_over = true;
            }
        }
    }
}

/// Renders the full frame from the presentation-side view.
pub fn render(frame: &mut Frame<'_>, screen: &Screen, palette: &Palette) {
    let area = frame.area();
    let bounds = screen.snapshot.bounds;
    let play_area = render_hud(
        frame,
        area,
        HudInfo {
            length: screen.length,
            bounds,
            game_over: screen.game_over,
            delay: screen.delay,
        },
        palette,
    );

    let field = field_rect(play_area, bounds, screen.tile_width);
    let block = Block::bordered()
        .border_style(Style::new().fg(palette.border_fg))
        .style(Style::new().bg(palette.grid_bg));
    let inner = block.inner(field);
    frame.render_widget(block, field);

    render_food(frame, inner, screen, palette);
    render_snake(frame, inner, screen, palette);

    if screen.game_over {
        render_game_over_menu(frame, field, screen.length, palette);
    }
}

/// Bordered field rect centred in `area`, clipped when the terminal is too small.
fn field_rect(area: Rect, bounds: GridSize, tile_width: u16) -> Rect {
    let width = bounds.width.saturating_mul(tile_width).saturating_add(2);
    let height = bounds.height.saturating_add(2);

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;

    Rect::new(x, y, width, height).intersection(area)
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, screen: &Screen, palette: &Palette) {
    let Some(food) = screen.snapshot.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, screen.snapshot.bounds, screen.tile_width, food)
    else {
        return;
    };

    let glyph = tile(GLYPH_FOOD, screen.tile_width);
    frame
        .buffer_mut()
        .set_stringn(x, y, glyph, usize::from(inner.right() - x), Style::new().fg(palette.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, screen: &Screen, palette: &Palette) {
    let head_style = Style::new()
        .fg(palette.snake_head)
        .add_modifier(Modifier::BOLD);
    let body_style = Style::new().fg(palette.snake_body);
    let tail_style = Style::new().fg(palette.snake_tail);
    let head_glyph = tile(head_glyph(screen.snapshot.direction), screen.tile_width);
    let body_glyph = tile(GLYPH_SNAKE_BODY, screen.tile_width);
    let tail_glyph = tile(GLYPH_SNAKE_TAIL, screen.tile_width);
    let tail_index = screen.snapshot.snake.len().saturating_sub(1);

    let buffer = frame.buffer_mut();
    for (index, segment) in screen.snapshot.snake.iter().enumerate() {
        let Some((x, y)) =
            logical_to_terminal(inner, screen.snapshot.bounds, screen.tile_width, *segment)
        else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (head_glyph.as_str(), head_style)
        } else if index == tail_index {
            (tail_glyph.as_str(), tail_style)
        } else {
            (body_glyph.as_str(), body_style)
        };
        buffer.set_stringn(x, y, glyph, usize::from(inner.right() - x), style);
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn tile(glyph: &str, tile_width: u16) -> String {
    glyph.repeat(usize::from(tile_width))
}

fn logical_to_terminal(
    inner: Rect,
    bounds: GridSize,
    tile_width: u16,
    position: Position,
) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(tile_width)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
