use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::Palette;

const POPUP_WIDTH: u16 = 30;
const POPUP_HEIGHT: u16 = 7;

/// Draws the game-over popup centred over `area`.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, length: usize, palette: &Palette) {
    let popup = centered_popup(area, POPUP_WIDTH, POPUP_HEIGHT);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(palette.game_over_fg)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("Length: {length}")),
        Line::from(""),
        Line::from("[Enter]/[Space] Play again"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(palette.border_fg))),
        popup,
    );
}

/// Fixed-size rect centred in `area`, shrunk to fit when `area` is smaller.
fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .areas(mid);

    center
}
