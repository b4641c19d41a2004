use std::time::Duration;

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::{GridSize, Palette};

const HUD_HEIGHT: u16 = 1;

/// Values shown on the status row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub length: usize,
    pub bounds: GridSize,
    pub game_over: bool,
    pub delay: Option<Duration>,
}

/// Renders the status row at the bottom of `area` and returns the area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: HudInfo, palette: &Palette) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(HUD_HEIGHT)]).areas(area);

    frame.render_widget(
        Paragraph::new(status_line(info, palette)).alignment(Alignment::Center),
        status_area,
    );

    play_area
}

fn status_line(info: HudInfo, palette: &Palette) -> Line<'static> {
    let value_style = Style::default()
        .fg(palette.status_fg)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(palette.border_fg);

    let mut spans = vec![
        Span::styled("Length: ", label_style),
        Span::styled(info.length.to_string(), value_style),
        Span::styled(
            format!("  {}x{}", info.bounds.width, info.bounds.height),
            label_style,
        ),
    ];
    if let Some(delay) = info.delay {
        spans.push(Span::styled(
            format!("  {}ms/step", delay.as_millis()),
            label_style,
        ));
    }
    if info.game_over {
        spans.push(Span::styled(
            "  game over",
            Style::default().fg(palette.game_over_fg),
        ));
    }

    Line::from(spans)
}
