//! Terminal rendering (spec.md §4.11, §4.12): draws the grid using the
//! word-aware wrap layout from `unquote_grid::nav`, and a placeholder
//! when the terminal is below the minimum usable size.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as UiLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use unquote_grid::cell::CellKind;
use unquote_grid::nav;

use crate::state::{ClientState, PlayingState};

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 10;
const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, state: &ClientState) {
    let area = frame.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        draw_placeholder(frame, area);
        return;
    }

    match state {
        ClientState::Loading => draw_message(frame, area, "Loading today's puzzle..."),
        ClientState::Error(message) => draw_message(frame, area, &format!("Error: {message} (press q to quit)")),
        ClientState::Playing(playing) => draw_playing(frame, area, playing, false),
        ClientState::Checking(playing) => draw_playing(frame, area, playing, true),
        ClientState::Solved(playing) => draw_solved(frame, area, playing),
    }
}

fn draw_placeholder(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("terminal too small — resize to at least 40x10")
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_message(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(message).block(Block::default().borders(Borders::ALL).title("unquote"));
    frame.render_widget(paragraph, area);
}

fn draw_solved(frame: &mut Frame, area: Rect, playing: &PlayingState) {
    let message = format!(
        "Solved in {}s! \"{}\" — {} (press q to quit)",
        playing.elapsed_seconds, playing.puzzle.ciphertext, playing.puzzle.author
    );
    draw_message(frame, area, &message);
}

fn draw_playing(frame: &mut Frame, area: Rect, playing: &PlayingState, checking: bool) {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .split(area);

    let header = Paragraph::new(format!(
        "{}  difficulty {}  elapsed {}s{}",
        playing.puzzle.category,
        playing.puzzle.difficulty,
        playing.elapsed_seconds,
        if checking { "  (checking...)" } else { "" }
    ))
    .block(Block::default().borders(Borders::ALL).title("unquote"));
    frame.render_widget(header, chunks[0]);

    let words = nav::words(&playing.puzzle.ciphertext);
    let lines = nav::wrap(&words, playing.puzzle.ciphertext.chars().count(), chunks[1].width as usize, 2);

    let rendered: Vec<UiLine> = lines
        .iter()
        .map(|line| {
            let spans: Vec<Span> = playing.grid.cells()[line.start..line.end]
                .iter()
                .map(|cell| {
                    let text = match cell.kind {
                        CellKind::Punctuation => cell.char.to_string(),
                        CellKind::Letter | CellKind::Hint => cell.input.unwrap_or('_').to_string(),
                    };
                    let mut style = Style::default();
                    if cell.index as isize == playing.cursor {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    if cell.kind == CellKind::Hint {
                        style = style.fg(Color::Yellow);
                    } else if playing.grid.is_conflicting(cell.index) {
                        style = style.fg(Color::Red);
                    }
                    Span::styled(format!("{text} "), style)
                })
                .collect();
            UiLine::from(spans)
        })
        .collect();

    let body = Paragraph::new(rendered).block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, chunks[1]);

    let footer = Paragraph::new("letters to fill · arrows to move · enter to submit · q to quit")
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);
}

/// The width `draw_playing` hands to `nav::wrap` when laying out the
/// grid body — the mouse-click translation below must wrap against the
/// same width or a click would resolve to the wrong cell.
pub(crate) fn body_width(area_width: u16) -> usize {
    area_width as usize
}

/// Translates a mouse click at a terminal-absolute `(col, row)` into a
/// `(row, col)` pair relative to the grid body's text interior, or
/// `None` if the click landed on the header, footer, border, or a
/// terminal too small to render the grid at all.
pub(crate) fn click_to_grid_coordinate(area_width: u16, area_height: u16, col: u16, row: u16) -> Option<(usize, usize)> {
    if area_width < MIN_WIDTH || area_height < MIN_HEIGHT {
        return None;
    }
    if area_height <= HEADER_HEIGHT + FOOTER_HEIGHT + 2 {
        return None;
    }
    let body_top = HEADER_HEIGHT;
    let body_bottom = area_height - FOOTER_HEIGHT;
    if row <= body_top || row >= body_bottom - 1 {
        return None;
    }
    if col == 0 || col >= area_width - 1 {
        return None;
    }
    let grid_row = (row - body_top - 1) as usize;
    let grid_col = (col - 1) as usize;
    Some((grid_row, grid_col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_inside_the_body_resolves_to_interior_coordinates() {
        assert_eq!(click_to_grid_coordinate(60, 20, 5, 4), Some((0, 4)));
    }

    #[test]
    fn click_on_header_footer_or_border_is_rejected() {
        assert_eq!(click_to_grid_coordinate(60, 20, 5, 0), None);
        assert_eq!(click_to_grid_coordinate(60, 20, 5, 3), None);
        assert_eq!(click_to_grid_coordinate(60, 20, 0, 4), None);
        assert_eq!(click_to_grid_coordinate(60, 20, 59, 4), None);
    }

    #[test]
    fn click_on_a_too_small_terminal_is_rejected() {
        assert_eq!(click_to_grid_coordinate(10, 5, 2, 2), None);
    }
}
