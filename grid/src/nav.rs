//! Cursor navigation (spec.md §4.11).

use crate::cell::{CellKind, GridState};

fn is_editable(cell: &crate::cell::Cell, include_hints: bool) -> bool {
    match cell.kind {
        CellKind::Letter => true,
        CellKind::Hint => include_hints,
        CellKind::Punctuation => false,
    }
}

/// Nearest editable cell strictly after `pos`, or `-1`.
pub fn next_letter(grid: &GridState, pos: isize) -> isize {
    let start = pos.max(-1) + 1;
    for cell in grid.cells().iter().filter(|c| c.index as isize >= start) {
        if is_editable(cell, false) {
            return cell.index as isize;
        }
    }
    -1
}

/// Nearest editable cell strictly before `pos`, or `-1`.
pub fn prev_letter(grid: &GridState, pos: isize) -> isize {
    if pos <= 0 {
        return -1;
    }
    for cell in grid.cells().iter().rev().filter(|c| (c.index as isize) < pos) {
        if is_editable(cell, false) {
            return cell.index as isize;
        }
    }
    -1
}

/// Nearest `Letter` cell with an empty input, strictly after `pos`, or
/// `-1`. Used for auto-advance after a keystroke.
pub fn next_unfilled(grid: &GridState, pos: isize) -> isize {
    let start = pos.max(-1) + 1;
    for cell in grid.cells().iter().filter(|c| c.index as isize >= start) {
        if cell.kind == CellKind::Letter && cell.input.is_none() {
            return cell.index as isize;
        }
    }
    -1
}

/// After a successful `set(pos, _)`, advances the cursor to the nearest
/// unfilled `Letter` cell if one exists, else to the next editable cell.
pub fn advance_after_set(grid: &GridState, pos: isize) -> isize {
    let unfilled = next_unfilled(grid, pos);
    if unfilled != -1 {
        unfilled
    } else {
        next_letter(grid, pos)
    }
}

pub fn first_letter(grid: &GridState) -> isize {
    grid.cells()
        .iter()
        .find(|c| is_editable(c, false))
        .map(|c| c.index as isize)
        .unwrap_or(-1)
}

pub fn last_letter(grid: &GridState) -> isize {
    grid.cells()
        .iter()
        .rev()
        .find(|c| is_editable(c, false))
        .map(|c| c.index as isize)
        .unwrap_or(-1)
}

/// A word: a run of consecutive non-space cell indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub start: usize,
    pub end: usize, // exclusive
}

/// Groups consecutive non-space cells into words.
pub fn words(ciphertext: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, c) in ciphertext.chars().enumerate() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push(Word { start: s, end: idx });
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        words.push(Word { start: s, end: ciphertext.chars().count() });
    }
    words
}

/// A single rendered line: the cell index range it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub start: usize,
    pub end: usize, // exclusive
}

/// Word-aware wrapping: packs words onto lines of at most `width` cells
/// (each cell occupying `cell_width` display columns), never splitting a
/// word, and strips the leading space a wrapped line would otherwise
/// start with. Pure in `(words, width, cell_width)`.
pub fn wrap(words: &[Word], total_len: usize, width: usize, cell_width: usize) -> Vec<Line> {
    if width == 0 || cell_width == 0 {
        return vec![Line { start: 0, end: total_len }];
    }
    let cols_per_line = (width / cell_width).max(1);

    let mut lines = Vec::new();
    let mut line_start = 0usize;
    let mut cursor = 0usize;

    for word in words {
        let word_len = word.end - word.start;
        let prospective_len = word.end - line_start;
        if cursor > line_start && prospective_len > cols_per_line {
            lines.push(Line { start: line_start, end: cursor });
            line_start = word.start;
        }
        cursor = word.start + word_len;
    }
    lines.push(Line {
        start: line_start,
        end: total_len.max(line_start),
    });
    lines
}

/// Maps a `(row, col)` grid coordinate, produced by a mouse click against
/// the rendered word-wrap layout, to a cell index.
pub fn coordinate_to_index(lines: &[Line], row: usize, col: usize) -> isize {
    let Some(line) = lines.get(row) else {
        return -1;
    };
    let idx = line.start + col;
    if idx < line.end {
        idx as isize
    } else {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn grid(ciphertext: &str) -> GridState {
        GridState::new(ciphertext, &HashMap::new())
    }

    #[test]
    fn next_letter_moves_forward_past_punctuation() {
        let g = grid("A, B");
        assert_eq!(next_letter(&g, -1), 0);
        assert_eq!(next_letter(&g, 0), 3);
        assert_eq!(next_letter(&g, 3), -1);
    }

    #[test]
    fn next_letter_is_monotonic_when_defined() {
        let g = grid("AB CD");
        let mut pos = -1;
        while next_letter(&g, pos) != -1 {
            let next = next_letter(&g, pos);
            assert!(next > pos);
            assert_eq!(g.cell(next as usize).unwrap().kind, CellKind::Letter);
            pos = next;
        }
    }

    #[test]
    fn prev_letter_moves_backward() {
        let g = grid("A, B");
        assert_eq!(prev_letter(&g, 3), 0);
        assert_eq!(prev_letter(&g, 0), -1);
    }

    #[test]
    fn next_unfilled_skips_filled_cells() {
        let mut g = grid("AB");
        g.set(0, 'X');
        assert_eq!(next_unfilled(&g, -1), 1);
    }

    #[test]
    fn advance_after_set_prefers_unfilled_then_falls_back() {
        let mut g = grid("AB");
        g.set(0, 'X');
        assert_eq!(advance_after_set(&g, 0), 1);
        g.set(1, 'Y');
        assert_eq!(advance_after_set(&g, 1), -1);
    }

    #[test]
    fn first_and_last_letter_bounds() {
        let g = grid("A, B");
        assert!(first_letter(&g) <= last_letter(&g));
        assert_eq!(first_letter(&g), 0);
        assert_eq!(last_letter(&g), 3);
    }

    #[test]
    fn first_and_last_are_minus_one_when_no_letters() {
        let g = grid(", . !");
        assert_eq!(first_letter(&g), -1);
        assert_eq!(last_letter(&g), -1);
    }

    #[test]
    fn words_groups_non_space_runs() {
        let ws = words("AB CD  EF");
        assert_eq!(ws.len(), 3);
        assert_eq!(ws[0], Word { start: 0, end: 2 });
        assert_eq!(ws[1], Word { start: 3, end: 5 });
        assert_eq!(ws[2], Word { start: 7, end: 9 });
    }

    #[test]
    fn wrap_never_splits_a_word() {
        let text = "AAAA BBBB CCCC";
        let ws = words(text);
        let lines = wrap(&ws, text.len(), 9, 1);
        for line in &lines {
            for w in &ws {
                assert!(!(w.start > line.start && w.start < line.end && w.end > line.end));
            }
        }
    }

    #[test]
    fn coordinate_to_index_respects_line_bounds() {
        let lines = vec![Line { start: 0, end: 4 }, Line { start: 5, end: 9 }];
        assert_eq!(coordinate_to_index(&lines, 0, 2), 2);
        assert_eq!(coordinate_to_index(&lines, 1, 0), 5);
        assert_eq!(coordinate_to_index(&lines, 1, 10), -1);
        assert_eq!(coordinate_to_index(&lines, 5, 0), -1);
    }
}
