//! The cell grid model (spec.md §4.10): cells classified by role, linked
//! substitution, conflict and completion detection.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Punctuation,
    Letter,
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub index: usize,
    pub char: char,
    pub input: Option<char>,
    pub kind: CellKind,
}

/// The cell sequence plus cursor and the derived cipher-letter → cell
/// indices linkage.
#[derive(Debug, Clone)]
pub struct GridState {
    cells: Vec<Cell>,
    cursor: isize,
    linkage: HashMap<char, Vec<usize>>,
}

impl GridState {
    /// Builds the grid from a ciphertext and a (possibly empty) hint map
    /// (cipher letter → plaintext reveal).
    pub fn new(ciphertext: &str, hints: &HashMap<char, char>) -> Self {
        let mut cells = Vec::with_capacity(ciphertext.chars().count());
        let mut linkage: HashMap<char, Vec<usize>> = HashMap::new();

        for (index, c) in ciphertext.chars().enumerate() {
            let kind = if c.is_ascii_uppercase() {
                linkage.entry(c).or_default().push(index);
                if hints.contains_key(&c) {
                    CellKind::Hint
                } else {
                    CellKind::Letter
                }
            } else {
                CellKind::Punctuation
            };

            let input = match kind {
                CellKind::Hint => hints.get(&c).copied(),
                _ => None,
            };

            cells.push(Cell {
                index,
                char: c,
                input,
                kind,
            });
        }

        let cursor = cells
            .iter()
            .find(|c| c.kind == CellKind::Letter)
            .map(|c| c.index as isize)
            .unwrap_or(-1);

        Self { cells, cursor, linkage }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn set_cursor(&mut self, index: isize) {
        self.cursor = index;
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Assigns `letter` to the cipher symbol at `index`, propagating to
    /// every cell sharing that symbol (linked substitution). Rejected
    /// (state unchanged) if `index` is out of range or not a `Letter`
    /// cell. Hint cells sharing the symbol are never overwritten.
    pub fn set(&mut self, index: usize, letter: char) -> bool {
        let Some(cell) = self.cells.get(index) else {
            return false;
        };
        if cell.kind != CellKind::Letter {
            return false;
        }
        let symbol = cell.char;

        if let Some(indices) = self.linkage.get(&symbol) {
            for &i in indices {
                if self.cells[i].kind == CellKind::Letter {
                    self.cells[i].input = Some(letter);
                }
            }
        }
        true
    }

    pub fn clear(&mut self, index: usize) -> bool {
        let Some(cell) = self.cells.get(index) else {
            return false;
        };
        if cell.kind != CellKind::Letter {
            return false;
        }
        let symbol = cell.char;
        if let Some(indices) = self.linkage.get(&symbol) {
            for &i in indices {
                if self.cells[i].kind == CellKind::Letter {
                    self.cells[i].input = None;
                }
            }
        }
        true
    }

    /// Resets every `Letter` cell to empty. `Hint` cells are preserved.
    pub fn clear_all(&mut self) {
        for cell in &mut self.cells {
            if cell.kind == CellKind::Letter {
                cell.input = None;
            }
        }
    }

    /// True if some other cipher letter's cells carry the same input as
    /// this cell — reported per-cell for rendering, never blocking input.
    pub fn is_conflicting(&self, index: usize) -> bool {
        let Some(cell) = self.cells.get(index) else {
            return false;
        };
        let Some(input) = cell.input else {
            return false;
        };
        self.cells.iter().any(|other| {
            other.index != index
                && other.char != cell.char
                && other.kind != CellKind::Punctuation
                && other.input == Some(input)
        })
    }

    /// Complete iff every `Letter` cell has a non-empty input.
    pub fn is_complete(&self) -> bool {
        self.cells
            .iter()
            .filter(|c| c.kind == CellKind::Letter)
            .all(|c| c.input.is_some())
    }

    /// Walks cells in order, emitting `input` (or `_` if empty) for
    /// `Letter`/`Hint` cells and `char` verbatim for `Punctuation`.
    pub fn assemble(&self) -> String {
        self.cells
            .iter()
            .map(|cell| match cell.kind {
                CellKind::Punctuation => cell.char,
                CellKind::Letter | CellKind::Hint => cell.input.unwrap_or('_'),
            })
            .collect()
    }

    /// Replays an input map (cipher letter → player letter) through
    /// `set`, for restoring a `LocalSession` (spec.md §4.13). Hint cells
    /// are naturally unaffected since `set` only touches `Letter` cells.
    pub fn replay(&mut self, inputs: &HashMap<char, char>) {
        for cell in self.cells.clone() {
            if cell.kind == CellKind::Letter {
                if let Some(&letter) = inputs.get(&cell.char) {
                    self.set(cell.index, letter);
                }
            }
        }
    }

    /// The current cipher letter → player input map, for persistence.
    pub fn current_inputs(&self) -> HashMap<char, char> {
        let mut map = HashMap::new();
        for cell in &self.cells {
            if cell.kind == CellKind::Letter {
                if let Some(letter) = cell.input {
                    map.insert(cell.char, letter);
                }
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints(pairs: &[(char, char)]) -> HashMap<char, char> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn scenario_linked_substitution() {
        // Grid over ciphertext "BLHHK": set(0, 'H') only touches index 0
        // (unique char); set(2, 'L') touches both 2 and 3 (same char).
        let mut grid = GridState::new("BLHHK", &hints(&[]));
        assert!(grid.set(0, 'H'));
        assert_eq!(grid.cell(0).unwrap().input, Some('H'));
        assert_eq!(grid.cell(2).unwrap().input, None);
        assert_eq!(grid.cell(3).unwrap().input, None);

        assert!(grid.set(2, 'L'));
        assert_eq!(grid.cell(2).unwrap().input, Some('L'));
        assert_eq!(grid.cell(3).unwrap().input, Some('L'));
    }

    #[test]
    fn scenario_hints_reject_writes_and_survive_clear_all() {
        // Hints {A:X} applied to "ABA": indices 0 and 2 are Hint with
        // input X; index 1 is empty Letter. set(0, Z) rejected;
        // clear_all leaves 0 and 2 as X.
        let mut grid = GridState::new("ABA", &hints(&[('A', 'X')]));
        assert_eq!(grid.cell(0).unwrap().kind, CellKind::Hint);
        assert_eq!(grid.cell(0).unwrap().input, Some('X'));
        assert_eq!(grid.cell(1).unwrap().kind, CellKind::Letter);
        assert_eq!(grid.cell(1).unwrap().input, None);

        assert!(!grid.set(0, 'Z'));
        assert_eq!(grid.cell(0).unwrap().input, Some('X'));

        grid.clear_all();
        assert_eq!(grid.cell(0).unwrap().input, Some('X'));
        assert_eq!(grid.cell(2).unwrap().input, Some('X'));
    }

    #[test]
    fn clear_is_set_with_empty() {
        let mut grid = GridState::new("AB", &hints(&[]));
        grid.set(0, 'Z');
        assert!(grid.clear(0));
        assert_eq!(grid.cell(0).unwrap().input, None);
    }

    #[test]
    fn out_of_range_and_non_letter_cells_reject_set() {
        let mut grid = GridState::new("A,B", &hints(&[]));
        assert!(!grid.set(99, 'X'));
        assert!(!grid.set(1, 'X')); // comma is Punctuation
    }

    #[test]
    fn completion_requires_every_letter_cell_filled() {
        let mut grid = GridState::new("AB", &hints(&[]));
        assert!(!grid.is_complete());
        grid.set(0, 'X');
        assert!(!grid.is_complete());
        grid.set(1, 'Y');
        assert!(grid.is_complete());
    }

    #[test]
    fn hints_and_punctuation_do_not_block_completion() {
        let grid = GridState::new("A,A", &hints(&[('A', 'X')]));
        assert!(grid.is_complete());
    }

    #[test]
    fn conflict_detection_flags_cells_sharing_an_input() {
        let mut grid = GridState::new("AB", &hints(&[]));
        grid.set(0, 'X');
        grid.set(1, 'X');
        assert!(grid.is_conflicting(0));
        assert!(grid.is_conflicting(1));

        grid.set(1, 'Y');
        assert!(!grid.is_conflicting(0));
        assert!(!grid.is_conflicting(1));
    }

    #[test]
    fn assemble_emits_underscore_for_empty_letters() {
        let grid = GridState::new("A, A", &hints(&[]));
        assert_eq!(grid.assemble(), "_, _");
    }

    #[test]
    fn replay_restores_inputs_without_touching_hints() {
        let mut grid = GridState::new("ABA", &hints(&[('A', 'X')]));
        let mut inputs = HashMap::new();
        inputs.insert('B', 'Q');
        grid.replay(&inputs);
        assert_eq!(grid.cell(1).unwrap().input, Some('Q'));
        assert_eq!(grid.cell(0).unwrap().input, Some('X'));
    }
}
