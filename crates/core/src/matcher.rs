//! Match detection - pure scan for same-kind runs
//!
//! For every cell in reading order (row 0 first, x fastest) the scanner tries a
//! horizontal run and then a vertical run starting there, each exactly
//! `min_length` cells long. A run is reported when all of its cells hold active
//! tiles of the same kind. Longer lines are reported as several overlapping
//! runs; callers that clear runs get the union.
//!
//! Inactive tiles are logically removed and never take part in a run.

use crate::grid::Grid;
use crate::types::{TileKind, MAX_GRID_DIM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn step(self) -> (i8, i8) {
        match self {
            Axis::Horizontal => (1, 0),
            Axis::Vertical => (0, 1),
        }
    }
}

/// A reported run: `len` cells starting at `(x, y)` along `axis`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub axis: Axis,
    pub x: i8,
    pub y: i8,
    pub len: u8,
    pub kind: TileKind,
}

impl Run {
    /// The `i`-th cell of the run
    pub fn cell(&self, i: u8) -> (i8, i8) {
        let (dx, dy) = self.axis.step();
        (self.x + dx * i as i8, self.y + dy * i as i8)
    }

    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let run = *self;
        (0..run.len).map(move |i| run.cell(i))
    }

    pub fn contains(&self, x: i8, y: i8) -> bool {
        self.cells().any(|c| c == (x, y))
    }
}

/// Resumable scan position.
///
/// The scanner does not borrow the grid between calls, so a caller may mutate
/// the grid after each reported run and the rest of the scan sees the change.
#[derive(Debug, Clone)]
pub struct RunScanner {
    min_length: u8,
    /// `cell_index * 2 + axis` of the next candidate
    step: u16,
}

impl RunScanner {
    pub fn new(min_length: u8) -> Self {
        Self {
            min_length,
            step: 0,
        }
    }

    /// Report the next run at or after the current scan position
    pub fn next_run(&mut self, grid: &Grid) -> Option<Run> {
        if self.min_length == 0 || self.min_length > MAX_GRID_DIM {
            return None;
        }

        let width = grid.width() as u16;
        let total = grid.len() as u16 * 2;

        while self.step < total {
            let cell = self.step / 2;
            let axis = if self.step % 2 == 0 {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            self.step += 1;

            let x = (cell % width) as i8;
            let y = (cell / width) as i8;
            if let Some(run) = run_at(grid, x, y, axis, self.min_length) {
                return Some(run);
            }
        }

        None
    }
}

/// Check for a run of exactly `len` cells starting at `(x, y)`
fn run_at(grid: &Grid, x: i8, y: i8, axis: Axis, len: u8) -> Option<Run> {
    let first = grid.get(x, y).ok().filter(|t| t.is_active())?;
    let kind = first.kind();
    let (dx, dy) = axis.step();

    for i in 1..len as i8 {
        let tile = grid.get(x + dx * i, y + dy * i).ok()?;
        if !tile.is_active() || tile.kind() != kind {
            return None;
        }
    }

    Some(Run {
        axis,
        x,
        y,
        len,
        kind,
    })
}

/// Lazy sequence of all runs on a grid
pub struct Runs<'a> {
    grid: &'a Grid,
    scanner: RunScanner,
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        self.scanner.next_run(self.grid)
    }
}

/// Scan `grid` for runs of `min_length` same-kind active tiles
///
/// # Examples
///
/// ```
/// use skyblocks_core::{find_runs, Grid};
/// use skyblocks_core::types::TileKind::{Blue, Red};
///
/// let grid = Grid::from_kinds(4, 1, &[Red, Red, Red, Red]).unwrap();
/// let origins: Vec<_> = find_runs(&grid, 3).map(|r| (r.x, r.y)).collect();
/// assert_eq!(origins, vec![(0, 0), (1, 0)]);
///
/// let grid = Grid::from_kinds(3, 1, &[Red, Blue, Red]).unwrap();
/// assert_eq!(find_runs(&grid, 3).count(), 0);
/// ```
pub fn find_runs(grid: &Grid, min_length: u8) -> Runs<'_> {
    Runs {
        grid,
        scanner: RunScanner::new(min_length),
    }
}

/// Number of runs currently on the grid
pub fn count_runs(grid: &Grid, min_length: u8) -> usize {
    find_runs(grid, min_length).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind::{Blue, Green, Red, Yellow};

    #[test]
    fn test_no_runs_on_alternating_row() {
        let grid = Grid::from_kinds(5, 1, &[Red, Blue, Red, Blue, Red]).unwrap();
        assert_eq!(count_runs(&grid, 3), 0);
    }

    #[test]
    fn test_horizontal_run_reported_once() {
        let grid = Grid::from_kinds(4, 1, &[Blue, Red, Red, Red]).unwrap();
        let runs: Vec<Run> = find_runs(&grid, 3).collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].axis, Axis::Horizontal);
        assert_eq!((runs[0].x, runs[0].y), (1, 0));
        assert_eq!(runs[0].kind, Red);
        assert_eq!(runs[0].cells().collect::<Vec<_>>(), vec![(1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_vertical_run() {
        // Single column, bottom to top.
        let grid = Grid::from_kinds(1, 4, &[Green, Yellow, Yellow, Yellow]).unwrap();
        let runs: Vec<Run> = find_runs(&grid, 3).collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].axis, Axis::Vertical);
        assert_eq!((runs[0].x, runs[0].y), (0, 1));
        assert!(runs[0].contains(0, 3));
        assert!(!runs[0].contains(0, 0));
    }

    #[test]
    fn test_long_line_reports_overlapping_runs() {
        let grid = Grid::from_kinds(5, 1, &[Red; 5]).unwrap();
        let origins: Vec<i8> = find_runs(&grid, 3).map(|r| r.x).collect();
        assert_eq!(origins, vec![0, 1, 2]);
    }

    #[test]
    fn test_scan_order_is_reading_order_horizontal_first() {
        // 3x3 all red: at each cell the horizontal candidate comes first.
        let grid = Grid::from_kinds(3, 3, &[Red; 9]).unwrap();
        let runs: Vec<(Axis, i8, i8)> = find_runs(&grid, 3).map(|r| (r.axis, r.x, r.y)).collect();
        assert_eq!(
            runs,
            vec![
                (Axis::Horizontal, 0, 0),
                (Axis::Vertical, 0, 0),
                (Axis::Vertical, 1, 0),
                (Axis::Vertical, 2, 0),
                (Axis::Horizontal, 0, 1),
                (Axis::Horizontal, 0, 2),
            ]
        );
    }

    #[test]
    fn test_no_diagonals() {
        #[rustfmt::skip]
        let grid = Grid::from_kinds(3, 3, &[
            Red, Blue, Green,
            Blue, Red, Yellow,
            Green, Yellow, Red,
        ]).unwrap();
        assert_eq!(count_runs(&grid, 3), 0);
    }

    #[test]
    fn test_inactive_tiles_break_runs() {
        let mut grid = Grid::from_kinds(3, 1, &[Red, Red, Red]).unwrap();
        assert_eq!(count_runs(&grid, 3), 1);
        grid.get_mut(1, 0).unwrap().deactivate();
        assert_eq!(count_runs(&grid, 3), 0);
    }

    #[test]
    fn test_degenerate_min_lengths() {
        let grid = Grid::from_kinds(3, 1, &[Red, Red, Red]).unwrap();
        assert_eq!(count_runs(&grid, 0), 0);
        assert_eq!(count_runs(&grid, MAX_GRID_DIM + 1), 0);
        assert_eq!(count_runs(&grid, 4), 0);
        // Length 1: each cell is a horizontal and a vertical run.
        assert_eq!(count_runs(&grid, 1), 6);
    }

    #[test]
    fn test_scanner_sees_mutations_between_runs() {
        let mut grid = Grid::from_kinds(5, 1, &[Red; 5]).unwrap();
        let mut scanner = RunScanner::new(3);

        let first = scanner.next_run(&grid).unwrap();
        assert_eq!(first.x, 0);

        // Break the rest of the line before resuming.
        grid.get_mut(2, 0).unwrap().set_kind(Blue);
        assert_eq!(scanner.next_run(&grid), None);
    }
}
