//! Board engine - selection cursor, swaps, shift animation and match resolution
//!
//! The engine is a two-state machine:
//!
//! - **Idle**: input is accepted; every tick resolves matches on the board.
//! - **Shifting**: exactly two tiles are animating a swap; all input is
//!   rejected until both reach rest.
//!
//! A swap commits to the grid the instant it is accepted; only the rendered
//! placements lag behind. Rejected input is a silent no-op (the call returns
//! `false`), never an error.

use arrayvec::ArrayVec;
use tracing::{debug, error, info, trace};

use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::grid::Grid;
use crate::matcher::{find_runs, Run};
use crate::rng::SimpleRng;
use crate::sanitize::{randomize, sanitize};
use crate::snapshot::{BoardSnapshot, TileSnapshot};
use crate::tile::{Tile, TileId};
use crate::types::{BoardAction, Direction, MAX_CELLS};

/// Upper bound on runs one scan can report (two candidates per cell)
const MAX_RUNS: usize = MAX_CELLS * 2;

/// Swap animation state. A shift always involves exactly two tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftState {
    Idle,
    Shifting { a: TileId, b: TileId },
}

/// Record of one match resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEvent {
    /// Runs reported by the scan (overlapping runs counted separately)
    pub runs: u32,
    /// Tiles deactivated by this resolution
    pub tiles_cleared: u32,
}

#[derive(Debug, Clone)]
pub struct BoardEngine {
    config: BoardConfig,
    grid: Grid,
    rng: SimpleRng,
    seed: u32,
    cursor_x: i8,
    cursor_y: i8,
    shift: ShiftState,
    cleared: u32,
    last_event: Option<MatchEvent>,
}

impl BoardEngine {
    /// Build a random, sanitized board from `config`
    ///
    /// Seeds from the system clock when `config.seed` is `None`.
    pub fn new(config: BoardConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self::with_rng(config, SimpleRng::new(seed))
    }

    /// Build a random, sanitized board drawing from an injected generator
    pub fn with_rng(config: BoardConfig, rng: SimpleRng) -> Result<Self> {
        config.validate()?;
        let seed = rng.state();
        let grid = Grid::new(config.width, config.height, config.tile_size)?;

        let mut engine = Self {
            config,
            grid,
            rng,
            seed,
            cursor_x: 0,
            cursor_y: 0,
            shift: ShiftState::Idle,
            cleared: 0,
            last_event: None,
        };
        engine.populate()?;

        info!(
            width = engine.config.width,
            height = engine.config.height,
            palette = engine.config.palette_size,
            seed,
            "board engine created"
        );
        Ok(engine)
    }

    /// Wrap a hand-built grid; kinds are kept as given (no randomization or
    /// sanitization). The grid's size overrides `config`'s.
    pub fn from_grid(grid: Grid, config: BoardConfig) -> Result<Self> {
        let config = BoardConfig {
            width: grid.width(),
            height: grid.height(),
            tile_size: grid.tile_size(),
            ..config
        };
        config.validate()?;
        let seed = config.seed.unwrap_or(1);

        let mut engine = Self {
            config,
            grid,
            rng: SimpleRng::new(seed),
            seed,
            cursor_x: 0,
            cursor_y: 0,
            shift: ShiftState::Idle,
            cleared: 0,
            last_event: None,
        };
        engine.reset_cursor();
        Ok(engine)
    }

    /// Throw the board away and deal a fresh one from the same RNG stream
    ///
    /// The stream position becomes the reported seed, so `seed()` still
    /// regenerates the board on screen.
    pub fn restart(&mut self) -> Result<()> {
        self.seed = self.rng.state();
        self.grid = Grid::new(self.config.width, self.config.height, self.config.tile_size)?;
        self.shift = ShiftState::Idle;
        self.cleared = 0;
        self.last_event = None;
        self.populate()?;
        info!(seed = self.seed, "board restarted");
        Ok(())
    }

    fn populate(&mut self) -> Result<()> {
        randomize(&mut self.grid, &mut self.rng, self.config.palette_size)?;
        let changed = sanitize(
            &mut self.grid,
            &mut self.rng,
            self.config.palette_size,
            self.config.sanitize_passes,
            self.config.min_run_length,
        )?;
        debug!(changed, "initial board sanitized");
        self.reset_cursor();
        Ok(())
    }

    fn reset_cursor(&mut self) {
        for idx in 0..self.grid.len() {
            self.grid.tile_mut(TileId(idx as u8)).set_selected(false);
        }
        self.cursor_x = 0;
        self.cursor_y = 0;
        if let Ok(tile) = self.grid.get_mut(0, 0) {
            tile.set_selected(true);
        }
        if !self.grid.get(0, 0).map(Tile::is_active).unwrap_or(false) {
            self.relocate_cursor();
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Seed the board was generated from
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> ShiftState {
        self.shift
    }

    pub fn is_shifting(&self) -> bool {
        matches!(self.shift, ShiftState::Shifting { .. })
    }

    /// Tiles currently animating a swap
    pub fn shifting_pair(&self) -> Option<(TileId, TileId)> {
        match self.shift {
            ShiftState::Idle => None,
            ShiftState::Shifting { a, b } => Some((a, b)),
        }
    }

    /// Selection cursor `(x, y)`
    pub fn selected(&self) -> (i8, i8) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn selected_tile(&self) -> Option<&Tile> {
        self.grid.get(self.cursor_x, self.cursor_y).ok()
    }

    pub fn tile_at(&self, x: i8, y: i8) -> Option<&Tile> {
        self.grid.get(x, y).ok()
    }

    pub fn tiles(&self) -> &[Tile] {
        self.grid.tiles()
    }

    /// Total tiles deactivated since the board was dealt
    pub fn cleared(&self) -> u32 {
        self.cleared
    }

    /// Take and clear the last match resolution
    pub fn take_last_event(&mut self) -> Option<MatchEvent> {
        self.last_event.take()
    }

    /// Cell one step from the cursor, if it holds an active tile
    fn neighbour(&self, dir: Direction) -> Option<(i8, i8)> {
        let (dx, dy) = dir.delta();
        let (x, y) = (self.cursor_x + dx, self.cursor_y + dy);
        match self.grid.get(x, y) {
            Ok(tile) if tile.is_active() => Some((x, y)),
            _ => None,
        }
    }

    fn move_cursor(&mut self, x: i8, y: i8) {
        if let Ok(tile) = self.grid.get_mut(self.cursor_x, self.cursor_y) {
            tile.set_selected(false);
        }
        self.cursor_x = x;
        self.cursor_y = y;
        if let Ok(tile) = self.grid.get_mut(x, y) {
            tile.set_selected(true);
        }
    }

    /// Move the selection cursor one cell
    ///
    /// Rejected while shifting, at the board edge, or toward an inactive tile.
    pub fn select_direction(&mut self, dir: Direction) -> bool {
        if self.is_shifting() {
            trace!(dir = dir.as_str(), "select rejected: shift in progress");
            return false;
        }
        let Some((x, y)) = self.neighbour(dir) else {
            trace!(dir = dir.as_str(), "select rejected: no active tile");
            return false;
        };
        self.move_cursor(x, y);
        true
    }

    /// Swap the selected tile with its neighbour and start the shift animation
    ///
    /// Rejected while shifting, at the board edge, or toward an inactive tile.
    /// On success the cursor follows the selected tile to its new cell.
    pub fn swap_direction(&mut self, dir: Direction) -> bool {
        if self.is_shifting() {
            trace!(dir = dir.as_str(), "swap rejected: shift in progress");
            return false;
        }
        let Some((x, y)) = self.neighbour(dir) else {
            trace!(dir = dir.as_str(), "swap rejected: no active tile");
            return false;
        };

        match self.start_shift(x, y) {
            Ok(()) => {
                debug!(
                    from_x = self.cursor_x,
                    from_y = self.cursor_y,
                    to_x = x,
                    to_y = y,
                    "swap accepted"
                );
                // Cursor follows the selected tile; its flag moved with it.
                self.cursor_x = x;
                self.cursor_y = y;
                true
            }
            Err(err) => {
                invariant_broken(&err);
                false
            }
        }
    }

    fn start_shift(&mut self, x: i8, y: i8) -> Result<()> {
        let (sx, sy) = (self.cursor_x, self.cursor_y);
        let a = self.grid.tile_id(sx, sy)?;
        let b = self.grid.tile_id(x, y)?;
        let dest_a = self.grid.cell_placement(x, y)?;
        let dest_b = self.grid.cell_placement(sx, sy)?;

        self.grid.tile_mut(a).begin_shift(dest_a);
        self.grid.tile_mut(b).begin_shift(dest_b);
        self.grid.swap_cells(sx, sy, x, y)?;
        self.shift = ShiftState::Shifting { a, b };
        Ok(())
    }

    pub fn select_left(&mut self) -> bool {
        self.select_direction(Direction::Left)
    }

    pub fn select_right(&mut self) -> bool {
        self.select_direction(Direction::Right)
    }

    pub fn select_up(&mut self) -> bool {
        self.select_direction(Direction::Up)
    }

    pub fn select_down(&mut self) -> bool {
        self.select_direction(Direction::Down)
    }

    pub fn swap_left(&mut self) -> bool {
        self.swap_direction(Direction::Left)
    }

    pub fn swap_right(&mut self) -> bool {
        self.swap_direction(Direction::Right)
    }

    pub fn swap_up(&mut self) -> bool {
        self.swap_direction(Direction::Up)
    }

    pub fn swap_down(&mut self) -> bool {
        self.swap_direction(Direction::Down)
    }

    /// Apply a discrete input event; returns whether it was accepted
    pub fn apply_action(&mut self, action: BoardAction) -> bool {
        match action {
            BoardAction::Select(dir) => self.select_direction(dir),
            BoardAction::Swap(dir) => self.swap_direction(dir),
        }
    }

    /// Advance one frame of `elapsed_secs`
    ///
    /// While shifting, both tiles advance in lockstep; once both rest the
    /// engine returns to idle. Whenever the engine is idle after that, matches
    /// are resolved. Returns true if any tile moved or was deactivated.
    pub fn tick(&mut self, elapsed_secs: f32) -> bool {
        let mut changed = false;

        if let ShiftState::Shifting { a, b } = self.shift {
            let step = self.config.shift_timing.progress_for(elapsed_secs);
            changed = step > 0.0;
            let a_done = self.grid.tile_mut(a).advance(step);
            let b_done = self.grid.tile_mut(b).advance(step);
            if a_done && b_done {
                self.shift = ShiftState::Idle;
                debug!("shift complete");
            }
        }

        if !self.is_shifting() {
            changed |= self.resolve_matches();
        }

        changed
    }

    /// Deactivate every tile of every reported run.
    ///
    /// Runs are collected before any tile changes so that overlapping runs of a
    /// longer line clear the whole line.
    fn resolve_matches(&mut self) -> bool {
        let runs: ArrayVec<Run, MAX_RUNS> = find_runs(&self.grid, self.config.min_run_length).collect();
        if runs.is_empty() {
            return false;
        }

        let mut tiles_cleared = 0u32;
        for run in &runs {
            for (x, y) in run.cells() {
                match self.grid.get_mut(x, y) {
                    Ok(tile) if tile.is_active() => {
                        tile.deactivate();
                        tiles_cleared += 1;
                    }
                    Ok(_) => {}
                    Err(err) => invariant_broken(&err),
                }
            }
        }

        self.cleared += tiles_cleared;
        self.last_event = Some(MatchEvent {
            runs: runs.len() as u32,
            tiles_cleared,
        });
        info!(runs = runs.len(), tiles_cleared, "matches resolved");

        if !self.selected_tile().map(Tile::is_active).unwrap_or(false) {
            self.relocate_cursor();
        }
        true
    }

    /// Move the cursor to the nearest active tile (Manhattan distance, ties in
    /// reading order). Stays put when no active tile is left.
    fn relocate_cursor(&mut self) {
        let (cx, cy) = (self.cursor_x, self.cursor_y);
        let nearest = self
            .grid
            .iter_cells()
            .filter(|(_, _, tile)| tile.is_active())
            .map(|(x, y, _)| ((x - cx).abs() as u16 + (y - cy).abs() as u16, x, y))
            .min_by_key(|(dist, _, _)| *dist);

        if let Some((_, x, y)) = nearest {
            self.move_cursor(x, y);
        }
    }

    /// Fill `out` with the current board state without allocating
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.tile_size = self.grid.tile_size();
        out.selected_x = self.cursor_x;
        out.selected_y = self.cursor_y;
        out.shifting = self.is_shifting();
        out.cleared = self.cleared;
        out.seed = self.seed;
        out.tiles.clear();
        for (x, y, tile) in self.grid.iter_cells() {
            out.tiles.push(TileSnapshot::from_tile(x, y, tile));
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn invariant_broken(err: &BoardError) {
    error!(%err, "board invariant broken");
    debug_assert!(false, "board invariant broken: {}", err);
}

fn clock_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
