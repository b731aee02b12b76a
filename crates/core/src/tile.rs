//! Tile module - state of a single board cell
//!
//! A tile carries its match kind, its active/selected flags, its authoritative
//! grid coordinates and the two placements it is rendered between. Tiles are
//! created once with the grid and never destroyed; a matched tile is only
//! deactivated.

use serde::Serialize;

use crate::types::{Placement, TileKind, PROGRESS_EPSILON};

/// Stable handle of a tile inside its grid's storage.
///
/// A tile keeps its id for the whole engine lifetime, even as swaps move it
/// between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileId(pub(crate) u8);

impl TileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    kind: TileKind,
    active: bool,
    selected: bool,
    grid_x: i8,
    grid_y: i8,
    prev: Placement,
    dest: Placement,
    /// 1.0 = at rest on `dest`; below 1.0 = moving from `prev` to `dest`
    progress: f32,
}

impl Tile {
    /// Create an active, unselected tile resting at `placement`
    pub fn new(kind: TileKind, grid_x: i8, grid_y: i8, placement: Placement) -> Self {
        Self {
            kind,
            active: true,
            selected: false,
            grid_x,
            grid_y,
            prev: placement,
            dest: placement,
            progress: 1.0,
        }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: TileKind) {
        self.kind = kind;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Remove the tile from play. The cell keeps it; nothing refills the slot.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn grid_x(&self) -> i8 {
        self.grid_x
    }

    pub fn grid_y(&self) -> i8 {
        self.grid_y
    }

    pub fn grid_pos(&self) -> (i8, i8) {
        (self.grid_x, self.grid_y)
    }

    /// Only the grid may move a tile between cells.
    pub(crate) fn set_grid_pos(&mut self, x: i8, y: i8) {
        self.grid_x = x;
        self.grid_y = y;
    }

    pub fn prev_placement(&self) -> Placement {
        self.prev
    }

    pub fn dest_placement(&self) -> Placement {
        self.dest
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_at_rest(&self) -> bool {
        self.progress >= 1.0
    }

    /// Rendered placement: `prev` blended toward `dest` by `progress`
    pub fn current_placement(&self) -> Placement {
        if self.is_at_rest() {
            return self.dest;
        }
        Placement::lerp(self.prev, self.dest, self.progress)
    }

    /// Start animating from wherever the tile is drawn now toward `dest`
    pub(crate) fn begin_shift(&mut self, dest: Placement) {
        self.prev = self.current_placement();
        self.dest = dest;
        self.progress = 0.0;
    }

    /// Put the tile at rest on `placement` with no animation
    pub(crate) fn rest_at(&mut self, placement: Placement) {
        self.prev = placement;
        self.dest = placement;
        self.progress = 1.0;
    }

    /// Advance the animation by `amount`, clamped to 1.0.
    ///
    /// Returns true once the tile is at rest. Non-positive or NaN amounts make
    /// no progress, so `progress` never decreases.
    pub(crate) fn advance(&mut self, amount: f32) -> bool {
        if self.is_at_rest() {
            return true;
        }
        if amount > 0.0 {
            self.progress += amount;
            if self.progress >= 1.0 - PROGRESS_EPSILON {
                self.progress = 1.0;
            }
        }
        self.is_at_rest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile_at_origin() -> Tile {
        Tile::new(TileKind::Red, 0, 0, Placement::new(0.0, 0.0, 0.0))
    }

    #[test]
    fn test_new_tile_is_active_and_at_rest() {
        let tile = tile_at_origin();
        assert!(tile.is_active());
        assert!(!tile.is_selected());
        assert!(tile.is_at_rest());
        assert_eq!(tile.progress(), 1.0);
        assert_eq!(tile.current_placement(), Placement::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_shift_interpolates_between_placements() {
        let mut tile = tile_at_origin();
        tile.begin_shift(Placement::new(2.0, 0.0, 0.0));
        assert_eq!(tile.progress(), 0.0);
        assert_eq!(tile.current_placement(), Placement::new(0.0, 0.0, 0.0));

        assert!(!tile.advance(0.5));
        assert_eq!(tile.current_placement(), Placement::new(1.0, 0.0, 0.0));

        assert!(tile.advance(0.75));
        assert_eq!(tile.progress(), 1.0);
        assert_eq!(tile.current_placement(), Placement::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_advance_never_goes_backwards() {
        let mut tile = tile_at_origin();
        tile.begin_shift(Placement::new(1.0, 1.0, 0.0));
        tile.advance(0.25);
        tile.advance(-1.0);
        tile.advance(f32::NAN);
        tile.advance(0.0);
        assert_eq!(tile.progress(), 0.25);
    }

    #[test]
    fn test_progress_snaps_to_rest_near_one() {
        let mut tile = tile_at_origin();
        tile.begin_shift(Placement::new(1.0, 0.0, 0.0));
        for _ in 0..20 {
            tile.advance(0.05);
        }
        assert!(tile.is_at_rest());
        assert_eq!(tile.current_placement(), tile.dest_placement());
    }

    #[test]
    fn test_shift_starts_from_current_placement() {
        let mut tile = tile_at_origin();
        tile.begin_shift(Placement::new(4.0, 0.0, 0.0));
        tile.advance(0.5);
        tile.begin_shift(Placement::new(0.0, 0.0, 0.0));
        assert_eq!(tile.prev_placement(), Placement::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_deactivate_keeps_coordinates() {
        let mut tile = Tile::new(TileKind::Blue, 3, 4, Placement::default());
        tile.deactivate();
        assert!(!tile.is_active());
        assert_eq!(tile.grid_pos(), (3, 4));
        assert_eq!(tile.kind(), TileKind::Blue);
    }
}
