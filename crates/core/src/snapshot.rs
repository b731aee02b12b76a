//! Read-only board snapshots for renderers and exporters.
//!
//! Snapshots use fixed-capacity storage so [`BoardEngine::snapshot_into`]
//! can refill one buffer every frame without allocating.
//!
//! [`BoardEngine::snapshot_into`]: crate::engine::BoardEngine::snapshot_into

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::tile::Tile;
use crate::types::{Placement, TileKind, MAX_CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileSnapshot {
    /// Cell currently holding the tile
    pub x: i8,
    pub y: i8,
    pub kind: TileKind,
    pub active: bool,
    pub selected: bool,
    pub progress: f32,
    /// Interpolated render placement
    pub placement: Placement,
}

impl TileSnapshot {
    pub fn from_tile(x: i8, y: i8, tile: &Tile) -> Self {
        Self {
            x,
            y,
            kind: tile.kind(),
            active: tile.is_active(),
            selected: tile.is_selected(),
            progress: tile.progress(),
            placement: tile.current_placement(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    pub tile_size: f32,
    pub selected_x: i8,
    pub selected_y: i8,
    pub shifting: bool,
    pub cleared: u32,
    pub seed: u32,
    /// One entry per cell, reading order (row 0 first)
    pub tiles: ArrayVec<TileSnapshot, MAX_CELLS>,
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.tile_size = 0.0;
        self.selected_x = 0;
        self.selected_y = 0;
        self.shifting = false;
        self.cleared = 0;
        self.seed = 0;
        self.tiles.clear();
    }

    /// Tile snapshot for cell `(x, y)`
    pub fn cell(&self, x: i8, y: i8) -> Option<&TileSnapshot> {
        if x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height {
            return None;
        }
        self.tiles.get(y as usize * self.width as usize + x as usize)
    }

    pub fn active_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.active).count()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            tile_size: 0.0,
            selected_x: 0,
            selected_y: 0,
            shifting: false,
            cleared: 0,
            seed: 0,
            tiles: ArrayVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::types::TileKind::{Blue, Green, Red};

    fn snapshot_of(grid: &Grid) -> BoardSnapshot {
        let mut snap = BoardSnapshot {
            width: grid.width(),
            height: grid.height(),
            ..BoardSnapshot::default()
        };
        for (x, y, tile) in grid.iter_cells() {
            snap.tiles.push(TileSnapshot::from_tile(x, y, tile));
        }
        snap
    }

    #[test]
    fn test_cell_lookup_is_row_major() {
        let grid = Grid::from_kinds(2, 2, &[Red, Blue, Green, Red]).unwrap();
        let snap = snapshot_of(&grid);
        assert_eq!(snap.cell(1, 0).map(|t| t.kind), Some(Blue));
        assert_eq!(snap.cell(0, 1).map(|t| t.kind), Some(Green));
        assert!(snap.cell(2, 0).is_none());
        assert!(snap.cell(0, -1).is_none());
    }

    #[test]
    fn test_active_count_skips_cleared_tiles() {
        let mut grid = Grid::from_kinds(3, 1, &[Red, Blue, Green]).unwrap();
        grid.get_mut(1, 0).unwrap().deactivate();
        assert_eq!(snapshot_of(&grid).active_count(), 2);
    }

    #[test]
    fn test_clear_resets_everything() {
        let grid = Grid::from_kinds(2, 1, &[Red, Blue]).unwrap();
        let mut snap = snapshot_of(&grid);
        snap.clear();
        assert_eq!(snap, BoardSnapshot::default());
    }

    #[test]
    fn test_serializes_to_json() {
        let grid = Grid::from_kinds(1, 1, &[Blue]).unwrap();
        let snap = snapshot_of(&grid);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["width"], 1);
        assert_eq!(json["tiles"][0]["kind"], "blue");
        assert_eq!(json["tiles"][0]["active"], true);
    }
}
