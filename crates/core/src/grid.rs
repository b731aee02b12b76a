//! Grid module - owns the rectangular tile layout
//!
//! The grid is a `width x height` board (each side 1..=10) where every cell
//! holds exactly one tile. Tiles live in a fixed flat store indexed by
//! [`TileId`]; cells hold ids in row-major order (`y * width + x`). Uses
//! fixed-capacity storage so the grid never reallocates.
//!
//! Coordinates: `(x, y)` where x grows to the right and y grows upward.
//! A tile's stored `(grid_x, grid_y)` always names the cell that holds it;
//! [`Grid::swap_cells`] is the only place that moves tiles between cells.

use arrayvec::ArrayVec;

use crate::error::{BoardError, Result};
use crate::tile::{Tile, TileId};
use crate::types::{Placement, TileKind, MAX_CELLS, MAX_GRID_DIM};

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u8,
    height: u8,
    tile_size: f32,
    /// Tile store, indexed by `TileId`
    tiles: ArrayVec<Tile, MAX_CELLS>,
    /// Row-major cell -> tile mapping
    cells: ArrayVec<TileId, MAX_CELLS>,
}

impl Grid {
    /// Create a grid where tile `i` rests in cell `i`.
    ///
    /// All tiles start as active `Red` tiles; callers assign kinds afterwards.
    pub fn new(width: u8, height: u8, tile_size: f32) -> Result<Self> {
        if width == 0 || width > MAX_GRID_DIM || height == 0 || height > MAX_GRID_DIM {
            return Err(BoardError::Configuration(format!(
                "grid size {}x{} outside 1..={} per side",
                width, height, MAX_GRID_DIM
            )));
        }
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(BoardError::Configuration(format!(
                "tile size {} must be finite and positive",
                tile_size
            )));
        }

        let mut grid = Self {
            width,
            height,
            tile_size,
            tiles: ArrayVec::new(),
            cells: ArrayVec::new(),
        };

        for y in 0..height as i8 {
            for x in 0..width as i8 {
                let id = TileId(grid.tiles.len() as u8);
                let placement = grid.rest_placement(x, y);
                grid.tiles.push(Tile::new(TileKind::Red, x, y, placement));
                grid.cells.push(id);
            }
        }

        Ok(grid)
    }

    /// Build a grid from kinds listed in row-major order, row 0 (bottom) first.
    ///
    /// # Examples
    ///
    /// ```
    /// use skyblocks_core::Grid;
    /// use skyblocks_core::types::TileKind::{Blue, Red};
    ///
    /// let grid = Grid::from_kinds(3, 1, &[Red, Red, Blue]).unwrap();
    /// assert_eq!(grid.get(2, 0).unwrap().kind(), Blue);
    /// ```
    pub fn from_kinds(width: u8, height: u8, kinds: &[TileKind]) -> Result<Self> {
        let mut grid = Self::new(width, height, crate::types::DEFAULT_TILE_SIZE)?;
        if kinds.len() != grid.cells.len() {
            return Err(BoardError::Configuration(format!(
                "expected {} kinds for a {}x{} grid, got {}",
                grid.cells.len(),
                width,
                height,
                kinds.len()
            )));
        }
        for (tile, kind) in grid.tiles.iter_mut().zip(kinds) {
            tile.set_kind(*kind);
        }
        Ok(grid)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Number of cells (and tiles) on the grid
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if position is within bounds
    pub fn contains(&self, x: i8, y: i8) -> bool {
        x >= 0 && (x as u8) < self.width && y >= 0 && (y as u8) < self.height
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Result<usize> {
        if !self.contains(x, y) {
            return Err(BoardError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Id of the tile held by cell `(x, y)`
    pub fn tile_id(&self, x: i8, y: i8) -> Result<TileId> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Tile held by cell `(x, y)`
    pub fn get(&self, x: i8, y: i8) -> Result<&Tile> {
        let id = self.tile_id(x, y)?;
        Ok(&self.tiles[id.index()])
    }

    pub fn get_mut(&mut self, x: i8, y: i8) -> Result<&mut Tile> {
        let id = self.tile_id(x, y)?;
        Ok(&mut self.tiles[id.index()])
    }

    /// Replace the tile held by cell `(x, y)`.
    ///
    /// The new tile takes over the cell's id; its coordinates and placements
    /// are rewritten to the cell's so the grid stays consistent.
    pub fn set(&mut self, x: i8, y: i8, mut tile: Tile) -> Result<TileId> {
        let id = self.tile_id(x, y)?;
        tile.set_grid_pos(x, y);
        tile.rest_at(self.rest_placement(x, y));
        self.tiles[id.index()] = tile;
        Ok(id)
    }

    /// Tile by id. Ids come from this grid, so lookups cannot miss.
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    pub fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id.index()]
    }

    /// All tiles, indexed by `TileId`
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Exchange the tiles of two cells and update both tiles' coordinates.
    ///
    /// Touches nothing but the two cells. Swapping a cell with itself is a
    /// no-op.
    pub fn swap_cells(&mut self, x1: i8, y1: i8, x2: i8, y2: i8) -> Result<()> {
        let i1 = self.index(x1, y1)?;
        let i2 = self.index(x2, y2)?;
        if i1 == i2 {
            return Ok(());
        }

        self.cells.swap(i1, i2);
        let moved_in_1 = self.cells[i1];
        let moved_in_2 = self.cells[i2];
        self.tiles[moved_in_1.index()].set_grid_pos(x1, y1);
        self.tiles[moved_in_2.index()].set_grid_pos(x2, y2);

        debug_assert!(self.is_consistent(), "grid coordinates diverged after swap");
        Ok(())
    }

    /// Rest placement of cell `(x, y)`
    pub fn cell_placement(&self, x: i8, y: i8) -> Result<Placement> {
        self.index(x, y)?;
        Ok(self.rest_placement(x, y))
    }

    /// Centred layout: the board's middle sits at the world origin.
    fn rest_placement(&self, x: i8, y: i8) -> Placement {
        let half_w = (self.width as f32 - 1.0) * 0.5;
        let half_h = (self.height as f32 - 1.0) * 0.5;
        Placement::new(
            (x as f32 - half_w) * self.tile_size,
            (y as f32 - half_h) * self.tile_size,
            0.0,
        )
    }

    /// Iterate `(x, y, tile)` in reading order (row 0 first, x fastest)
    pub fn iter_cells(&self) -> impl Iterator<Item = (i8, i8, &Tile)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().map(move |(idx, id)| {
            let x = (idx % width) as i8;
            let y = (idx / width) as i8;
            (x, y, &self.tiles[id.index()])
        })
    }

    /// Check that every cell holds a distinct tile whose coordinates name that cell
    pub fn is_consistent(&self) -> bool {
        let mut seen = [false; MAX_CELLS];
        self.iter_cells().zip(self.cells.iter()).all(|((x, y, tile), id)| {
            let fresh = !seen[id.index()];
            seen[id.index()] = true;
            fresh && tile.grid_pos() == (x, y)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind::{Blue, Green, Red};

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(4, 3, 1.0).unwrap();
        assert_eq!(grid.index(0, 0), Ok(0));
        assert_eq!(grid.index(3, 0), Ok(3));
        assert_eq!(grid.index(0, 1), Ok(4));
        assert_eq!(grid.index(3, 2), Ok(11));
        assert!(grid.index(-1, 0).is_err());
        assert!(grid.index(4, 0).is_err());
        assert!(grid.index(0, 3).is_err());
    }

    #[test]
    fn test_new_grid_places_tile_i_in_cell_i() {
        let grid = Grid::new(3, 2, 1.0).unwrap();
        assert_eq!(grid.len(), 6);
        for (x, y, tile) in grid.iter_cells() {
            assert_eq!(tile.grid_pos(), (x, y));
            assert!(tile.is_active());
        }
        assert_eq!(grid.tile_id(2, 1), Ok(TileId(5)));
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_size_bounds_are_enforced() {
        assert!(Grid::new(0, 5, 1.0).is_err());
        assert!(Grid::new(5, 0, 1.0).is_err());
        assert!(Grid::new(11, 5, 1.0).is_err());
        assert!(Grid::new(5, 11, 1.0).is_err());
        assert!(Grid::new(10, 10, 1.0).is_ok());
        assert!(Grid::new(1, 1, 1.0).is_ok());
        assert!(Grid::new(3, 3, 0.0).is_err());
        assert!(Grid::new(3, 3, f32::NAN).is_err());
    }

    #[test]
    fn test_rest_placements_are_centred() {
        let grid = Grid::new(3, 3, 2.0).unwrap();
        assert_eq!(grid.cell_placement(1, 1), Ok(Placement::new(0.0, 0.0, 0.0)));
        assert_eq!(grid.cell_placement(0, 0), Ok(Placement::new(-2.0, -2.0, 0.0)));
        assert_eq!(grid.cell_placement(2, 0), Ok(Placement::new(2.0, -2.0, 0.0)));
        assert_eq!(grid.cell_placement(0, 2), Ok(Placement::new(-2.0, 2.0, 0.0)));
    }

    #[test]
    fn test_swap_cells_moves_tiles_and_coordinates() {
        let mut grid = Grid::from_kinds(3, 1, &[Red, Green, Blue]).unwrap();
        let left = grid.tile_id(0, 0).unwrap();
        let right = grid.tile_id(2, 0).unwrap();

        grid.swap_cells(0, 0, 2, 0).unwrap();

        assert_eq!(grid.tile_id(0, 0), Ok(right));
        assert_eq!(grid.tile_id(2, 0), Ok(left));
        assert_eq!(grid.tile(left).grid_pos(), (2, 0));
        assert_eq!(grid.tile(right).grid_pos(), (0, 0));
        assert_eq!(grid.get(0, 0).unwrap().kind(), Blue);
        assert_eq!(grid.get(1, 0).unwrap().kind(), Green);
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_swap_cells_rejects_out_of_range() {
        let mut grid = Grid::new(2, 2, 1.0).unwrap();
        let before = grid.clone();
        assert_eq!(
            grid.swap_cells(0, 0, 2, 0),
            Err(BoardError::OutOfRange {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            })
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_swap_with_self_is_noop() {
        let mut grid = Grid::new(2, 2, 1.0).unwrap();
        let before = grid.clone();
        grid.swap_cells(1, 1, 1, 1).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn test_set_rewrites_coordinates() {
        let mut grid = Grid::new(3, 3, 1.0).unwrap();
        let stray = Tile::new(Green, 9, 9, Placement::new(50.0, 50.0, 0.0));
        let id = grid.set(1, 2, stray).unwrap();

        let tile = grid.tile(id);
        assert_eq!(tile.grid_pos(), (1, 2));
        assert_eq!(tile.kind(), Green);
        assert_eq!(tile.current_placement(), grid.cell_placement(1, 2).unwrap());
        assert!(grid.is_consistent());

        let copy = tile.clone();
        assert!(grid.set(3, 0, copy).is_err());
    }

    #[test]
    fn test_from_kinds_requires_exact_count() {
        assert!(Grid::from_kinds(2, 2, &[Red, Red, Red]).is_err());
        let grid = Grid::from_kinds(2, 2, &[Red, Blue, Green, Red]).unwrap();
        assert_eq!(grid.get(1, 0).unwrap().kind(), Blue);
        assert_eq!(grid.get(0, 1).unwrap().kind(), Green);
    }
}
