//! Initial board generation and sanitization
//!
//! A fresh board gets a random kind in every cell, then a fixed number of
//! sanitize passes: each run reported by the scan has one of its tiles, picked
//! uniformly, re-kinded to a different random kind. The scan resumes on the
//! modified grid, so a fix can break later runs before they are reported.
//!
//! Two passes usually leave no match, but nothing guarantees it; consumers
//! must tolerate an occasional leftover run.

use tracing::debug;

use crate::error::{BoardError, Result};
use crate::grid::Grid;
use crate::matcher::RunScanner;
use crate::rng::SimpleRng;
use crate::types::TileKind;

/// Reject palettes that cannot be sanitized or are larger than the fixed palette
pub fn check_palette(palette_size: u8) -> Result<()> {
    if palette_size < 2 {
        return Err(BoardError::Configuration(format!(
            "palette of {} kind(s) cannot be sanitized, need at least 2",
            palette_size
        )));
    }
    if palette_size as usize > TileKind::ALL.len() {
        return Err(BoardError::Configuration(format!(
            "palette of {} kinds exceeds the {} available",
            palette_size,
            TileKind::ALL.len()
        )));
    }
    Ok(())
}

fn random_kind(rng: &mut SimpleRng, palette_size: u8) -> TileKind {
    TileKind::ALL[rng.next_range(palette_size as u32) as usize]
}

/// Assign every tile a random kind from the first `palette_size` kinds
pub fn randomize(grid: &mut Grid, rng: &mut SimpleRng, palette_size: u8) -> Result<()> {
    check_palette(palette_size)?;
    for y in 0..grid.height() as i8 {
        for x in 0..grid.width() as i8 {
            let kind = random_kind(rng, palette_size);
            grid.get_mut(x, y)?.set_kind(kind);
        }
    }
    Ok(())
}

/// Run `passes` sanitize passes; returns how many tiles were re-kinded
pub fn sanitize(
    grid: &mut Grid,
    rng: &mut SimpleRng,
    palette_size: u8,
    passes: u8,
    min_length: u8,
) -> Result<usize> {
    check_palette(palette_size)?;

    let mut total = 0;
    for pass in 0..passes {
        let mut scanner = RunScanner::new(min_length);
        let mut changed = 0;

        while let Some(run) = scanner.next_run(grid) {
            let (x, y) = run.cell(rng.next_range(run.len as u32) as u8);
            let tile = grid.get_mut(x, y)?;
            let current = tile.kind();

            // Terminates almost surely: the palette has at least two kinds.
            let mut kind = random_kind(rng, palette_size);
            while kind == current {
                kind = random_kind(rng, palette_size);
            }
            tile.set_kind(kind);
            changed += 1;
        }

        debug!(pass, changed, "sanitize pass");
        total += changed;
    }

    Ok(total)
}
