use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use dice::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod dice;
mod engine;
mod error;
mod generator;
mod types;

/// Grid width of the reference course.
pub const COL_COUNT: Coord = 8;
/// Grid height of the reference course.
pub const ROW_COUNT: Coord = 7;

/// The immutable course a game is played on: every cell in render order,
/// plus an order-to-slot index so step lookups stay O(1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    cells: Array2<Cell>,
    path: Vec<Coord2>,
    max_order: StepOrder,
}

impl BoardLayout {
    /// Builds a layout from cells listed in render order (row-major, row 0
    /// first). Path orders must form a dense `1..=N` sequence.
    pub fn from_cells(size: Coord2, cells: Vec<Cell>) -> Result<Self> {
        let (cols, rows) = size;
        if cells.len() != mult(cols, rows) as usize {
            return Err(GameError::InvalidBoardShape);
        }

        let cells = Array2::from_shape_vec((rows as usize, cols as usize), cells)
            .map_err(|_| GameError::InvalidBoardShape)?
            .reversed_axes();

        let mut ordered: Vec<(StepOrder, Coord2)> = Vec::new();
        for y in 0..rows {
            for x in 0..cols {
                let cell = &cells[(x, y).to_nd_index()];
                if cell.order > 0 {
                    ordered.push((cell.order, (x, y)));
                }
            }
        }
        ordered.sort_unstable_by_key(|&(order, _)| order);
        for (expected, &(order, _)) in (1..).zip(ordered.iter()) {
            if order != expected {
                return Err(GameError::BrokenPath);
            }
        }

        let path: Vec<Coord2> = ordered.into_iter().map(|(_, slot)| slot).collect();
        let max_order = path.len() as StepOrder;

        Ok(Self {
            cells,
            path,
            max_order,
        })
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    /// Highest path order on the board, computed once at build time.
    pub fn max_order(&self) -> StepOrder {
        self.max_order
    }

    /// Cell at a render slot `(x, y)`.
    pub fn cell_at(&self, slot: Coord2) -> &Cell {
        &self.cells[slot.to_nd_index()]
    }

    /// Path cell with the given order, or `None` when the order is `0` or
    /// beyond the end of the course.
    pub fn cell_by_order(&self, order: StepOrder) -> Option<&Cell> {
        if order == 0 {
            return None;
        }
        self.path
            .get(order as usize - 1)
            .map(|&slot| &self.cells[slot.to_nd_index()])
    }

    /// Cell the token would land on after `steps` more steps, without
    /// clamping. `None` past the end of the course.
    pub fn cell_after(&self, current: StepOrder, steps: Steps) -> Option<&Cell> {
        self.cell_by_order(current.saturating_add(steps))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RollOutcome {
    NoChange,
    Moved,
    Finished,
}

impl RollOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DismissOutcome {
    NoChange,
    Dismissed,
}

impl DismissOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Dismissed)
    }
}
