use crate::*;
pub use serpentine::*;

mod serpentine;

/// Builds the immutable course a game is played on.
pub trait BoardGenerator {
    fn generate(self) -> BoardLayout;
}

/// How one grid row contributes to the path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RowCells {
    /// Every column is a path cell, kinds assigned by column parity.
    Full(ParityRule),
    /// Exactly one path cell, the rest are fillers.
    Bridge { col: Coord, kind: CellKind },
}

/// Kind assignment for full rows by column parity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParityRule {
    pub even: CellKind,
    pub odd: CellKind,
    /// Column 0 becomes the path start regardless of parity.
    pub starts_path: bool,
}

/// Declarative description of one generated row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowSpec {
    pub cells: RowCells,
    /// Record positions as `x = cols - 1 - i` instead of `x = i`.
    pub mirror_x: bool,
    /// Reverse the row before it joins the board sequence, so orders keep
    /// increasing along the visible path on right-to-left rows.
    pub reverse: bool,
}
