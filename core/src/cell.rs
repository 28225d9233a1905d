use serde::{Deserialize, Serialize};

use crate::types::{Coord2, StepOrder};

/// Reward token carried by special cells.
pub const SPECIAL_REWARD: &str = "🍎";
/// Reward token carried by every other path cell.
pub const PATH_REWARD: &str = "🍦";
/// Substituted when a reward-bearing cell carries no reward of its own.
pub const DEFAULT_REWARD: &str = "🎁";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Start,
    Normal,
    Special,
    Empty,
    End,
}

impl CellKind {
    pub const fn is_path(self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Whether landing on this kind of cell pops a reward.
    pub const fn has_reward(self) -> bool {
        matches!(self, Self::Special | Self::End)
    }

    pub const fn reward(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Special => SPECIAL_REWARD,
            _ => PATH_REWARD,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Normal => "normal",
            Self::Special => "special",
            Self::Empty => "empty",
            Self::End => "end",
        }
    }
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Empty
    }
}

/// One square of the course. `position` records the generation coordinates,
/// which for mirrored rows intentionally differ from the render slot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub order: StepOrder,
    pub kind: CellKind,
    pub reward: String,
    pub position: Coord2,
}

impl Cell {
    pub fn path(order: StepOrder, kind: CellKind, position: Coord2) -> Self {
        Self {
            order,
            kind,
            reward: kind.reward().to_string(),
            position,
        }
    }

    pub fn filler(position: Coord2) -> Self {
        Self {
            order: 0,
            kind: CellKind::Empty,
            reward: String::new(),
            position,
        }
    }

    pub const fn is_path(&self) -> bool {
        self.kind.is_path()
    }
}
