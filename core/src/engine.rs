use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    Playing,
    Finished,
}

impl EngineState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Turn state machine: current progress along the course, game status, and
/// the single pending-reward slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnEngine {
    layout: BoardLayout,
    current_order: StepOrder,
    state: EngineState,
    pending_reward: Option<String>,
}

impl TurnEngine {
    pub fn new(layout: BoardLayout) -> Self {
        Self {
            layout,
            current_order: 0,
            state: Default::default(),
            pending_reward: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn current_order(&self) -> StepOrder {
        self.current_order
    }

    pub fn max_order(&self) -> StepOrder {
        self.layout.max_order()
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn pending_reward(&self) -> Option<&str> {
        self.pending_reward.as_deref()
    }

    /// Cell the token currently stands on. `None` before the first roll.
    pub fn current_cell(&self) -> Option<&Cell> {
        self.layout.cell_by_order(self.current_order)
    }

    /// Cell the token would land on after `steps` more steps, without
    /// clamping. `None` past the end of the course.
    pub fn cell_after(&self, steps: Steps) -> Option<&Cell> {
        self.layout.cell_after(self.current_order, steps)
    }

    /// Advances the token by `steps`, clamped to the last cell. Landing on a
    /// reward cell fills the pending-reward slot; reaching the last cell
    /// finishes the game.
    pub fn roll(&mut self, steps: Steps) -> Result<RollOutcome> {
        self.check_not_finished()?;

        if steps == 0 {
            return Ok(RollOutcome::NoChange);
        }

        let max_order = self.layout.max_order();
        let target = self.current_order.saturating_add(steps).min(max_order);
        self.state = EngineState::Playing;
        self.current_order = target;
        log::debug!("token advanced to step {} of {}", target, max_order);

        if let Some(cell) = self.layout.cell_by_order(target) {
            if cell.kind.has_reward() {
                let reward = if cell.reward.is_empty() {
                    DEFAULT_REWARD.to_string()
                } else {
                    cell.reward.clone()
                };
                self.pending_reward = Some(reward);
            }
        }

        Ok(if target >= max_order {
            self.state = EngineState::Finished;
            RollOutcome::Finished
        } else {
            RollOutcome::Moved
        })
    }

    /// Clears the pending-reward slot. Safe to call any number of times.
    pub fn dismiss_reward(&mut self) -> DismissOutcome {
        if self.pending_reward.take().is_some() {
            DismissOutcome::Dismissed
        } else {
            DismissOutcome::NoChange
        }
    }

    /// Returns the game to its initial state. Valid from any state.
    pub fn reset(&mut self) {
        self.current_order = 0;
        self.state = EngineState::Idle;
        self.pending_reward = None;
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyFinished)
        } else {
            Ok(())
        }
    }
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new(SerpentineGenerator::default().generate())
    }
}
