//! Per-round decision rules for iterated two-action games.
//!
//! Behaviors only consume randomness through the [`Roller`] they are handed, so a run
//! is fully determined by its seed.

pub mod game;
pub mod two_actions;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::statistics::roller::Roller;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Cooperate,
    Defect,
}

impl Action {
    pub fn flipped(self) -> Self {
        match self {
            Action::Cooperate => Action::Defect,
            Action::Defect => Action::Cooperate,
        }
    }

    pub fn is_cooperate(self) -> bool {
        self == Action::Cooperate
    }
}

pub trait Behavior: Debug + Send + Sync {
    /// Chooses this round's action. `action_prev` is the opponent's previous action and
    /// is meaningless when `time_step == 0`.
    fn get_action(&mut self, time_step: usize, action_prev: Action, roller: &mut Roller) -> Action;

    fn type_name(&self) -> &'static str;

    fn is_stochastic(&self) -> bool;
}
