use serde::{Deserialize, Serialize};

use crate::{
    behaviors::{Action, Behavior},
    statistics::roller::Roller,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub players: [String; 2],
    pub actions: [Vec<Action>; 2],
}

impl GameRecord {
    pub fn rounds(&self) -> usize {
        self.actions[0].len()
    }

    /// Fraction of rounds in which `player` cooperated.
    pub fn cooperation_rate(&self, player: usize) -> f64 {
        let actions = &self.actions[player];
        if actions.is_empty() {
            return 0.0;
        }
        actions.iter().filter(|a| a.is_cooperate()).count() as f64 / actions.len() as f64
    }
}

/// Plays `rounds` rounds of an iterated two-action game. Each player sees the other's
/// action from the previous round.
pub fn play(
    first: &mut dyn Behavior,
    second: &mut dyn Behavior,
    rounds: usize,
    roller: &mut Roller,
) -> GameRecord {
    let mut actions = [Vec::with_capacity(rounds), Vec::with_capacity(rounds)];
    let mut prev = [Action::Cooperate, Action::Cooperate];

    for time_step in 0..rounds {
        let a = first.get_action(time_step, prev[1], roller);
        let b = second.get_action(time_step, prev[0], roller);
        actions[0].push(a);
        actions[1].push(b);
        prev = [a, b];
    }

    log::debug!(
        "{} vs {}: {} rounds",
        first.type_name(),
        second.type_name(),
        rounds
    );

    GameRecord {
        players: [first.type_name().to_string(), second.type_name().to_string()],
        actions,
    }
}
