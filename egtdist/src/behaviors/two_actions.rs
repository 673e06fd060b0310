use rand_distr::Bernoulli;

use crate::{
    behaviors::{Action, Behavior},
    statistics::roller::Roller,
};

/// Always cooperates.
#[derive(Debug, Default, Clone)]
pub struct Cooperator;

impl Behavior for Cooperator {
    fn get_action(&mut self, _time_step: usize, _action_prev: Action, _roller: &mut Roller) -> Action {
        Action::Cooperate
    }

    fn type_name(&self) -> &'static str {
        "AllC"
    }

    fn is_stochastic(&self) -> bool {
        false
    }
}

/// Always defects.
#[derive(Debug, Default, Clone)]
pub struct Defector;

impl Behavior for Defector {
    fn get_action(&mut self, _time_step: usize, _action_prev: Action, _roller: &mut Roller) -> Action {
        Action::Defect
    }

    fn type_name(&self) -> &'static str {
        "AllD"
    }

    fn is_stochastic(&self) -> bool {
        false
    }
}

#[derive(Debug, Default, Clone)]
pub struct RandomPlayer;

impl Behavior for RandomPlayer {
    fn get_action(&mut self, _time_step: usize, _action_prev: Action, roller: &mut Roller) -> Action {
        if roller.coin() {
            Action::Cooperate
        } else {
            Action::Defect
        }
    }

    fn type_name(&self) -> &'static str {
        "Random"
    }

    fn is_stochastic(&self) -> bool {
        true
    }
}

/// Cooperates first, then copies the opponent.
#[derive(Debug, Default, Clone)]
pub struct TitForTat;

impl Behavior for TitForTat {
    fn get_action(&mut self, time_step: usize, action_prev: Action, _roller: &mut Roller) -> Action {
        if time_step == 0 {
            Action::Cooperate
        } else {
            action_prev
        }
    }

    fn type_name(&self) -> &'static str {
        "TFT"
    }

    fn is_stochastic(&self) -> bool {
        false
    }
}

/// Defects first, then copies the opponent.
#[derive(Debug, Default, Clone)]
pub struct SuspiciousTitForTat;

impl Behavior for SuspiciousTitForTat {
    fn get_action(&mut self, time_step: usize, action_prev: Action, _roller: &mut Roller) -> Action {
        if time_step == 0 {
            Action::Defect
        } else {
            action_prev
        }
    }

    fn type_name(&self) -> &'static str {
        "SuspiciousTFT"
    }

    fn is_stochastic(&self) -> bool {
        false
    }
}

/// Tit-for-tat that forgives a defection with a probability derived from the game's
/// payoffs.
#[derive(Debug, Clone)]
pub struct GenerousTitForTat {
    forgiveness: Bernoulli,
}

impl GenerousTitForTat {
    pub fn new(reward: f64, punishment: f64, temptation: f64, sucker: f64) -> anyhow::Result<Self> {
        let p = Self::forgiveness_probability(reward, punishment, temptation, sucker);
        if p.is_nan() {
            anyhow::bail!(
                "payoffs R={reward}, P={punishment}, T={temptation}, S={sucker} give no forgiveness probability"
            );
        }
        Ok(Self {
            forgiveness: Bernoulli::new(p.clamp(0.0, 1.0))?,
        })
    }

    /// `min(1 - (T - R) / (R - S), (R - P) / (T - P))`
    pub fn forgiveness_probability(reward: f64, punishment: f64, temptation: f64, sucker: f64) -> f64 {
        let a = 1.0 - (temptation - reward) / (reward - sucker);
        let b = (reward - punishment) / (temptation - punishment);
        a.min(b)
    }
}

impl Behavior for GenerousTitForTat {
    fn get_action(&mut self, time_step: usize, action_prev: Action, roller: &mut Roller) -> Action {
        if time_step == 0 || action_prev.is_cooperate() || roller.sample(&self.forgiveness) {
            Action::Cooperate
        } else {
            Action::Defect
        }
    }

    fn type_name(&self) -> &'static str {
        "GenerousTFT"
    }

    fn is_stochastic(&self) -> bool {
        true
    }
}

/// Answers each run of defections with as many defections, then offers two rounds of
/// cooperation.
#[derive(Debug, Default, Clone)]
pub struct GradualTitForTat {
    defection_string: usize,
    cooperation_string: usize,
}

impl Behavior for GradualTitForTat {
    fn get_action(&mut self, time_step: usize, action_prev: Action, _roller: &mut Roller) -> Action {
        if time_step == 0 {
            self.defection_string = 0;
            self.cooperation_string = 0;
            return Action::Cooperate;
        }

        if self.cooperation_string > 0 {
            self.cooperation_string -= 1;
            if action_prev == Action::Defect {
                self.defection_string += 1;
            }
            Action::Cooperate
        } else if action_prev == Action::Defect {
            self.defection_string += 1;
            Action::Defect
        } else if self.defection_string > 0 {
            self.defection_string -= 1;
            if self.defection_string == 0 {
                self.cooperation_string = 2;
            }
            Action::Defect
        } else {
            Action::Cooperate
        }
    }

    fn type_name(&self) -> &'static str {
        "GradualTFT"
    }

    fn is_stochastic(&self) -> bool {
        false
    }
}

/// Tit-for-tat that plays the opposite of the intended action with a fixed error rate.
#[derive(Debug, Clone)]
pub struct ImperfectTitForTat {
    error: Bernoulli,
}

impl ImperfectTitForTat {
    pub fn new(error_probability: f64) -> anyhow::Result<Self> {
        Ok(Self {
            error: Bernoulli::new(error_probability)?,
        })
    }
}

impl Behavior for ImperfectTitForTat {
    fn get_action(&mut self, time_step: usize, action_prev: Action, roller: &mut Roller) -> Action {
        if time_step == 0 {
            return Action::Cooperate;
        }
        if roller.sample(&self.error) {
            action_prev.flipped()
        } else {
            action_prev
        }
    }

    fn type_name(&self) -> &'static str {
        "ImperfectTFT"
    }

    fn is_stochastic(&self) -> bool {
        true
    }
}

/// Tit-for-two-tats: defects only after two consecutive defections.
#[derive(Debug, Clone)]
pub struct TitForTwoTats {
    action_memory: Action,
}

impl Default for TitForTwoTats {
    fn default() -> Self {
        Self {
            action_memory: Action::Cooperate,
        }
    }
}

impl Behavior for TitForTwoTats {
    fn get_action(&mut self, time_step: usize, action_prev: Action, _roller: &mut Roller) -> Action {
        if time_step == 0 {
            // the opening round counts as cooperation, so one early defection is forgiven
            self.action_memory = Action::Cooperate;
            return Action::Cooperate;
        }
        let action = if action_prev == Action::Defect && self.action_memory == Action::Defect {
            Action::Defect
        } else {
            Action::Cooperate
        };
        self.action_memory = action_prev;
        action
    }

    fn type_name(&self) -> &'static str {
        "TFTT"
    }

    fn is_stochastic(&self) -> bool {
        false
    }
}

/// Two-tits-for-tat: every defection is answered twice.
#[derive(Debug, Default, Clone)]
pub struct TwoTitsForTat {
    defection_counter: usize,
}

impl Behavior for TwoTitsForTat {
    fn get_action(&mut self, time_step: usize, action_prev: Action, _roller: &mut Roller) -> Action {
        if time_step == 0 {
            self.defection_counter = 0;
            return Action::Cooperate;
        }
        if action_prev == Action::Defect {
            self.defection_counter += 1;
            Action::Defect
        } else if self.defection_counter > 0 {
            self.defection_counter -= 1;
            Action::Defect
        } else {
            Action::Cooperate
        }
    }

    fn type_name(&self) -> &'static str {
        "TTFT"
    }

    fn is_stochastic(&self) -> bool {
        false
    }
}

/// Cooperates until the opponent defects once, then defects forever.
#[derive(Debug, Clone)]
pub struct Grim {
    action: Action,
}

impl Default for Grim {
    fn default() -> Self {
        Self {
            action: Action::Cooperate,
        }
    }
}

impl Behavior for Grim {
    fn get_action(&mut self, time_step: usize, action_prev: Action, _roller: &mut Roller) -> Action {
        if time_step == 0 {
            self.action = Action::Cooperate;
        } else if action_prev == Action::Defect {
            self.action = Action::Defect;
        }
        self.action
    }

    fn type_name(&self) -> &'static str {
        "GRIM"
    }

    fn is_stochastic(&self) -> bool {
        false
    }
}

/// Win-stay, lose-shift: cooperates when both players chose the same action last round.
#[derive(Debug, Clone)]
pub struct Pavlov {
    action_memory: Action,
}

impl Default for Pavlov {
    fn default() -> Self {
        Self {
            action_memory: Action::Cooperate,
        }
    }
}

impl Behavior for Pavlov {
    fn get_action(&mut self, time_step: usize, action_prev: Action, _roller: &mut Roller) -> Action {
        self.action_memory = if time_step == 0 || action_prev == self.action_memory {
            Action::Cooperate
        } else {
            Action::Defect
        };
        self.action_memory
    }

    fn type_name(&self) -> &'static str {
        "Pavlov"
    }

    fn is_stochastic(&self) -> bool {
        false
    }
}

/// Opens by cooperating with probability `p`, then switches action with probability
/// `epsilon` each round, regardless of the opponent.
#[derive(Debug, Clone)]
pub struct ActionInertia {
    switch: Bernoulli,
    first_cooperation: Bernoulli,
    action: Action,
}

impl ActionInertia {
    pub fn new(epsilon: f64, p: f64) -> anyhow::Result<Self> {
        Ok(Self {
            switch: Bernoulli::new(epsilon)?,
            first_cooperation: Bernoulli::new(p)?,
            action: Action::Cooperate,
        })
    }
}

impl Behavior for ActionInertia {
    fn get_action(&mut self, time_step: usize, _action_prev: Action, roller: &mut Roller) -> Action {
        if time_step == 0 {
            self.action = if roller.sample(&self.first_cooperation) {
                Action::Cooperate
            } else {
                Action::Defect
            };
        } else if roller.sample(&self.switch) {
            self.action = self.action.flipped();
        }
        self.action
    }

    fn type_name(&self) -> &'static str {
        "ActionInertia"
    }

    fn is_stochastic(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviors::Action::{Cooperate as C, Defect as D};

    /// Feeds `opponent` as the previous action of each round (the first entry is ignored).
    fn respond(behavior: &mut impl Behavior, opponent: &[Action]) -> Vec<Action> {
        let mut rng = Roller::test_rng();
        opponent
            .iter()
            .enumerate()
            .map(|(t, &prev)| behavior.get_action(t, prev, &mut rng))
            .collect()
    }

    #[test]
    fn test_unconditional() {
        assert_eq!(respond(&mut Cooperator, &[D, D, D]), vec![C, C, C]);
        assert_eq!(respond(&mut Defector, &[C, C, C]), vec![D, D, D]);
    }

    #[test]
    fn test_tit_for_tat_variants() {
        assert_eq!(respond(&mut TitForTat, &[D, D, C, D]), vec![C, D, C, D]);
        assert_eq!(respond(&mut SuspiciousTitForTat, &[C, C, D]), vec![D, C, D]);
        assert_eq!(
            respond(&mut TitForTwoTats::default(), &[C, D, D, C]),
            vec![C, C, D, C]
        );
        assert_eq!(
            respond(&mut TwoTitsForTat::default(), &[C, D, C, C]),
            vec![C, D, D, C]
        );
    }

    #[test]
    fn test_tit_for_two_tats_forgives_opening_defection() {
        let mut tftt = TitForTwoTats::default();
        assert_eq!(respond(&mut tftt, &[C, D, C, D, D]), vec![C, C, C, C, D]);
        // memory is reset at the start of every game
        assert_eq!(respond(&mut tftt, &[C, D, C]), vec![C, C, C]);
    }

    #[test]
    fn test_gradual_tit_for_tat() {
        assert_eq!(
            respond(&mut GradualTitForTat::default(), &[C, C, D, C, C, C, C]),
            vec![C, C, D, D, C, C, C]
        );
    }

    #[test]
    fn test_grim_and_pavlov() {
        assert_eq!(respond(&mut Grim::default(), &[C, C, D, C, C]), vec![C, C, D, D, D]);
        assert_eq!(respond(&mut Pavlov::default(), &[C, C, D, D]), vec![C, C, D, C]);
    }

    #[test]
    fn test_restart_resets_state() {
        let mut grim = Grim::default();
        assert_eq!(respond(&mut grim, &[C, D, C]), vec![C, D, D]);
        assert_eq!(respond(&mut grim, &[C, C]), vec![C, C]);
    }

    #[test]
    fn test_generous_forgiveness() {
        let p = GenerousTitForTat::forgiveness_probability(3.0, 1.0, 5.0, 0.0);
        assert!((p - 1.0 / 3.0).abs() < 1e-12);

        let mut generous = GenerousTitForTat::new(3.0, 1.0, 5.0, 0.0).unwrap();
        let mut rng = Roller::test_rng();
        assert_eq!(generous.get_action(0, D, &mut rng), C);
        let forgiven = (0..30000)
            .filter(|_| generous.get_action(1, D, &mut rng) == C)
            .count() as f64
            / 30000.0;
        assert!((forgiven - p).abs() < 0.02);
        assert!(generous.is_stochastic());

        assert!(GenerousTitForTat::new(1.0, 1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_imperfect_tit_for_tat() {
        let mut perfect = ImperfectTitForTat::new(0.0).unwrap();
        assert_eq!(respond(&mut perfect, &[D, D, C, D]), vec![C, D, C, D]);
        let mut contrary = ImperfectTitForTat::new(1.0).unwrap();
        assert_eq!(respond(&mut contrary, &[D, D, C, D]), vec![C, C, D, C]);
        assert!(ImperfectTitForTat::new(1.5).is_err());
    }

    #[test]
    fn test_action_inertia() {
        let mut stubborn = ActionInertia::new(0.0, 1.0).unwrap();
        assert_eq!(respond(&mut stubborn, &[D, D, D, D]), vec![C, C, C, C]);
        let mut flipper = ActionInertia::new(1.0, 0.0).unwrap();
        assert_eq!(respond(&mut flipper, &[C, C, C, C]), vec![D, C, D, C]);
        assert!(ActionInertia::new(-0.1, 0.5).is_err());
    }

    #[test]
    fn test_random_player_is_seeded() {
        let opponent = [C; 64];
        let a = respond(&mut RandomPlayer, &opponent);
        let b = respond(&mut RandomPlayer, &opponent);
        assert_eq!(a, b);
        assert!(a.contains(&C) && a.contains(&D));
    }
}
