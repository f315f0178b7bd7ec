use std::rc::Rc;

use log::{debug, info, warn};
use rand::Rng;
use yew::Reducible;

use crate::config::WheelConfig;
use crate::error::RaffleError;
use crate::roster::Roster;
use crate::wheel::{winner_index, FULL_TURN};

/// A spin that has been started but not yet settled. The winner is
/// resolved up front against the roster as it was when the spin began.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPlan {
    pub id: u64,
    pub target: f64,
    pub winner: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Raffle {
    roster: Roster,
    rotation: f64,
    winner: Option<String>,
    spin: Option<SpinPlan>,
    next_spin_id: u64,
    last_settled: Option<u64>,
}

pub enum RaffleAction {
    ReplaceText(String),
    Import(String),
    Clear,
    Begin(SpinPlan),
    Settle(u64),
}

impl Raffle {
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    pub fn pending_spin(&self) -> Option<&SpinPlan> {
        self.spin.as_ref()
    }

    /// Id of the most recent spin that came to rest with a winner.
    pub fn last_settled(&self) -> Option<u64> {
        self.last_settled
    }

    pub fn replace_text(&mut self, text: &str) {
        if self.is_spinning() {
            debug!("Ignoring list edit while the wheel is spinning");
            return;
        }
        self.roster.replace_from_text(text);
    }

    pub fn import(&mut self, text: &str) -> usize {
        if self.is_spinning() {
            debug!("Ignoring import while the wheel is spinning");
            return 0;
        }
        let added = self.roster.import(text);
        info!("Imported {} participants ({} total)", added, self.roster.len());
        added
    }

    /// Empties the list and forgets the winner. An in-flight spin is
    /// cancelled, so its settle no longer matches.
    pub fn clear(&mut self) {
        if let Some(plan) = self.spin.take() {
            info!("Spin {} cancelled by clear", plan.id);
        }
        self.roster.clear();
        self.winner = None;
    }

    /// Picks a random resting angle at least `min_turns` full turns past
    /// the current rotation and reads off who will win there.
    pub fn plan_spin(
        &self,
        config: &WheelConfig,
        rng: &mut impl Rng,
    ) -> Result<SpinPlan, RaffleError> {
        if self.is_spinning() {
            return Err(RaffleError::SpinInProgress);
        }

        let extra: f64 = rng.gen_range(0.0..FULL_TURN);
        let target = self.rotation + f64::from(config.min_turns) * FULL_TURN + extra;

        let index = winner_index(target, self.roster.len(), config.pointer_angle)
            .ok_or(RaffleError::EmptyRoster)?;
        let winner = self
            .roster
            .get(index)
            .ok_or(RaffleError::EmptyRoster)?
            .to_string();

        Ok(SpinPlan {
            id: self.next_spin_id,
            target,
            winner,
        })
    }

    pub fn begin(&mut self, plan: SpinPlan) -> Result<(), RaffleError> {
        if self.is_spinning() {
            return Err(RaffleError::SpinInProgress);
        }
        if self.roster.is_empty() {
            return Err(RaffleError::EmptyRoster);
        }
        if plan.id != self.next_spin_id || plan.target < self.rotation {
            warn!("Discarding stale spin plan {}", plan.id);
            return Ok(());
        }

        debug!("Spin {} heading to {:.2} degrees", plan.id, plan.target);
        self.rotation = plan.target;
        self.next_spin_id += 1;
        self.spin = Some(plan);
        Ok(())
    }

    /// Completes the in-flight spin if `spin_id` still refers to it.
    pub fn settle(&mut self, spin_id: u64) -> Option<&str> {
        match self.spin.take() {
            Some(plan) if plan.id == spin_id => {
                info!("Spin {} settled on {}", plan.id, plan.winner);
                self.winner = Some(plan.winner);
                self.last_settled = Some(plan.id);
                self.winner.as_deref()
            }
            other => {
                warn!("Ignoring settle for unknown spin {}", spin_id);
                self.spin = other;
                None
            }
        }
    }
}

impl Reducible for Raffle {
    type Action = RaffleAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            RaffleAction::ReplaceText(text) => next.replace_text(&text),
            RaffleAction::Import(text) => {
                next.import(&text);
            }
            RaffleAction::Clear => next.clear(),
            RaffleAction::Begin(plan) => {
                if let Err(err) = next.begin(plan) {
                    warn!("Spin not started: {}", err);
                    return self;
                }
            }
            RaffleAction::Settle(spin_id) => {
                next.settle(spin_id);
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn raffle_with(names: &str) -> Raffle {
        let mut raffle = Raffle::default();
        raffle.replace_text(names);
        raffle
    }

    #[test]
    fn empty_roster_refuses_to_spin() {
        let raffle = Raffle::default();
        let mut rng = StdRng::seed_from_u64(7);
        let result = raffle.plan_spin(&WheelConfig::default(), &mut rng);
        assert_eq!(result, Err(RaffleError::EmptyRoster));
        assert_eq!(raffle.rotation(), 0.0);
        assert!(!raffle.is_spinning());
    }

    #[test]
    fn target_adds_at_least_ten_turns() {
        let config = WheelConfig::default();
        let mut raffle = raffle_with("A\nB\nC");
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let start = raffle.rotation();
            let plan = raffle.plan_spin(&config, &mut rng).unwrap();
            assert!(plan.target >= start + 3600.0);
            assert!(plan.target < start + 3960.0);
            let id = plan.id;
            raffle.begin(plan).unwrap();
            assert_eq!(raffle.rotation(), raffle.pending_spin().unwrap().target);
            raffle.settle(id);
        }
    }

    #[test]
    fn winner_matches_final_angle() {
        let config = WheelConfig::default();
        let mut raffle = raffle_with("A\nB\nC\nD");
        let mut rng = StdRng::seed_from_u64(3);

        let plan = raffle.plan_spin(&config, &mut rng).unwrap();
        let expected = winner_index(plan.target, 4, 90.0).unwrap();
        assert_eq!(plan.winner, ["A", "B", "C", "D"][expected]);

        let id = plan.id;
        raffle.begin(plan.clone()).unwrap();
        assert!(raffle.winner().is_none());
        assert_eq!(raffle.settle(id), Some(plan.winner.as_str()));
        assert!(!raffle.is_spinning());
    }

    #[test]
    fn second_spin_is_refused_while_in_flight() {
        let config = WheelConfig::default();
        let mut raffle = raffle_with("A\nB");
        let mut rng = StdRng::seed_from_u64(11);

        let plan = raffle.plan_spin(&config, &mut rng).unwrap();
        raffle.begin(plan.clone()).unwrap();

        assert_eq!(
            raffle.plan_spin(&config, &mut rng),
            Err(RaffleError::SpinInProgress)
        );
        assert_eq!(raffle.begin(plan), Err(RaffleError::SpinInProgress));
    }

    #[test]
    fn edits_are_locked_while_spinning() {
        let config = WheelConfig::default();
        let mut raffle = raffle_with("A\nB");
        let mut rng = StdRng::seed_from_u64(5);
        let plan = raffle.plan_spin(&config, &mut rng).unwrap();
        let winner = plan.winner.clone();
        let id = plan.id;
        raffle.begin(plan).unwrap();

        raffle.replace_text("X");
        raffle.import("Y\nZ");
        assert_eq!(raffle.roster().names(), ["A", "B"]);

        raffle.settle(id);
        assert!(raffle.roster().names().contains(&winner));
        assert_eq!(raffle.last_settled(), Some(id));
    }

    #[test]
    fn clear_cancels_in_flight_spin() {
        let config = WheelConfig::default();
        let mut raffle = raffle_with("A\nB");
        let mut rng = StdRng::seed_from_u64(13);
        let plan = raffle.plan_spin(&config, &mut rng).unwrap();
        let id = plan.id;
        raffle.begin(plan).unwrap();

        raffle.clear();
        assert!(raffle.roster().is_empty());
        assert!(raffle.winner().is_none());
        assert!(!raffle.is_spinning());

        assert_eq!(raffle.settle(id), None);
        assert!(raffle.winner().is_none());
        assert_eq!(raffle.last_settled(), None);
    }

    #[test]
    fn stale_settle_is_ignored() {
        let config = WheelConfig::default();
        let mut raffle = raffle_with("A\nB");
        let mut rng = StdRng::seed_from_u64(9);
        let plan = raffle.plan_spin(&config, &mut rng).unwrap();
        let id = plan.id;
        raffle.begin(plan).unwrap();

        assert_eq!(raffle.settle(id + 1), None);
        assert!(raffle.is_spinning());
        assert!(raffle.settle(id).is_some());
    }

    #[test]
    fn clear_resets_roster_and_winner() {
        let config = WheelConfig::default();
        let mut raffle = raffle_with("A\nB\nC");
        let mut rng = StdRng::seed_from_u64(1);
        let plan = raffle.plan_spin(&config, &mut rng).unwrap();
        let id = plan.id;
        raffle.begin(plan).unwrap();
        raffle.settle(id);
        let rotation = raffle.rotation();

        raffle.clear();
        assert!(raffle.roster().is_empty());
        assert!(raffle.winner().is_none());
        assert_eq!(raffle.rotation(), rotation);
    }

    #[test]
    fn reducer_ignores_begin_on_empty_roster() {
        let state = Rc::new(Raffle::default());
        let plan = SpinPlan {
            id: 0,
            target: 3700.0,
            winner: "ghost".to_string(),
        };
        let next = state.clone().reduce(RaffleAction::Begin(plan));
        assert!(Rc::ptr_eq(&state, &next));
        assert!(!next.is_spinning());
    }

    #[test]
    fn reducer_imports_and_settles() {
        let config = WheelConfig::default();
        let mut rng = StdRng::seed_from_u64(21);
        let state = Rc::new(Raffle::default())
            .reduce(RaffleAction::Import(" Amy \n\nBen\n".to_string()));
        assert_eq!(state.roster().names(), ["Amy", "Ben"]);

        let plan = state.plan_spin(&config, &mut rng).unwrap();
        let id = plan.id;
        let state = state.reduce(RaffleAction::Begin(plan));
        assert!(state.is_spinning());
        let state = state.reduce(RaffleAction::Settle(id));
        assert!(state.winner().is_some());
        assert_eq!(state.last_settled(), Some(id));

        let state = state.reduce(RaffleAction::Clear);
        assert!(state.roster().is_empty());
        assert!(state.winner().is_none());
    }
}
