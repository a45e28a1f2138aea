//! A player's game session.
//!
//! [`GameSession`] owns everything that changes while playing: the current target, the guess
//! history, the round outcome and the [`TargetSelector`] carrying the pity timer across rounds.
//! A round goes through:
//!
//! 1. [`start_round`](GameSession::start_round): a target is drawn and the history cleared.
//! 2. Any number of [`guess`](GameSession::guess) calls, until one names the target, or a
//!    [`concede`](GameSession::concede).
//! 3. [`dismiss`](GameSession::dismiss) once the outcome has been shown, which starts the next
//!    round.
//!
//! Starting a new game mid-round is simply another `start_round` and counts as a round.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    comparison::{compare, GuessVerdict},
    entity::Entity,
    error::GuessError,
    target_selection::{Draw, TargetSelector},
};

/// A past guess and its place in the history (0 is the first guess of the round).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    /// Order of the guess within the round.
    pub position: usize,
    /// The guessed character.
    pub entity: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Where the current round stands.
pub enum RoundOutcome {
    /// Guesses are accepted.
    InProgress,
    /// The target was guessed.
    Won,
    /// The player gave up and the target was revealed.
    Conceded,
}

/// Result of an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    /// Field by field comparison with the target.
    pub verdict: GuessVerdict,
    /// The guess was the target; the round is now over.
    pub won: bool,
}

/// One player's game: the current target, the guesses made against it and the round outcome.
///
/// The [`TargetSelector`] lives inside the session, so the guarantee carries over from one round
/// to the next.
pub struct GameSession<R: Rng> {
    selector: TargetSelector<R>,
    target: Option<Entity>,
    guesses: Vec<GuessRecord>,
    outcome: RoundOutcome,
    special_reveal: bool,
    last_draw: Option<Draw>,
}

impl<R: Rng> GameSession<R> {
    /// A session without target. Call [`start_round`](Self::start_round) to begin playing.
    pub fn new(selector: TargetSelector<R>) -> Self {
        Self {
            selector,
            target: None,
            guesses: vec![],
            outcome: RoundOutcome::InProgress,
            special_reveal: false,
            last_draw: None,
        }
    }

    /// Draws a new target from `pool` and resets the round.
    ///
    /// With an empty pool the session has no target and refuses guesses.
    pub fn start_round(&mut self, pool: &[Entity]) -> Option<&Draw> {
        self.guesses.clear();
        self.outcome = RoundOutcome::InProgress;
        match self.selector.select(pool) {
            Some(draw) => {
                info!(round = draw.round, "new round");
                self.special_reveal = draw.special_reveal;
                self.target = Some(draw.target.clone());
                self.last_draw = Some(draw);
                self.last_draw.as_ref()
            }
            None => {
                warn!("no players available");
                self.target = None;
                self.special_reveal = false;
                self.last_draw = None;
                None
            }
        }
    }

    /// Scores `entity` against the target and appends it to the history.
    pub fn guess(&mut self, entity: &Entity) -> Result<GuessResult, GuessError> {
        let Some(target) = &self.target else {
            return Err(GuessError::NoTarget);
        };
        if self.outcome != RoundOutcome::InProgress {
            return Err(GuessError::RoundOver);
        }
        if self.guesses.iter().any(|g| g.entity.name == entity.name) {
            debug!("duplicate guess '{}'", entity.name);
            return Err(GuessError::Duplicate(entity.name.clone()));
        }

        let verdict = compare(entity, target);
        let won = verdict.is_win();
        self.guesses.push(GuessRecord {
            position: self.guesses.len(),
            entity: entity.clone(),
        });
        if won {
            info!(guesses = self.guesses.len(), "target found");
            self.outcome = RoundOutcome::Won;
        }
        Ok(GuessResult { verdict, won })
    }

    /// Gives up the round and reveals the target.
    pub fn concede(&mut self) -> Result<&Entity, GuessError> {
        let Some(target) = &self.target else {
            return Err(GuessError::NoTarget);
        };
        if self.outcome == RoundOutcome::InProgress {
            info!(guesses = self.guesses.len(), "round conceded");
            self.outcome = RoundOutcome::Conceded;
        }
        Ok(target)
    }

    /// Acknowledges the round outcome and moves on to the next round.
    pub fn dismiss(&mut self, pool: &[Entity]) -> Option<&Draw> {
        self.special_reveal = false;
        self.start_round(pool)
    }

    /// The draw that started the current round.
    pub fn last_draw(&self) -> Option<&Draw> {
        self.last_draw.as_ref()
    }

    /// Target of the current round, `None` when the pool was empty.
    pub fn target(&self) -> Option<&Entity> {
        self.target.as_ref()
    }

    /// Guessing is disabled when there is no target.
    pub fn is_inert(&self) -> bool {
        self.target.is_none()
    }

    /// Outcome of the current round.
    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    /// True while the current round's target is the special character.
    pub fn special_reveal(&self) -> bool {
        self.special_reveal
    }

    /// Number of rounds started so far.
    pub fn round(&self) -> u32 {
        self.selector.round()
    }

    /// Guesses made in the current round.
    pub fn guess_count(&self) -> usize {
        self.guesses.len()
    }

    /// The guess history, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &GuessRecord> {
        self.guesses.iter().rev()
    }

    /// The guess history with each guess compared to the target, most recent first.
    pub fn scored_history(&self) -> Vec<(&GuessRecord, GuessVerdict)> {
        match &self.target {
            Some(target) => self
                .history()
                .map(|record| (record, compare(&record.entity, target)))
                .collect(),
            None => vec![],
        }
    }
}
