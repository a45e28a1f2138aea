//! Target selection policy.
//!
//! Targets are drawn uniformly from the pool, with one exception: a designated *special*
//! character is guaranteed to show up within the first [`DEFAULT_GUARANTEE_ROUND`] rounds. The
//! guarantee is a small state machine:
//!
//! - While [`Guarantee::Pending`], rounds before the guarantee round draw uniformly. Drawing the
//!   special character by chance fulfills the guarantee.
//! - At the guarantee round, if still pending, the special character is forced (when it is in
//!   the pool; otherwise the draw stays uniform). The guarantee is fulfilled either way.
//! - Once [`Guarantee::Fulfilled`], every draw is uniform.
//!
//! Every draw of the special character, forced or not, raises [`Draw::special_reveal`] so the
//! end-of-round presentation can celebrate it.

use rand::{seq::IndexedRandom, Rng};
use tracing::{debug, info};

use crate::entity::Entity;

/// Round by which the special character is guaranteed to have been drawn.
pub const DEFAULT_GUARANTEE_ROUND: u32 = 5;

/// Character the guarantee applies to.
pub const DEFAULT_SPECIAL_IDENTITY: &str = "刘锦东";

/// State of the special character guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guarantee {
    /// Not met yet, the special character will be forced at the guarantee round.
    Pending,
    /// Met or spent, draws stay uniform from now on.
    Fulfilled,
}

/// How a target was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    /// Uniformly at random over the pool.
    Uniform,
    /// The special character, imposed by the guarantee.
    Forced,
}

/// The outcome of one target selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    /// The hidden character of the round.
    pub target: Entity,
    /// 1-based round number of this draw.
    pub round: u32,
    /// How the target was chosen.
    pub kind: DrawKind,
    /// The target is the special character.
    pub special_reveal: bool,
}

/// Draws targets round after round, keeping the pity timer state between draws.
pub struct TargetSelector<R: Rng> {
    rng: R,
    round: u32,
    guarantee: Guarantee,
    guarantee_round: u32,
    special_identity: Option<String>,
}

impl TargetSelector<rand::rngs::ThreadRng> {
    /// A selector with the default special character and guarantee round.
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for TargetSelector<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TargetSelector<R> {
    /// A selector drawing from `rng`, with the default special character and guarantee round.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            round: 0,
            guarantee: Guarantee::Pending,
            guarantee_round: DEFAULT_GUARANTEE_ROUND,
            special_identity: Some(DEFAULT_SPECIAL_IDENTITY.to_owned()),
        }
    }

    /// Sets the character covered by the guarantee. `None` disables it.
    #[must_use]
    pub fn with_special_identity(mut self, identity: Option<String>) -> Self {
        self.special_identity = identity;
        self
    }

    /// Sets the round at which the special character is forced if not yet drawn.
    #[must_use]
    pub fn with_guarantee_round(mut self, round: u32) -> Self {
        self.guarantee_round = round;
        self
    }

    /// Number of draws made so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Current state of the guarantee.
    pub fn guarantee(&self) -> Guarantee {
        self.guarantee
    }

    /// True if `entity` is the character covered by the guarantee.
    pub fn is_special(&self, entity: &Entity) -> bool {
        self.special_identity
            .as_deref()
            .is_some_and(|name| name == entity.name)
    }

    /// Draws the next target from `pool`.
    ///
    /// An empty pool yields `None` and does not count as a round.
    pub fn select(&mut self, pool: &[Entity]) -> Option<Draw> {
        if pool.is_empty() {
            debug!("empty pool, no target");
            return None;
        }
        self.round += 1;

        let forced = match self.guarantee {
            Guarantee::Pending if self.round >= self.guarantee_round => {
                self.guarantee = Guarantee::Fulfilled;
                self.special_in(pool)
            }
            _ => None,
        };

        let (target, kind) = match forced {
            Some(special) => {
                info!(round = self.round, "guarantee round, forcing {}", special.name);
                (special.clone(), DrawKind::Forced)
            }
            None => (self.uniform(pool)?, DrawKind::Uniform),
        };

        let special_reveal = self.is_special(&target);
        if special_reveal {
            self.guarantee = Guarantee::Fulfilled;
        }

        debug!(round = self.round, target = %target.name, ?kind, special_reveal);
        Some(Draw {
            target,
            round: self.round,
            kind,
            special_reveal,
        })
    }

    fn special_in<'a>(&self, pool: &'a [Entity]) -> Option<&'a Entity> {
        pool.iter().find(|e| self.is_special(e))
    }

    fn uniform(&mut self, pool: &[Entity]) -> Option<Entity> {
        pool.choose(&mut self.rng).cloned()
    }
}
