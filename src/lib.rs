//! # Guess Classmate
//!
//! A "guess the classmate" deduction game. A hidden target is drawn from a small roster of
//! people; the player guesses names and, for every guess, learns which attributes match the
//! target's.
//!
//! It provides:
//! - A read-only character [`Dataset`](crate::dataset::Dataset) loaded from a flat file, with an
//!   embedded fallback roster
//! - The comparison engine ([`comparison`]) deciding, field by field, what a guess reveals
//! - A target selection policy ([`target_selection`]) guaranteeing a special character early on
//! - A [`GameSession`](crate::session::GameSession) driving rounds, guesses and concessions
//! - An HTTP [`server`] exposing the dataset, and an HTTP [`client`] with debounced search
//!
//! # Comparison rules
//!
//! | field | kind | verdict |
//! |---|---|---|
//! | name | identity | match only when the guess is the target |
//! | gender, grade, location | categorical | exact match or not |
//! | birth date | orderable | match, or ↑ (target younger) / ↓ (target older) |
//! | hobby | tag set | each guessed tag flagged as shared or not |
//!
//! # Usage Example
//!
//! ```
//! use guess_classmate::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let dataset = Dataset::fallback();
//! let selector = TargetSelector::with_rng(StdRng::seed_from_u64(42));
//! let mut session = GameSession::new(selector);
//! session.start_round(dataset.all());
//!
//! let guess = dataset.search("孙瑜", None).remove(0);
//! match session.guess(&guess) {
//!     Ok(result) if result.won => println!("found in one!"),
//!     Ok(result) => {
//!         let gender = result.verdict.get(Field::Gender).unwrap();
//!         println!("gender matches: {}", gender.is_match());
//!     }
//!     Err(e) => println!("{e}"),
//! }
//! ```
//!
//! # Binaries
//!
//! - `guess-server` serves the dataset over HTTP (see [`server`] for routes)
//! - `guess-play` is a terminal client playing against a running server
//!
//! Both read their settings from the environment, see [`configuration`].
#![warn(missing_docs)]

pub mod birth_date;
pub mod client;
pub mod comparison;
pub mod configuration;
pub mod dataset;
pub mod entity;
pub mod error;
mod fallback;
pub mod logger;
pub mod render;
pub mod search;
pub mod server;
pub mod session;
pub mod target_selection;

pub use anyhow;

/// Commonly used types and traits for quick access.
///
/// ```rust
/// use guess_classmate::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::ApiClient;
    pub use crate::comparison::{compare, compare_field, Field, GuessVerdict, Verdict};
    pub use crate::configuration::Configuration;
    pub use crate::dataset::Dataset;
    pub use crate::entity::Entity;
    pub use crate::error::GuessError;
    pub use crate::search::{CharacterSource, SearchDebouncer};
    pub use crate::server::serve;
    pub use crate::session::{GameSession, RoundOutcome};
    pub use crate::target_selection::TargetSelector;
}
