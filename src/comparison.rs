//! Attribute comparison between a guess and the hidden target.
//!
//! Each guess is scored field by field over [`FIELDS`]. Fields fall into three kinds:
//!
//! - **categorical** (`gender`, `grade`, `location`): exact, case-sensitive equality. A blank
//!   value is its own "none" category, equal only to another blank value of the same field.
//! - **orderable** (`birthDate`): equality, otherwise an arrow pointing from the guess towards the
//!   target. [`Verdict::Higher`] means the target's date is later (the target is younger),
//!   [`Verdict::Lower`] means it is earlier (the target is older).
//! - **tag set** (`hobby`): one binary verdict per token of the guess, in the guess's order.
//!
//! The `name` field carries the win condition instead of a per-field comparison.

use std::{cmp::Ordering, fmt::Display};

use serde::Serialize;

use crate::entity::Entity;

/// The compared fields, in display order.
pub const FIELDS: [Field; 6] = [
    Field::Identity,
    Field::Gender,
    Field::BirthDate,
    Field::Grade,
    Field::Location,
    Field::HobbyTags,
];

/// A compared attribute of an [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// `name`, decides the win.
    Identity,
    /// `gender`, categorical.
    Gender,
    /// `birthDate`, orderable.
    BirthDate,
    /// `grade`, categorical.
    Grade,
    /// `location`, categorical.
    Location,
    /// `hobby`, tag set.
    HobbyTags,
}

impl Field {
    /// Column header shown to players.
    pub fn label(self) -> &'static str {
        match self {
            Field::Identity => "姓名",
            Field::Gender => "性别",
            Field::BirthDate => "出生日期",
            Field::Grade => "年级",
            Field::Location => "地区",
            Field::HobbyTags => "特质",
        }
    }

    /// The raw value of this field on `entity`.
    pub fn value(self, entity: &Entity) -> &str {
        match self {
            Field::Identity => &entity.name,
            Field::Gender => &entity.gender,
            Field::BirthDate => &entity.birth_date,
            Field::Grade => &entity.grade,
            Field::Location => &entity.location,
            Field::HobbyTags => &entity.hobby,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Whether one guessed tag is carried by the target.
pub enum TagMatch {
    /// The target has this tag.
    Matched,
    /// The target lacks this tag.
    Unmatched,
}

/// A single guess token and whether the target carries it too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagVerdict {
    /// The token as written in the guess.
    pub tag: String,
    /// Whether the target has it.
    pub status: TagMatch,
}

/// What a guess reveals about one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    /// Same value as the target.
    Match,
    /// Different value, or an orderable value missing on either side.
    NoMatch,
    /// Target's value orders after the guess's.
    Higher,
    /// Target's value orders before the guess's.
    Lower,
    /// One verdict per guessed tag, in the guess's order.
    Tags(Vec<TagVerdict>),
}

impl Verdict {
    /// Only [`Verdict::Match`] counts as a match; tag verdicts never do.
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Match)
    }

    /// Arrow shown next to an orderable value, if any.
    pub fn arrow(&self) -> Option<&'static str> {
        match self {
            Verdict::Higher => Some("↑"),
            Verdict::Lower => Some("↓"),
            _ => None,
        }
    }
}

/// Per-field verdicts for one guess, in [`FIELDS`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessVerdict {
    /// One entry per compared field.
    pub verdicts: Vec<(Field, Verdict)>,
}

impl GuessVerdict {
    /// Verdict of `field`, `None` only for a hand-built value missing it.
    pub fn get(&self, field: Field) -> Option<&Verdict> {
        self.verdicts
            .iter()
            .find_map(|(f, v)| if *f == field { Some(v) } else { None })
    }

    /// True when the guess is the target.
    pub fn is_win(&self) -> bool {
        self.get(Field::Identity).is_some_and(Verdict::is_match)
    }
}

/// Win condition: the guess names the target.
pub fn is_win(guess: &Entity, target: &Entity) -> bool {
    guess.name == target.name
}

/// Scores one field of `guess` against `target`.
pub fn compare_field(field: Field, guess: &Entity, target: &Entity) -> Verdict {
    match field {
        Field::Identity => match_or_not(is_win(guess, target)),
        Field::Gender | Field::Grade | Field::Location => {
            match_or_not(field.value(guess) == field.value(target))
        }
        Field::BirthDate => compare_ordered(&guess.birth_date, &target.birth_date),
        Field::HobbyTags => Verdict::Tags(compare_tags(guess, target)),
    }
}

/// Scores every field of `guess` against `target`, in [`FIELDS`] order.
pub fn compare(guess: &Entity, target: &Entity) -> GuessVerdict {
    GuessVerdict {
        verdicts: FIELDS
            .iter()
            .map(|&field| (field, compare_field(field, guess, target)))
            .collect(),
    }
}

fn match_or_not(is_equal: bool) -> Verdict {
    if is_equal {
        Verdict::Match
    } else {
        Verdict::NoMatch
    }
}

fn compare_ordered(guess: &str, target: &str) -> Verdict {
    if guess == target {
        return Verdict::Match;
    }
    if guess.is_empty() || target.is_empty() {
        // no direction can be given against a missing value
        return Verdict::NoMatch;
    }
    match target.cmp(guess) {
        Ordering::Greater => Verdict::Higher,
        Ordering::Less => Verdict::Lower,
        Ordering::Equal => Verdict::Match,
    }
}

fn compare_tags(guess: &Entity, target: &Entity) -> Vec<TagVerdict> {
    let target_tags = target.hobby_tags();
    guess
        .hobby_tokens()
        .map(|tag| TagVerdict {
            tag: tag.to_owned(),
            status: if target_tags.contains(tag) {
                TagMatch::Matched
            } else {
                TagMatch::Unmatched
            },
        })
        .collect()
}
