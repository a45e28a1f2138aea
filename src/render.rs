//! Terminal rendering of guesses and round outcomes.

use crate::{
    birth_date::display_age,
    comparison::{Field, GuessVerdict, TagMatch, Verdict, FIELDS},
    entity::{display_or_none, Entity},
    session::{GuessRecord, RoundOutcome},
};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Header row of the guess table.
pub fn header() -> String {
    FIELDS
        .iter()
        .map(|f| format!("{BOLD}{}{RESET}", f.label()))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// One cell of the guess table.
pub fn cell(field: Field, guess: &Entity, verdict: &Verdict) -> String {
    match (field, verdict) {
        (Field::Identity, _) => format!("{BOLD}{}{RESET}", display_or_none(&guess.name)),
        (Field::BirthDate, verdict) => {
            let value = highlight(&guess.birth_date, verdict.is_match());
            match verdict.arrow() {
                Some(arrow) => format!("{value}{RED}{arrow}{RESET}"),
                None => value,
            }
        }
        (Field::HobbyTags, Verdict::Tags(tags)) => tags
            .iter()
            .map(|t| match t.status {
                TagMatch::Matched => format!("{GREEN}{BOLD}[{}]{RESET}", t.tag),
                TagMatch::Unmatched => format!("{DIM}[{}]{RESET}", t.tag),
            })
            .collect::<Vec<_>>()
            .join(" "),
        (field, verdict) => highlight(display_or_none(field.value(guess)), verdict.is_match()),
    }
}

fn highlight(value: &str, is_match: bool) -> String {
    if is_match {
        format!("{GREEN}{BOLD}{value}{RESET}")
    } else {
        value.to_owned()
    }
}

/// A full row of the guess table.
pub fn row(guess: &Entity, verdict: &GuessVerdict) -> String {
    verdict
        .verdicts
        .iter()
        .map(|(field, v)| cell(*field, guess, v))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// The guess table, rows most recent first as given by the session.
pub fn table(history: &[(&GuessRecord, GuessVerdict)]) -> String {
    let mut lines = vec![header()];
    for (record, verdict) in history {
        lines.push(format!("{:>2}. {}", record.position + 1, row(&record.entity, verdict)));
    }
    lines.join("\n")
}

/// Profile card shown when a round ends.
pub fn profile(target: &Entity) -> String {
    let mut lines = vec![format!("{BOLD}{}{RESET}", target.name)];
    for field in &FIELDS[1..] {
        lines.push(format!("  {}: {}", field.label(), display_or_none(field.value(target))));
    }
    lines.push(format!("  年龄: {}", display_age(&target.birth_date)));
    lines.join("\n")
}

/// The end-of-round dialog.
pub fn outcome_dialog(outcome: RoundOutcome, target: &Entity, special_reveal: bool) -> String {
    let title = match outcome {
        RoundOutcome::Won => format!("{GREEN}{BOLD}恭喜你猜对了！{RESET}"),
        _ => format!("{YELLOW}{BOLD}谜底人物资料{RESET}"),
    };
    let mut lines = vec![title];
    if special_reveal {
        lines.push(match outcome {
            RoundOutcome::Won => {
                format!("{GREEN}{BOLD}恭喜你猜到了伟大的uuu之神，相信你也为他着迷吧！{RESET}")
            }
            _ => format!("{RED}{BOLD}你居然没有猜到伟大的uuu之神，等待接受神罚吧！{RESET}"),
        });
    }
    lines.push(profile(target));
    lines.join("\n")
}

/// A highlighted one-line warning.
pub fn warning(message: &str) -> String {
    format!("{YELLOW}{message}{RESET}")
}

/// Shown when there is nobody to guess.
pub fn no_players() -> String {
    format!("{RED}没有可用选手，请检查数据！{RESET}")
}
