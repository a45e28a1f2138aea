use std::{sync::Arc, time::Duration};

use guess_classmate::{
    comparison::TagMatch,
    prelude::*,
    target_selection::{DrawKind, DEFAULT_SPECIAL_IDENTITY},
};
use rand::{rngs::StdRng, SeedableRng};

fn seeded_session(seed: u64) -> GameSession<StdRng> {
    GameSession::new(TargetSelector::with_rng(StdRng::seed_from_u64(seed)))
}

/// Guesses every character in dataset order until the round is won.
#[test]
fn exhaustive_play_always_wins() {
    let dataset = Dataset::fallback();
    for seed in 0..20 {
        let mut session = seeded_session(seed);
        let target = session.start_round(dataset.all()).unwrap().target.clone();

        let mut won_at = None;
        for (i, guess) in dataset.all().iter().enumerate() {
            let result = session.guess(guess).unwrap();
            assert_eq!(result.won, guess == &target);
            if result.won {
                won_at = Some(i);
                break;
            }
        }

        let won_at = won_at.expect("target is part of the pool");
        assert_eq!(session.guess_count(), won_at + 1);
        assert_eq!(session.outcome(), RoundOutcome::Won);
        assert!(matches!(
            session.guess(&dataset.all()[0]),
            Err(GuessError::RoundOver)
        ));
    }
}

#[test]
fn verdicts_agree_with_the_target() {
    let dataset = Dataset::fallback();
    let mut session = seeded_session(7);
    let target = session.start_round(dataset.all()).unwrap().target.clone();
    let guess = dataset
        .all()
        .iter()
        .find(|c| **c != target)
        .unwrap()
        .clone();

    let verdict = session.guess(&guess).unwrap().verdict;
    assert!(!verdict.is_win());
    assert!(!verdict.get(Field::Identity).unwrap().is_match());
    assert_eq!(
        verdict.get(Field::Gender).unwrap().is_match(),
        guess.gender == target.gender
    );
    assert_eq!(
        verdict.get(Field::Location).unwrap().is_match(),
        guess.location == target.location
    );

    let Some(Verdict::Tags(tags)) = verdict.get(Field::HobbyTags) else {
        panic!("hobby is compared as tags");
    };
    assert_eq!(tags.len(), guess.hobby_tokens().count());
    let target_tags = target.hobby_tags();
    for tag in tags {
        assert_eq!(
            tag.status == TagMatch::Matched,
            target_tags.contains(tag.tag.as_str())
        );
    }
}

#[test]
fn special_character_appears_by_round_five_when_conceding() {
    let dataset = Dataset::fallback();
    for seed in 0..50 {
        let mut session = seeded_session(seed);
        session.start_round(dataset.all());
        let mut seen = false;
        for round in 1..=5 {
            let draw = session.last_draw().unwrap();
            assert_eq!(draw.round, round);
            if draw.target.name == DEFAULT_SPECIAL_IDENTITY {
                seen = true;
                break;
            }
            assert_ne!(draw.kind, DrawKind::Forced);
            session.concede().unwrap();
            session.dismiss(dataset.all());
        }
        assert!(seen, "seed {seed}");
    }
}

#[tokio::test(start_paused = true)]
async fn debounced_search_feeds_a_guess() {
    let dataset = Arc::new(Dataset::fallback());
    let debouncer = SearchDebouncer::new(dataset.clone(), Duration::from_millis(300));

    let (stale, fresh) = tokio::join!(debouncer.submit("刘"), debouncer.submit("刘锦"));
    assert!(stale.is_none());
    let fresh = fresh.unwrap();
    assert_eq!(fresh.len(), 1);

    let mut session = seeded_session(3);
    session.start_round(dataset.all());
    let result = session.guess(&fresh[0]).unwrap();
    assert_eq!(result.won, session.target() == Some(&fresh[0]));
    assert!(matches!(
        session.guess(&fresh[0]),
        Err(GuessError::Duplicate(_)) | Err(GuessError::RoundOver)
    ));
}
