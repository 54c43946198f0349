//! Word store CRUD, validation, search, and settings round-trips.

mod common;

use common::{at, engine, seed_word};
use pretty_assertions::assert_eq;
use vocab_core::MasteryLevel;
use vocab_engine::Error;

#[test]
fn added_words_round_trip() {
    let engine = engine();
    let word = engine
        .add_word("  apple  ", " a fruit ", Some(" common noun "))
        .unwrap();

    let fetched = engine.get_word(word.id).unwrap();
    assert_eq!(fetched.term, "apple");
    assert_eq!(fetched.translation, "a fruit");
    assert_eq!(fetched.memo, "common noun");
    assert!(!fetched.is_favorite);
    assert_eq!(fetched.created_at, at(0));
    assert_eq!(fetched.modified_at, None);
}

#[test]
fn duplicate_terms_violate_integrity() {
    let engine = engine();
    engine.add_word("apple", "a fruit", None).unwrap();
    let err = engine.add_word("apple", "another fruit", None).unwrap_err();
    assert!(matches!(err, Error::Integrity(_)));
}

#[test]
fn blank_or_oversized_fields_are_rejected() {
    let engine = engine();
    assert!(matches!(
        engine.add_word("   ", "a fruit", None).unwrap_err(),
        Error::Validation(_)
    ));
    assert!(matches!(
        engine.add_word("apple", "", None).unwrap_err(),
        Error::Validation(_)
    ));
    let long_term = "x".repeat(101);
    assert!(matches!(
        engine.add_word(&long_term, "a fruit", None).unwrap_err(),
        Error::Validation(_)
    ));
    let long_translation = "x".repeat(501);
    assert!(matches!(
        engine
            .add_word("apple", &long_translation, None)
            .unwrap_err(),
        Error::Validation(_)
    ));
}

#[test]
fn updates_touch_translation_and_memo_only() {
    let engine = engine();
    let word = seed_word(&engine, "apple");

    engine
        .update_word(word, Some("updated translation"), None)
        .unwrap();
    let fetched = engine.get_word(word).unwrap();
    assert_eq!(fetched.term, "apple");
    assert_eq!(fetched.translation, "updated translation");
    assert_eq!(fetched.modified_at, Some(at(0)));

    engine.update_word(word, None, Some("a memo")).unwrap();
    assert_eq!(engine.get_word(word).unwrap().memo, "a memo");
}

#[test]
fn updating_or_deleting_missing_words_is_not_found() {
    let engine = engine();
    assert!(matches!(
        engine.update_word(7, Some("x"), None).unwrap_err(),
        Error::WordNotFound(7)
    ));
    assert!(matches!(
        engine.delete_word(7).unwrap_err(),
        Error::WordNotFound(7)
    ));
}

#[test]
fn favorite_flag_toggles() {
    let engine = engine();
    let word = seed_word(&engine, "apple");
    assert!(engine.toggle_favorite(word).unwrap());
    assert!(engine.get_word(word).unwrap().is_favorite);
    assert!(!engine.toggle_favorite(word).unwrap());
}

#[test]
fn listing_is_newest_first() {
    let engine = engine();
    let a = seed_word(&engine, "alpha");
    let b = seed_word(&engine, "beta");
    let c = seed_word(&engine, "gamma");

    let all: Vec<i64> = engine
        .list_words(10, 0)
        .unwrap()
        .iter()
        .map(|o| o.word.id)
        .collect();
    assert_eq!(all, vec![c, b, a]);

    let page: Vec<i64> = engine
        .list_words(1, 1)
        .unwrap()
        .iter()
        .map(|o| o.word.id)
        .collect();
    assert_eq!(page, vec![b]);
}

#[test]
fn search_covers_term_translation_and_memo() {
    let engine = engine();
    engine.add_word("apple", "a red fruit", None).unwrap();
    engine.add_word("pear", "a green fruit", None).unwrap();
    engine.add_word("train", "goes on rails", None).unwrap();

    let hits = engine.search_words("fruit").unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].word.term, "apple");
    assert_eq!(hits[1].word.term, "pear");
}

#[test]
fn overviews_carry_mastery_from_statistics() {
    let engine = engine();
    let word = seed_word(&engine, "apple");

    for (day, ok) in [(0, false), (1, false), (2, false), (3, true)] {
        engine
            .submit_attempt(word, "flashcard", ok, None, at(day))
            .unwrap();
    }

    let overview = engine.word_overview(word).unwrap();
    assert_eq!(overview.total_attempts, 4);
    assert_eq!(overview.wrong_rate, Some(75.0));
    assert_eq!(overview.mastery, MasteryLevel::Weak);
}

#[test]
fn settings_round_trip_with_defaults() {
    let engine = engine();

    let defaults = engine.settings().unwrap();
    assert_eq!(defaults.daily_word_goal, 50);
    assert_eq!(defaults.theme, "light");

    engine.set_setting("daily_word_goal", "25").unwrap();
    assert_eq!(engine.settings().unwrap().daily_word_goal, 25);
    assert_eq!(
        engine.get_setting("daily_word_goal").unwrap().as_deref(),
        Some("25")
    );

    // Malformed numbers fall back to the default.
    engine.set_setting("daily_word_goal", "plenty").unwrap();
    assert_eq!(engine.settings().unwrap().daily_word_goal, 50);
}
