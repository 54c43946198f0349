//! Exam aggregation: scoring, atomicity, cascades, question generation.

mod common;

use common::{at, engine, seed_word};
use pretty_assertions::assert_eq;
use vocab_core::ExamType;
use vocab_engine::{Error, QuestionResult};

fn answer(word_id: i64, user_answer: &str, is_correct: bool) -> QuestionResult {
    QuestionResult {
        word_id,
        user_answer: user_answer.to_string(),
        is_correct,
        response_time_ms: None,
    }
}

#[test]
fn a_sitting_persists_session_details_and_statistics() {
    let engine = engine();
    let apple = seed_word(&engine, "apple");
    let pear = seed_word(&engine, "pear");

    let summary = engine
        .record_exam(
            "multiple_choice",
            &[answer(apple, "apple", true), answer(pear, "peach", false)],
            120,
            at(0),
        )
        .unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.wrong, 1);
    assert!((summary.score - 50.0).abs() < 1e-9);
    assert_eq!(summary.wrong_word_ids, vec![pear]);

    let sessions = engine.exam_history(10).unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].total_words, 2);
    assert_eq!(sessions[0].correct_count, 1);
    assert_eq!(sessions[0].exam_type, ExamType::MultipleChoice);

    let details = engine.exam_details(summary.exam_id).unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].question_number, 1);
    assert_eq!(details[0].term, "apple");
    assert_eq!(details[1].user_answer, "peach");
    assert!(!details[1].is_correct);

    // Replayed through the recorder: statistics and history are unified.
    let history = engine.attempt_history(apple).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].mode, vocab_core::StudyMode::Exam);
    assert_eq!(engine.word_overview(pear).unwrap().total_attempts, 1);
    assert!(engine.is_flagged(pear).unwrap());
    assert!(!engine.is_flagged(apple).unwrap());
}

#[test]
fn an_unknown_word_fails_the_whole_batch() {
    let engine = engine();
    let apple = seed_word(&engine, "apple");
    let pear = seed_word(&engine, "pear");

    let err = engine
        .record_exam(
            "short_answer",
            &[
                answer(apple, "apple", true),
                answer(9999, "ghost", false),
                answer(pear, "pear", true),
            ],
            60,
            at(0),
        )
        .unwrap_err();
    assert!(matches!(err, Error::WordNotFound(9999)));

    // Nothing was persisted: no session, no details, no attempts, no stats.
    assert!(engine.exam_history(10).unwrap().is_empty());
    assert!(engine.attempt_history(apple).unwrap().is_empty());
    assert!(engine.attempt_history(pear).unwrap().is_empty());
    assert_eq!(engine.word_overview(apple).unwrap().total_attempts, 0);
    assert!(engine.wrong_notes().unwrap().is_empty());
}

#[test]
fn empty_sittings_are_rejected() {
    let engine = engine();
    let err = engine.record_exam("short_answer", &[], 0, at(0)).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn unknown_exam_type_is_rejected() {
    let engine = engine();
    let apple = seed_word(&engine, "apple");
    let err = engine
        .record_exam("essay", &[answer(apple, "apple", true)], 10, at(0))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn deleting_a_word_cascades_but_spares_siblings() {
    let engine = engine();
    let apple = seed_word(&engine, "apple");
    let pear = seed_word(&engine, "pear");

    engine
        .submit_attempt(apple, "flashcard", false, None, at(0))
        .unwrap();
    engine
        .submit_attempt(pear, "flashcard", true, None, at(0))
        .unwrap();
    let summary = engine
        .record_exam(
            "short_answer",
            &[answer(apple, "aple", false), answer(pear, "pear", true)],
            30,
            at(1),
        )
        .unwrap();

    engine.delete_word(apple).unwrap();

    assert!(matches!(
        engine.get_word(apple).unwrap_err(),
        Error::WordNotFound(_)
    ));
    assert!(engine.attempt_history(apple).unwrap().is_empty());
    assert!(engine.wrong_notes().unwrap().is_empty());

    // The sibling detail row and the session header survive.
    let details = engine.exam_details(summary.exam_id).unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].word_id, pear);
    assert_eq!(engine.exam_session(summary.exam_id).unwrap().total_words, 2);

    // The sibling word's records are untouched.
    assert_eq!(engine.attempt_history(pear).unwrap().len(), 2);
}

#[test]
fn details_of_an_unknown_exam_are_not_found() {
    let engine = engine();
    let err = engine.exam_details(42).unwrap_err();
    assert!(matches!(err, Error::ExamNotFound(42)));
}

#[test]
fn generated_multiple_choice_questions_carry_four_options() {
    let engine = engine();
    for term in ["a", "b", "c", "d", "e"] {
        seed_word(&engine, term);
    }

    let questions = engine
        .generate_exam(ExamType::MultipleChoice, 4)
        .unwrap();
    assert_eq!(questions.len(), 4);
    for (i, q) in questions.iter().enumerate() {
        assert_eq!(q.question_number, i as u32 + 1);
        let choices = q.choices.as_ref().expect("multiple choice options");
        assert_eq!(choices.len(), 4);
        assert!(choices.contains(&q.correct_answer));
    }
}

#[test]
fn short_answer_questions_have_no_options() {
    let engine = engine();
    seed_word(&engine, "apple");

    let questions = engine.generate_exam(ExamType::ShortAnswer, 1).unwrap();
    assert_eq!(questions.len(), 1);
    assert!(questions[0].choices.is_none());
    assert_eq!(questions[0].prompt, "apple (translation)");
}

#[test]
fn generating_an_exam_without_words_fails() {
    let engine = engine();
    let err = engine
        .generate_exam(ExamType::ShortAnswer, 5)
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
