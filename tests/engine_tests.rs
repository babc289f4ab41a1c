// Integration tests for the guessing engine
//
// Tests cover:
// - Question priming and prediction over the seed state
// - Weight adjustment and renormalization from feedback
// - Learning new entities and adding questions
// - Reloading state from the file store

use std::sync::Arc;

use guesswork::config::config::EngineConfig;
use guesswork::models::answer::{Answer, AnswerSet};
use guesswork::models::seed;
use guesswork::services::{GuessEngine, GuessService};
use guesswork::storage::file_store::JsonFileStore;
use guesswork::storage::memory_store::MemoryStore;
use guesswork::storage::repository::StateStore;

const PET: &str = "Is it a pet?";

fn answers(pairs: &[(&str, Answer)]) -> AnswerSet {
    pairs.iter().map(|(q, a)| (q.to_string(), *a)).collect()
}

fn dog_answers() -> AnswerSet {
    use Answer::{No, Yes};
    answers(&[
        (seed::IS_ANIMAL, Yes),
        ("Does it live in water?", No),
        ("Is it a mammal?", Yes),
        ("Can it fly?", No),
        (PET, Yes),
        ("Is it a predator?", No),
        ("Is it larger than a microwave?", No),
        ("Is it common in households?", Yes),
    ])
}

async fn seeded_engine() -> GuessEngine {
    GuessEngine::load(EngineConfig::default(), Arc::new(MemoryStore::new()))
        .await
        .unwrap()
}

async fn weight_of(engine: &GuessEngine, question: &str) -> f64 {
    engine
        .export_state()
        .await
        .questions
        .into_iter()
        .find(|q| q.text == question)
        .map(|q| q.weight)
        .unwrap()
}

#[tokio::test]
async fn test_empty_round_asks_root_question() {
    let engine = seeded_engine().await;
    let empty = AnswerSet::new();

    let prediction = engine.predict(&empty).await;
    assert!(prediction.entity.is_none());
    assert_eq!(prediction.confidence, 0.0);
    assert_eq!(engine.next_question(&empty).await.as_deref(), Some(seed::IS_ANIMAL));
}

#[tokio::test]
async fn test_dog_is_guessed() {
    let engine = seeded_engine().await;
    let prediction = engine.predict(&dog_answers()).await;

    assert_eq!(prediction.entity.as_deref(), Some("dog"));
    assert_eq!(prediction.confidence, 1.0);
}

#[tokio::test]
async fn test_short_rounds_do_not_commit() {
    let engine = seeded_engine().await;
    let mut answers = dog_answers();
    answers.remove("Is it common in households?");

    let prediction = engine.predict(&answers).await;
    assert!(prediction.entity.is_none());
    assert_eq!(prediction.confidence, 1.0);
    assert!(engine.next_question(&answers).await.is_some());
}

#[tokio::test]
async fn test_next_question_skips_answered() {
    let engine = seeded_engine().await;
    let mut answers = AnswerSet::new();

    for _ in 0..seed::question_bank().len() {
        let Some(question) = engine.next_question(&answers).await else {
            break;
        };
        assert!(!answers.contains_key(&question), "asked {} twice", question);
        answers.insert(question, Answer::No);
    }

    assert_eq!(answers.len(), seed::question_bank().len());
    assert!(engine.next_question(&answers).await.is_none());
}

#[tokio::test]
async fn test_correct_feedback_compounds_then_renormalizes() {
    let engine = seeded_engine().await;
    let round = answers(&[(PET, Answer::Yes)]);

    let mut expected = 1.0_f64;
    for _ in 0..47 {
        let outcome = engine.update_from_feedback("dog", &round, true).await.unwrap();
        assert!(!outcome.renormalized);
        expected *= 1.05;
    }
    assert_eq!(weight_of(&engine, PET).await, expected);
    assert!(expected < 10.0);

    let outcome = engine.update_from_feedback("dog", &round, true).await.unwrap();
    assert!(outcome.renormalized);
    assert!(!outcome.new_entity);

    let max = expected * 1.05;
    assert_eq!(weight_of(&engine, PET).await, 5.0);
    let other = weight_of(&engine, seed::IS_ANIMAL).await;
    assert!((other - 5.0 / max).abs() < 1e-12);
}

#[tokio::test]
async fn test_incorrect_feedback_penalizes_only() {
    let engine = seeded_engine().await;
    let round = answers(&[(PET, Answer::Yes), ("Can it fly?", Answer::No)]);

    let outcome = engine
        .update_from_feedback("hamster", &round, false)
        .await
        .unwrap();
    assert_eq!(outcome.adjusted_questions, 2);
    assert!(!outcome.new_entity);

    assert_eq!(weight_of(&engine, PET).await, 0.95);
    assert_eq!(weight_of(&engine, "Can it fly?").await, 0.95);
    assert_eq!(engine.debug_snapshot().await.entity_count, 5);
}

#[tokio::test]
async fn test_learned_entity_becomes_candidate() {
    let engine = seeded_engine().await;
    let round = answers(&[
        (seed::IS_ANIMAL, Answer::Yes),
        ("Does it live in water?", Answer::Yes),
        ("Is it a mammal?", Answer::Yes),
        ("Does it click?", Answer::Yes),
    ]);

    let outcome = engine.update_from_feedback("dolphin", &round, true).await.unwrap();
    assert!(outcome.new_entity);
    // 问题库外的问题不调整权重
    assert_eq!(outcome.adjusted_questions, 3);

    assert_eq!(engine.candidates(&round).await, vec!["dolphin".to_string()]);
    let export = engine.export_state().await;
    assert_eq!(export.entities.last().unwrap().name, "dolphin");
    assert_eq!(export.entities.last().unwrap().answers, round);
}

#[tokio::test]
async fn test_add_question_is_idempotent() {
    let engine = seeded_engine().await;
    let before = engine.debug_snapshot().await.question_count;

    assert!(engine.add_question("Does it have stripes?").await.unwrap());
    engine
        .update_from_feedback("zebra", &answers(&[("Does it have stripes?", Answer::Yes)]), true)
        .await
        .unwrap();
    assert!(!engine.add_question("Does it have stripes?").await.unwrap());

    assert_eq!(engine.debug_snapshot().await.question_count, before + 1);
    assert_eq!(weight_of(&engine, "Does it have stripes?").await, 1.05);
}

#[tokio::test]
async fn test_state_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(
        dir.path().join("questions.json"),
        dir.path().join("entities.json"),
    ));

    let engine = GuessEngine::load(EngineConfig::default(), store.clone())
        .await
        .unwrap();
    engine
        .add_question_with_categories("Does it purr?", vec!["animal".to_string()])
        .await
        .unwrap();
    for _ in 0..3 {
        engine
            .update_from_feedback("cat", &answers(&[("Does it purr?", Answer::Yes)]), true)
            .await
            .unwrap();
    }
    let before = engine.export_state().await;

    let reloaded = GuessEngine::load(EngineConfig::default(), store.clone())
        .await
        .unwrap();
    assert_eq!(reloaded.export_state().await, before);
    assert!(store.load_entity_catalog().await.unwrap().is_some());
}
