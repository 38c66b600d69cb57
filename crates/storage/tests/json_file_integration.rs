use std::collections::BTreeMap;

use prep_core::model::{Category, CategoryPerformance, QuizHistoryEntry, StatsSnapshot};
use prep_core::time::fixed_now;
use storage::{JsonFileRepository, SnapshotRepository, StorageError};

fn sample_snapshot() -> StatsSnapshot {
    let mut breakdown = BTreeMap::new();
    breakdown.insert(Category::Ethics, CategoryPerformance { attempts: 2, correct: 1 });
    breakdown.insert(
        Category::MortgageProducts,
        CategoryPerformance { attempts: 1, correct: 1 },
    );

    StatsSnapshot {
        questions_attempted: 3,
        correct_answers: 2,
        category_performance: breakdown.clone(),
        quiz_history: vec![QuizHistoryEntry {
            date: fixed_now().to_rfc3339(),
            total_questions: 3,
            correct_answers: 2,
            percent: 67,
            category_breakdown: breakdown,
        }],
    }
}

#[test]
fn missing_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path().join("stats.json"));
    assert!(repo.load().unwrap().is_none());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path().join("nested").join("stats.json"));
    let snapshot = sample_snapshot();

    repo.save(&snapshot).unwrap();
    assert_eq!(repo.load().unwrap(), Some(snapshot));

    let text = std::fs::read_to_string(repo.path()).unwrap();
    assert!(text.contains("\"questionsAttempted\": 3"));
    assert!(text.contains("\"Mortgage Products\""));
}

#[test]
fn malformed_document_is_a_snapshot_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.json");
    std::fs::write(&path, r#"{"questionsAttempted": 1, "correctAnswers": 0}"#).unwrap();

    let repo = JsonFileRepository::new(&path);
    let err = repo.load().unwrap_err();
    assert!(matches!(err, StorageError::Snapshot(_)));
}

#[test]
fn inconsistent_document_is_rejected_on_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.json");
    std::fs::write(
        &path,
        r#"{"questionsAttempted": 1, "correctAnswers": 2, "categoryPerformance": {}, "quizHistory": []}"#,
    )
    .unwrap();

    let err = JsonFileRepository::read_snapshot(&path).unwrap_err();
    assert!(matches!(err, StorageError::Snapshot(_)));
}
