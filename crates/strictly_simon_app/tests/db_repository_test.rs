//! Leaderboard persistence against a real SQLite file.

use strictly_simon::RoundResult;
use strictly_simon_app::db::ResultRepository;
use strictly_simon_app::{ResultStore, SqliteResultStore};
use tempfile::TempDir;

fn repository(dir: &TempDir) -> ResultRepository {
    let path = dir.path().join("scores.db");
    ResultRepository::new(path.to_string_lossy().into_owned()).expect("open database")
}

fn result(name: &str, score: u32) -> RoundResult {
    RoundResult::new(name, score).expect("valid name")
}

#[test]
fn test_fifteen_results_keep_top_ten() {
    let dir = TempDir::new().expect("temp dir");
    let repo = repository(&dir);

    for score in [3, 15, 1, 9, 12, 7, 4, 14, 2, 11, 6, 13, 5, 10, 8] {
        repo.append(&result(&format!("p{score}"), score)).expect("append");
    }

    let scores: Vec<u32> = repo
        .top_results()
        .expect("read")
        .iter()
        .map(|r| *r.score())
        .collect();
    assert_eq!(scores, vec![15, 14, 13, 12, 11, 10, 9, 8, 7, 6]);
}

#[test]
fn test_ties_keep_insertion_order() {
    let dir = TempDir::new().expect("temp dir");
    let repo = repository(&dir);

    repo.append(&result("first", 5)).expect("append");
    repo.append(&result("second", 5)).expect("append");
    repo.append(&result("top", 9)).expect("append");

    let names: Vec<String> = repo
        .top_results()
        .expect("read")
        .iter()
        .map(|r| r.name().clone())
        .collect();
    assert_eq!(names, vec!["top", "first", "second"]);
}

#[test]
fn test_result_below_full_board_is_not_retained() {
    let dir = TempDir::new().expect("temp dir");
    let repo = repository(&dir);
    for score in 10..20 {
        repo.append(&result("regular", score)).expect("append");
    }

    assert!(repo.append(&result("late", 10)).expect("append").is_none());
    let stored = repo.append(&result("champion", 50)).expect("append");
    assert_eq!(stored.map(|row| row.player_name().clone()).as_deref(), Some("champion"));
    assert_eq!(repo.top().expect("read").len(), 10);
}

#[test]
fn test_reopening_keeps_results() {
    let dir = TempDir::new().expect("temp dir");
    repository(&dir).append(&result("Mika", 4)).expect("append");

    let reopened = repository(&dir);
    assert_eq!(reopened.top_results().expect("read"), vec![result("Mika", 4)]);
}

#[tokio::test]
async fn test_sqlite_store_appends_off_runtime() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("store.db").to_string_lossy().into_owned();
    let store = SqliteResultStore::open(path).expect("open store");

    store.append(&result("Lee", 2)).await.expect("append");
    store.append(&result("Sam", 6)).await.expect("append");

    let top = store.read_top().await.expect("read");
    assert_eq!(top, vec![result("Sam", 6), result("Lee", 2)]);
}
