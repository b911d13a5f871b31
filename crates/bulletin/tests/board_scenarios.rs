//! End-to-end board scenarios through the public API.

use bulletin::persist::DEFAULT_KEY;
use bulletin::render::{DateFormatter, Locale, RecordingRenderer, TerminalRenderer};
use bulletin::{
    Board, BoardSettings, ClickOutcome, FixedClock, KeyValueStore, MemoryStore, Post, PostForm,
    PostStore, SqliteStore, SubmitOutcome, View,
};
use chrono::FixedOffset;

fn settings() -> BoardSettings {
    BoardSettings {
        locale: Locale::Ja,
        dates: DateFormatter::with_offset(Locale::Ja, FixedOffset::east_opt(9 * 3600).unwrap()),
        author_max_chars: 30,
    }
}

fn stored_posts(raw: &str) -> Vec<Post> {
    let value: serde_json::Value = serde_json::from_str(raw).unwrap();
    assert_eq!(value["version"], 1);
    serde_json::from_value(value["posts"].clone()).unwrap()
}

#[test]
fn load_submit_delete_scenario() {
    let mut backend = SqliteStore::open_in_memory().unwrap();
    backend
        .set_item(
            DEFAULT_KEY,
            r#"[{"id":"1","author":"A","content":"hi","timestamp":1000}]"#,
        )
        .unwrap();

    let clock = FixedClock::new(1_500);
    let mut board = Board::start(
        PostStore::new(backend, DEFAULT_KEY),
        RecordingRenderer::new(),
        &clock,
        settings(),
    )
    .unwrap();
    assert_eq!(board.posts().len(), 1);

    clock.set(2_000);
    let mut form = PostForm::new("B", "hello");
    let SubmitOutcome::Created(created) = board.submit(&mut form).unwrap() else {
        panic!("expected the post to be created");
    };

    let snapshot: Vec<(String, String, i64)> = board
        .posts()
        .iter()
        .map(|p| (p.author.clone(), p.content.clone(), p.timestamp))
        .collect();
    assert_eq!(
        snapshot,
        vec![
            ("B".to_string(), "hello".to_string(), 2_000),
            ("A".to_string(), "hi".to_string(), 1_000),
        ]
    );
    assert_eq!(board.posts().as_slice()[1].id, "1");

    assert_eq!(
        board.delete("1").unwrap(),
        ClickOutcome::Deleted(Post {
            id: "1".to_string(),
            author: "A".to_string(),
            content: "hi".to_string(),
            timestamp: 1_000,
        })
    );
    assert_eq!(board.posts().as_slice(), &[created.clone()]);

    let raw = board.store().backend().get_item(DEFAULT_KEY).unwrap().unwrap();
    assert_eq!(stored_posts(&raw), vec![created]);
}

#[test]
fn malformed_storage_renders_empty_state() {
    let backend = MemoryStore::with_item(DEFAULT_KEY, "not json");
    let board = Board::start(
        PostStore::new(backend, DEFAULT_KEY),
        RecordingRenderer::new(),
        FixedClock::new(0),
        settings(),
    )
    .unwrap();

    assert!(board.posts().is_empty());
    assert_eq!(
        board.renderer().last(),
        Some(&View::Empty {
            message: Locale::Ja.empty_message().to_string()
        })
    );
}

#[test]
fn blank_submission_never_saves() {
    let board_store = PostStore::new(MemoryStore::new(), DEFAULT_KEY);
    let mut board = Board::start(
        board_store,
        RecordingRenderer::new(),
        FixedClock::new(0),
        settings(),
    )
    .unwrap();

    for content in ["", " ", "\t\n", "　"] {
        let mut form = PostForm::new("someone", content);
        assert!(matches!(
            board.submit(&mut form).unwrap(),
            SubmitOutcome::Rejected { .. }
        ));
    }
    assert!(board.posts().is_empty());
    assert_eq!(board.store().backend().write_count(), 0);
}

#[test]
fn state_survives_reopening_the_store() {
    let db_path = std::env::temp_dir().join(format!(
        "bulletin_scenario_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&db_path);

    let ids: Vec<String> = {
        let clock = FixedClock::new(10);
        let mut board = Board::open(
            PostStore::new(SqliteStore::open(&db_path).unwrap(), DEFAULT_KEY),
            RecordingRenderer::new(),
            &clock,
            settings(),
        );
        for (now, text) in [(10, "first"), (20, "second"), (30, "third")] {
            clock.set(now);
            board.submit(&mut PostForm::new("", text)).unwrap();
        }
        let ids = board.posts().iter().map(|p| p.id.clone()).collect();
        ids
    };

    let board = Board::start(
        PostStore::new(SqliteStore::open(&db_path).unwrap(), DEFAULT_KEY),
        TerminalRenderer::new(Vec::new()),
        FixedClock::new(99),
        settings(),
    )
    .unwrap();
    let reloaded: Vec<String> = board.posts().iter().map(|p| p.id.clone()).collect();
    assert_eq!(reloaded, ids);

    let contents: Vec<&str> = board.posts().iter().map(|p| p.content.as_str()).collect();
    assert_eq!(contents, vec!["third", "second", "first"]);

    drop(board);
    let _ = std::fs::remove_file(&db_path);
    let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
    let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
}

#[test]
fn terminal_output_shows_anonymous_and_empty_state() {
    let mut board = Board::start(
        PostStore::new(MemoryStore::new(), DEFAULT_KEY),
        TerminalRenderer::new(Vec::new()),
        FixedClock::new(1_705_277_100_000),
        settings(),
    )
    .unwrap();
    board.submit(&mut PostForm::new("", "こんにちは")).unwrap();

    let after_post = String::from_utf8(board.renderer().get_ref().clone()).unwrap();
    assert!(after_post.contains("匿名  2024/01/15 09:05"));
    assert!(after_post.contains("    こんにちは"));
    assert!(after_post.contains("[投稿を削除]"));

    let id = board.posts().as_slice()[0].id.clone();
    board.delete(&id).unwrap();

    let output = String::from_utf8(board.renderer().get_ref().clone()).unwrap();
    assert!(output.ends_with(&format!("{}\n", Locale::Ja.empty_message())));
}
