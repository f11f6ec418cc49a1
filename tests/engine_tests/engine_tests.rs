//! Tests for Engine
//!
//! These tests verify:
//! - Request lines map to the right responses
//! - Duplicate rejection and removal completeness
//! - Malformed input never touches the catalog
//! - Concurrent access from many threads

use std::sync::Arc;
use std::thread;

use bookcat::protocol::{Frame, Request, Status, MISSING_NEWLINE};
use bookcat::{Book, Engine};

const SUBMIT_DUNE: &str = "METHOD:SUBMIT,TITLE:Dune,AUTHOR:Herbert,LOCATION:Shelf3";

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_engine_submit_echoes_book() {
    let engine = Engine::new();

    let response = engine.handle_line(SUBMIT_DUNE);

    assert_eq!(response.status, Status::Submitted);
    assert_eq!(response.books(), vec![Book::new("Dune", "Herbert", "Shelf3")]);
    assert_eq!(engine.len(), 1);
}

#[test]
fn test_engine_duplicate_submit() {
    let engine = Engine::new();

    let first = engine.handle_line(SUBMIT_DUNE);
    let second = engine.handle_line(SUBMIT_DUNE);

    assert_eq!(first.status, Status::Submitted);
    assert_eq!(second.status, Status::Duplicate);
    assert!(second.message_text().is_some());
    assert_eq!(engine.snapshot(), vec![Book::new("Dune", "Herbert", "Shelf3")]);
}

#[test]
fn test_engine_round_trip_retrieval() {
    let engine = Engine::new();
    engine.handle_line(SUBMIT_DUNE);
    engine.handle_line("METHOD:SUBMIT,TITLE:Emma,AUTHOR:Austen,LOCATION:Shelf1");

    let located = engine.handle_line("METHOD:GET,TITLE:Dune,AUTHOR:Herbert");
    assert_eq!(located.status, Status::Retrieved);
    assert_eq!(located.locations(), vec!["Shelf3"]);
    // title+author lookups only carry locations
    assert!(located.books().is_empty());

    let by_author = engine.handle_line("METHOD:GET,AUTHOR:Herbert");
    assert_eq!(by_author.books(), vec![Book::new("Dune", "Herbert", "Shelf3")]);

    let by_title = engine.handle_line("METHOD:GET,TITLE:Emma");
    assert_eq!(by_title.books(), vec![Book::new("Emma", "Austen", "Shelf1")]);
}

#[test]
fn test_engine_get_on_empty_catalog() {
    let engine = Engine::new();

    for line in [
        "METHOD:GET,AUTHOR:Herbert",
        "METHOD:GET,TITLE:Dune",
        "METHOD:GET,TITLE:Dune,AUTHOR:Herbert",
    ] {
        let response = engine.handle_line(line);
        assert_eq!(response.status, Status::NotFound, "for {}", line);
        assert!(response.blocks.len() == 1);
    }
}

#[test]
fn test_engine_remove() {
    let engine = Engine::new();
    engine.handle_line(SUBMIT_DUNE);

    let removed = engine.handle_line("METHOD:REMOVE,TITLE:Dune,AUTHOR:Herbert,LOCATION:Shelf3");
    assert_eq!(removed.status, Status::Removed);
    assert_eq!(removed.books(), vec![Book::new("Dune", "Herbert", "Shelf3")]);
    assert!(engine.is_empty());

    let again = engine.handle_line("METHOD:REMOVE,TITLE:Dune,AUTHOR:Herbert,LOCATION:Shelf3");
    assert_eq!(again.status, Status::NotFound);
}

#[test]
fn test_engine_remove_missing_from_non_empty_catalog() {
    let engine = Engine::new();
    engine.handle_line(SUBMIT_DUNE);

    let response = engine.handle_line("METHOD:REMOVE,TITLE:Emma,AUTHOR:Austen,LOCATION:Shelf1");

    assert_eq!(response.status, Status::NotFound);
    assert_eq!(engine.len(), 1);
}

#[test]
fn test_engine_execute_parsed_request() {
    let engine = Engine::new();

    let response = engine.execute(Request::Submit {
        title: "Dune".to_string(),
        author: "Herbert".to_string(),
        location: "Shelf3".to_string(),
    });

    assert_eq!(response.status, Status::Submitted);
}

// =============================================================================
// Malformed Input Tests
// =============================================================================

#[test]
fn test_engine_malformed_lines_are_bad_requests() {
    let engine = Engine::new();

    for line in [
        "METHOD:SUBMIT,TITLE:Dune",
        "METHOD:DELETE,TITLE:Dune",
        "METHOD:GET,LOCATION:Shelf3",
        "GET:AUTHOR:Herbert",
        "",
    ] {
        let response = engine.handle_line(line);
        assert_eq!(response.status, Status::BadRequest, "for {:?}", line);
        assert!(response.message_text().is_some());
    }

    assert!(engine.is_empty());
}

#[test]
fn test_engine_rejected_frame() {
    let engine = Engine::new();

    let response = engine.handle_frame(&Frame::Rejected(MISSING_NEWLINE));

    assert_eq!(response.status, Status::BadRequest);
    assert_eq!(response.message_text(), Some(MISSING_NEWLINE));
}

#[test]
fn test_engine_clear() {
    let engine = Engine::new();
    engine.handle_line(SUBMIT_DUNE);

    engine.clear();

    assert!(engine.is_empty());
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_engine_concurrent_distinct_submits() {
    let engine = Arc::new(Engine::new());
    let threads = 8;
    let per_thread = 50;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for i in 0..per_thread {
                    let line = format!(
                        "METHOD:SUBMIT,TITLE:Book {t}-{i},AUTHOR:Author {t},LOCATION:Shelf {i}"
                    );
                    assert_eq!(engine.handle_line(&line).status, Status::Submitted);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(engine.len(), threads * per_thread);
}

#[test]
fn test_engine_concurrent_same_submit_inserts_once() {
    let engine = Arc::new(Engine::new());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.handle_line(SUBMIT_DUNE).status)
        })
        .collect();

    let statuses: Vec<Status> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(statuses.iter().filter(|s| **s == Status::Submitted).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == Status::Duplicate).count(), 15);
    assert_eq!(engine.len(), 1);
}

#[test]
fn test_engine_concurrent_submit_and_remove() {
    let engine = Arc::new(Engine::new());
    for i in 0..100 {
        engine.handle_line(&format!("METHOD:SUBMIT,TITLE:Keep {i},AUTHOR:A,LOCATION:L"));
    }

    let remover = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for i in (0..100).step_by(2) {
                let line = format!("METHOD:REMOVE,TITLE:Keep {i},AUTHOR:A,LOCATION:L");
                assert_eq!(engine.handle_line(&line).status, Status::Removed);
            }
        })
    };
    let submitter = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for i in 0..50 {
                let line = format!("METHOD:SUBMIT,TITLE:New {i},AUTHOR:B,LOCATION:L");
                assert_eq!(engine.handle_line(&line).status, Status::Submitted);
            }
        })
    };

    remover.join().unwrap();
    submitter.join().unwrap();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.len(), 100);
    let kept: Vec<String> = snapshot
        .iter()
        .filter(|b| b.author == "A")
        .map(|b| b.title.clone())
        .collect();
    let expected: Vec<String> = (1..100).step_by(2).map(|i| format!("Keep {i}")).collect();
    assert_eq!(kept, expected);
}
