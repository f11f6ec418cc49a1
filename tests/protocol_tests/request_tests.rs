//! Request Interpreter Tests
//!
//! Tests verify:
//! - Classification of every request variant
//! - Rejection of malformed requests
//! - Field length enforcement

use bookcat::protocol::{Method, Request, MAX_FIELD_LEN};
use bookcat::CatalogError;

fn bad_request_message(line: &str) -> String {
    match Request::parse(line) {
        Err(CatalogError::BadRequest(message)) => message,
        other => panic!("Expected BadRequest for {:?}, got {:?}", line, other),
    }
}

// =============================================================================
// Valid Requests
// =============================================================================

#[test]
fn test_parse_submit() {
    let request = Request::parse("METHOD:SUBMIT,TITLE:Dune,AUTHOR:Herbert,LOCATION:Shelf3").unwrap();

    assert_eq!(
        request,
        Request::Submit {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            location: "Shelf3".to_string(),
        }
    );
    assert_eq!(request.method(), Method::Submit);
}

#[test]
fn test_parse_remove() {
    let request = Request::parse("METHOD:REMOVE,TITLE:Dune,AUTHOR:Herbert,LOCATION:Shelf3").unwrap();

    assert_eq!(
        request,
        Request::Remove {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            location: "Shelf3".to_string(),
        }
    );
}

#[test]
fn test_parse_submit_keys_are_positional() {
    let request = Request::parse("METHOD:SUBMIT,A:Dune,B:Herbert,C:Shelf3").unwrap();

    assert_eq!(
        request,
        Request::Submit {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            location: "Shelf3".to_string(),
        }
    );
}

#[test]
fn test_parse_get_by_author() {
    let request = Request::parse("METHOD:GET,AUTHOR:Herbert").unwrap();

    assert_eq!(
        request,
        Request::GetByAuthor {
            author: "Herbert".to_string()
        }
    );
    assert_eq!(request.method(), Method::Get);
}

#[test]
fn test_parse_get_by_title() {
    let request = Request::parse("METHOD:GET,TITLE:Dune").unwrap();

    assert_eq!(
        request,
        Request::GetByTitle {
            title: "Dune".to_string()
        }
    );
}

#[test]
fn test_parse_get_by_title_and_author() {
    let request = Request::parse("METHOD:GET,TITLE:Dune,AUTHOR:Herbert").unwrap();

    assert_eq!(
        request,
        Request::GetByTitleAndAuthor {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
        }
    );
}

#[test]
fn test_parse_get_title_with_unrelated_second_field() {
    let request = Request::parse("METHOD:GET,TITLE:Dune,LOCATION:Shelf3").unwrap();

    assert_eq!(
        request,
        Request::GetByTitle {
            title: "Dune".to_string()
        }
    );
}

#[test]
fn test_parse_field_at_length_limit() {
    let title = "t".repeat(MAX_FIELD_LEN);
    let line = format!("METHOD:GET,TITLE:{}", title);

    assert_eq!(Request::parse(&line).unwrap(), Request::GetByTitle { title });
}

// =============================================================================
// Malformed Requests
// =============================================================================

#[test]
fn test_parse_empty_line() {
    bad_request_message("");
}

#[test]
fn test_parse_missing_method_key() {
    let message = bad_request_message("TITLE:Dune,AUTHOR:Herbert");
    assert!(message.contains("invalid type"));
}

#[test]
fn test_parse_unknown_method() {
    let message = bad_request_message("METHOD:UPDATE,TITLE:Dune");
    assert!(message.contains("invalid type"));
}

#[test]
fn test_parse_method_is_case_sensitive() {
    bad_request_message("METHOD:get,AUTHOR:Herbert");
}

#[test]
fn test_parse_get_with_invalid_field() {
    let message = bad_request_message("METHOD:GET,LOCATION:Shelf3");
    assert!(message.contains("invalid field"));
}

#[test]
fn test_parse_get_without_selector() {
    bad_request_message("METHOD:GET");
}

#[test]
fn test_parse_submit_missing_fields() {
    let message = bad_request_message("METHOD:SUBMIT,TITLE:Dune");
    assert!(message.contains("AUTHOR"));
}

#[test]
fn test_parse_remove_missing_location() {
    let message = bad_request_message("METHOD:REMOVE,TITLE:Dune,AUTHOR:Herbert");
    assert!(message.contains("LOCATION"));
}

#[test]
fn test_parse_shorthand_get_is_rejected() {
    // "GET:AUTHOR:x" has no METHOD field
    bad_request_message("GET:AUTHOR:Herbert");
}

#[test]
fn test_parse_rejects_oversized_field() {
    let line = format!(
        "METHOD:SUBMIT,TITLE:{},AUTHOR:Herbert,LOCATION:Shelf3",
        "t".repeat(MAX_FIELD_LEN + 1)
    );

    let message = bad_request_message(&line);
    assert!(message.contains("exceeds"));
}
