//! Catalog Module
//!
//! In-memory collection of book records.
//!
//! ## Responsibilities
//! - Append records in arrival order
//! - Reject exact duplicates at submit time
//! - Linear search by title, author, or both
//! - Remove the first record matching a full triple
//!
//! ## Data Structure Choice
//! An arena of slots linked by index handles:
//! - Insertion order is the link order, not the slot order
//! - Freed slots are reused, so handles stay small
//! - No raw pointers; a stale handle can only miss, never alias
//!
//! The catalog itself is not synchronized. The engine wraps it in one lock.

mod store;

pub use store::{BookId, Catalog, Iter};

/// A book record. Fields never change once stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub location: String,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            location: location.into(),
        }
    }

    /// Exact match on all three fields
    pub fn matches(&self, title: &str, author: &str, location: &str) -> bool {
        self.title == title && self.author == author && self.location == location
    }
}

/// Outcome of a submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Submitted(BookId),
    Duplicate,
}

/// Outcome of a remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Removed(Book),
    NotFound,
}
