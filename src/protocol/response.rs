//! Response definitions
//!
//! Represents responses to clients.

use std::fmt;
use std::str::FromStr;

use crate::catalog::Book;
use crate::error::CatalogError;

use super::{KEY_AUTHOR, KEY_LOCATION, KEY_MESSAGE, KEY_TITLE};

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Status {
    Submitted = 201,
    Retrieved = 202,
    Removed = 203,
    Duplicate = 401,
    NotFound = 402,
    BadRequest = 404,
}

impl Status {
    pub fn code(&self) -> u16 {
        *self as u16
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Status::Submitted => "SUBMITTED",
            Status::Retrieved => "RETRIEVED",
            Status::Removed => "REMOVED",
            Status::Duplicate => "DUPLICATE",
            Status::NotFound => "NOT FOUND",
            Status::BadRequest => "BAD REQUEST",
        }
    }

    /// True for the 2xx codes
    pub fn is_success(&self) -> bool {
        self.code() < 300
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.code(), self.tag())
    }
}

impl FromStr for Status {
    type Err = CatalogError;

    /// Parse a status line such as `202:RETRIEVED`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.split(':').next().unwrap_or_default().trim();
        match code {
            "201" => Ok(Status::Submitted),
            "202" => Ok(Status::Retrieved),
            "203" => Ok(Status::Removed),
            "401" => Ok(Status::Duplicate),
            "402" => Ok(Status::NotFound),
            "404" => Ok(Status::BadRequest),
            _ => Err(CatalogError::Protocol(format!("Unknown status line: {}", s))),
        }
    }
}

/// An owned `KEY:VALUE` line of a response block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseField {
    pub key: String,
    pub value: String,
}

impl ResponseField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One record (or message) in a response
pub type Block = Vec<ResponseField>;

/// A response to send to client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Zero or more blocks, one per matched record
    pub blocks: Vec<Block>,
}

impl Response {
    pub fn new(status: Status, blocks: Vec<Block>) -> Self {
        Self { status, blocks }
    }

    /// Create a SUBMITTED response echoing the stored book
    pub fn submitted(book: &Book) -> Self {
        Self::new(Status::Submitted, vec![full_block(book)])
    }

    /// Create a REMOVED response echoing the removed book
    pub fn removed(book: &Book) -> Self {
        Self::new(Status::Removed, vec![full_block(book)])
    }

    /// Create a RETRIEVED response listing title, author and location per book
    pub fn retrieved(books: &[Book]) -> Self {
        Self::new(Status::Retrieved, books.iter().map(full_block).collect())
    }

    /// Create a RETRIEVED response listing only the location per book
    pub fn retrieved_locations(books: &[Book]) -> Self {
        let blocks = books
            .iter()
            .map(|book| vec![ResponseField::new(KEY_LOCATION, book.location.as_str())])
            .collect();
        Self::new(Status::Retrieved, blocks)
    }

    /// Create a DUPLICATE response
    pub fn duplicate() -> Self {
        Self::message(
            Status::Duplicate,
            "The Book specified is a duplicate submission and could not be added to the Catalog.",
        )
    }

    /// Create a NOT FOUND response
    pub fn not_found(message: &str) -> Self {
        Self::message(Status::NotFound, message)
    }

    /// Create a BAD REQUEST response
    pub fn bad_request(message: &str) -> Self {
        Self::message(Status::BadRequest, message)
    }

    fn message(status: Status, message: &str) -> Self {
        Self::new(status, vec![vec![ResponseField::new(KEY_MESSAGE, message)]])
    }

    /// Value of the `MESSAGE` field, if the response carries one
    pub fn message_text(&self) -> Option<&str> {
        self.blocks
            .iter()
            .flatten()
            .find(|field| field.key == KEY_MESSAGE)
            .map(|field| field.value.as_str())
    }

    /// Rebuild the books carried by a full-record response.
    /// Blocks missing any of the three fields are skipped.
    pub fn books(&self) -> Vec<Book> {
        self.blocks
            .iter()
            .filter_map(|block| {
                let get = |key: &str| {
                    block
                        .iter()
                        .find(|field| field.key == key)
                        .map(|field| field.value.clone())
                };
                Some(Book::new(get(KEY_TITLE)?, get(KEY_AUTHOR)?, get(KEY_LOCATION)?))
            })
            .collect()
    }

    /// Every `LOCATION` value in block order
    pub fn locations(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .flatten()
            .filter(|field| field.key == KEY_LOCATION)
            .map(|field| field.value.as_str())
            .collect()
    }
}

fn full_block(book: &Book) -> Block {
    vec![
        ResponseField::new(KEY_TITLE, book.title.as_str()),
        ResponseField::new(KEY_AUTHOR, book.author.as_str()),
        ResponseField::new(KEY_LOCATION, book.location.as_str()),
    ]
}
