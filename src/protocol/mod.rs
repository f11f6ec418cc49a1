//! Protocol Module
//!
//! Defines the line protocol for client-server communication.
//!
//! ## Request Format
//! ```text
//! METHOD:<SUBMIT|GET|REMOVE>,<FIELD>:<value>[,<FIELD>:<value>...]\n
//! ```
//!
//! ### Methods
//! - SUBMIT: TITLE, AUTHOR, LOCATION (in that order)
//! - GET:    AUTHOR | TITLE | TITLE then AUTHOR
//! - REMOVE: TITLE, AUTHOR, LOCATION (in that order)
//!
//! Values may not contain `:` or `,`.
//!
//! ### Status Codes
//! - 201: SUBMITTED
//! - 202: RETRIEVED
//! - 203: REMOVED
//! - 401: DUPLICATE
//! - 402: NOT FOUND
//! - 404: BAD REQUEST

mod codec;
mod request;
mod response;
pub mod tokenizer;

pub use codec::{
    decode_response, encode_request, encode_response, read_request, read_response,
    write_request, write_response, Frame, LINE_TOO_LONG, MISSING_NEWLINE, NOT_UTF8,
};
pub use request::{Method, Request};
pub use response::{Block, Response, ResponseField, Status};
pub use tokenizer::{fields, next_field, Field, Fields};

/// Longest request line accepted, newline included
pub const MAX_LINE_LEN: usize = 250;

/// Longest title, author or location
pub const MAX_FIELD_LEN: usize = 100;

pub const KEY_METHOD: &str = "METHOD";
pub const KEY_TITLE: &str = "TITLE";
pub const KEY_AUTHOR: &str = "AUTHOR";
pub const KEY_LOCATION: &str = "LOCATION";
pub const KEY_MESSAGE: &str = "MESSAGE";
