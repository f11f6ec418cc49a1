//! Request definitions
//!
//! Classifies a request line into one of the catalog operations.

use std::fmt;
use std::str::FromStr;

use crate::error::{CatalogError, Result};

use super::tokenizer::{Field, Fields};
use super::{KEY_AUTHOR, KEY_LOCATION, KEY_METHOD, KEY_TITLE, MAX_FIELD_LEN};

/// Value of the leading `METHOD` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Submit,
    Get,
    Remove,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Submit => "SUBMIT",
            Method::Get => "GET",
            Method::Remove => "REMOVE",
        }
    }
}

impl FromStr for Method {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SUBMIT" => Ok(Method::Submit),
            "GET" => Ok(Method::Get),
            "REMOVE" => Ok(Method::Remove),
            other => Err(CatalogError::bad_request(format!(
                "Request Message is an invalid type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Add a book to the catalog
    Submit {
        title: String,
        author: String,
        location: String,
    },

    /// Every book by an author
    GetByAuthor { author: String },

    /// Every book with a title
    GetByTitle { title: String },

    /// Locations of every copy of one title by one author
    GetByTitleAndAuthor { title: String, author: String },

    /// Remove the first copy matching the full triple
    Remove {
        title: String,
        author: String,
        location: String,
    },
}

impl Request {
    /// The method this request is sent with
    pub fn method(&self) -> Method {
        match self {
            Request::Submit { .. } => Method::Submit,
            Request::GetByAuthor { .. }
            | Request::GetByTitle { .. }
            | Request::GetByTitleAndAuthor { .. } => Method::Get,
            Request::Remove { .. } => Method::Remove,
        }
    }

    /// Interpret one request line (without its trailing newline).
    ///
    /// ```text
    /// START --METHOD:SUBMIT--> TITLE, AUTHOR, LOCATION (positional)  --> Submit
    ///       --METHOD:REMOVE--> TITLE, AUTHOR, LOCATION (positional)  --> Remove
    ///       --METHOD:GET-----> AUTHOR                                 --> GetByAuthor
    ///                          TITLE [then AUTHOR]                    --> GetByTitle[AndAuthor]
    /// anything else                                                   --> BadRequest
    /// ```
    pub fn parse(line: &str) -> Result<Request> {
        let mut fields = Fields::new(line);

        let header = fields
            .next()
            .ok_or_else(|| CatalogError::bad_request("Request Message is empty."))?;
        if header.key != KEY_METHOD {
            return Err(CatalogError::bad_request(
                "Request Message is an invalid type.",
            ));
        }

        match header.value.parse::<Method>()? {
            Method::Submit => {
                let (title, author, location) = take_triple(&mut fields)?;
                Ok(Request::Submit {
                    title,
                    author,
                    location,
                })
            }
            Method::Remove => {
                let (title, author, location) = take_triple(&mut fields)?;
                Ok(Request::Remove {
                    title,
                    author,
                    location,
                })
            }
            Method::Get => parse_get(&mut fields),
        }
    }
}

fn parse_get(fields: &mut Fields<'_>) -> Result<Request> {
    let selector = fields.next().ok_or_else(|| {
        CatalogError::bad_request("Request Message is missing a search field.")
    })?;

    match selector.key {
        KEY_AUTHOR => Ok(Request::GetByAuthor {
            author: checked(selector)?,
        }),
        KEY_TITLE => {
            let title = checked(selector)?;
            match fields.next() {
                Some(field) if field.key == KEY_AUTHOR => Ok(Request::GetByTitleAndAuthor {
                    title,
                    author: checked(field)?,
                }),
                _ => Ok(Request::GetByTitle { title }),
            }
        }
        _ => Err(CatalogError::bad_request(
            "Request Message has an invalid field.",
        )),
    }
}

/// TITLE, AUTHOR, LOCATION in that order. Keys are positional and not checked.
fn take_triple(fields: &mut Fields<'_>) -> Result<(String, String, String)> {
    let mut next = |name: &str| -> Result<String> {
        let field = fields.next().ok_or_else(|| {
            CatalogError::bad_request(format!("Request Message is missing the {} field.", name))
        })?;
        checked(field)
    };

    let title = next(KEY_TITLE)?;
    let author = next(KEY_AUTHOR)?;
    let location = next(KEY_LOCATION)?;
    Ok((title, author, location))
}

fn checked(field: Field<'_>) -> Result<String> {
    if field.value.len() > MAX_FIELD_LEN {
        return Err(CatalogError::bad_request(format!(
            "Request Message field {} exceeds {} bytes.",
            field.key, MAX_FIELD_LEN
        )));
    }
    Ok(field.value.to_string())
}
