//! Client
//!
//! Blocking client for the catalog protocol. Field values are validated
//! before anything is written, since the protocol has no escaping and the
//! server's line ceiling is small.

use std::io::{BufReader, BufWriter, Write};
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::{CatalogError, Result};
use crate::protocol::{read_response, write_request, Request, Response, MAX_FIELD_LEN};

/// A connection to a catalog server
pub struct CatalogClient {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl CatalogClient {
    /// Connect to a server
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .map_err(|e| CatalogError::Network(format!("Failed to connect: {}", e)))?;
        stream.set_nodelay(true)?;
        let read_stream = stream.try_clone()?;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Validate, send one request and wait for its response
    pub fn send(&mut self, request: &Request) -> Result<Response> {
        validate_request(request)?;
        write_request(&mut self.writer, request)?;
        read_response(&mut self.reader)
    }

    /// Send raw bytes as-is and read one response. No validation.
    pub fn send_raw(&mut self, bytes: &[u8]) -> Result<Response> {
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        read_response(&mut self.reader)
    }

    pub fn submit(&mut self, title: &str, author: &str, location: &str) -> Result<Response> {
        self.send(&Request::Submit {
            title: title.to_string(),
            author: author.to_string(),
            location: location.to_string(),
        })
    }

    pub fn get_by_author(&mut self, author: &str) -> Result<Response> {
        self.send(&Request::GetByAuthor {
            author: author.to_string(),
        })
    }

    pub fn get_by_title(&mut self, title: &str) -> Result<Response> {
        self.send(&Request::GetByTitle {
            title: title.to_string(),
        })
    }

    pub fn get_by_title_and_author(&mut self, title: &str, author: &str) -> Result<Response> {
        self.send(&Request::GetByTitleAndAuthor {
            title: title.to_string(),
            author: author.to_string(),
        })
    }

    pub fn remove(&mut self, title: &str, author: &str, location: &str) -> Result<Response> {
        self.send(&Request::Remove {
            title: title.to_string(),
            author: author.to_string(),
            location: location.to_string(),
        })
    }
}

/// Check every value a request would put on the wire
pub fn validate_request(request: &Request) -> Result<()> {
    match request {
        Request::Submit {
            title,
            author,
            location,
        }
        | Request::Remove {
            title,
            author,
            location,
        } => {
            validate_field("title", title)?;
            validate_field("author", author)?;
            validate_field("location", location)
        }
        Request::GetByAuthor { author } => validate_field("author", author),
        Request::GetByTitle { title } => validate_field("title", title),
        Request::GetByTitleAndAuthor { title, author } => {
            validate_field("title", title)?;
            validate_field("author", author)
        }
    }
}

/// A value must be non-blank, at most `MAX_FIELD_LEN` bytes, and free of
/// protocol delimiters
pub fn validate_field(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::InvalidField {
            field,
            reason: "must not be blank".to_string(),
        });
    }
    if value.len() > MAX_FIELD_LEN {
        return Err(CatalogError::InvalidField {
            field,
            reason: format!("{} bytes exceeds the {} byte limit", value.len(), MAX_FIELD_LEN),
        });
    }
    if let Some(c) = value.chars().find(|c| matches!(c, ':' | ',' | '\n' | '\r')) {
        return Err(CatalogError::InvalidField {
            field,
            reason: format!("must not contain {:?}", c),
        });
    }
    Ok(())
}
