//! Protocol codec
//!
//! Framing, encoding and decoding for the line protocol.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! METHOD:SUBMIT,TITLE:Dune,AUTHOR:Herbert,LOCATION:Shelf3\n
//! ```
//! At most `MAX_LINE_LEN` bytes including the newline.
//!
//! ### Response
//! ```text
//! 202:RETRIEVED\n        status line
//! TITLE:Dune\n           ┐
//! AUTHOR:Herbert\n       │ block
//! LOCATION:Shelf3\n      ┘
//! \n                     end of block
//! \n                     end of response
//! ```
//! Blocks never contain empty lines, so an empty line where the next block
//! would start terminates the response.

use std::io::{BufRead, Cursor, ErrorKind, Read, Write};

use crate::error::{CatalogError, Result};

use super::{Block, Request, Response, ResponseField, Status};
use super::{KEY_AUTHOR, KEY_LOCATION, KEY_METHOD, KEY_TITLE, MAX_LINE_LEN};

/// What the server pulled off the wire for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A complete line with its terminator removed
    Line(String),

    /// Bytes that cannot be interpreted as a request line; the message goes
    /// back to the client in a `BAD REQUEST` response
    Rejected(&'static str),
}

pub const MISSING_NEWLINE: &str = "Request Message is missing ending newline character.";
pub const LINE_TOO_LONG: &str = "Request Message exceeds the maximum line length.";
pub const NOT_UTF8: &str = "Request Message is not valid UTF-8.";

// =============================================================================
// Request Framing
// =============================================================================

/// Read one request line.
///
/// Returns `Ok(None)` on a clean end of stream. A line that hits
/// `MAX_LINE_LEN` without a newline is rejected and the rest of it is
/// skipped, so the connection stays usable. A trailing `\r` is dropped.
pub fn read_request<R: BufRead>(reader: &mut R) -> Result<Option<Frame>> {
    let mut line = Vec::with_capacity(MAX_LINE_LEN);
    let read = Read::take(&mut *reader, MAX_LINE_LEN as u64).read_until(b'\n', &mut line)?;

    if read == 0 {
        return Ok(None);
    }

    if line.last() != Some(&b'\n') {
        if read < MAX_LINE_LEN {
            // stream ended mid-line
            return Ok(Some(Frame::Rejected(MISSING_NEWLINE)));
        }
        discard_line(reader)?;
        return Ok(Some(Frame::Rejected(LINE_TOO_LONG)));
    }

    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }

    match String::from_utf8(line) {
        Ok(text) => Ok(Some(Frame::Line(text))),
        Err(_) => Ok(Some(Frame::Rejected(NOT_UTF8))),
    }
}

/// Skip input up to and including the next newline without buffering it
fn discard_line<R: BufRead>(reader: &mut R) -> Result<()> {
    loop {
        let (found, used) = {
            let available = reader.fill_buf()?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(i) => (true, i + 1),
                None => (false, available.len()),
            }
        };
        reader.consume(used);
        if found {
            return Ok(());
        }
    }
}

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a request as a newline-terminated line
pub fn encode_request(request: &Request) -> String {
    let method = request.method();
    let body = match request {
        Request::Submit {
            title,
            author,
            location,
        }
        | Request::Remove {
            title,
            author,
            location,
        } => format!(
            "{KEY_TITLE}:{title},{KEY_AUTHOR}:{author},{KEY_LOCATION}:{location}"
        ),
        Request::GetByAuthor { author } => format!("{KEY_AUTHOR}:{author}"),
        Request::GetByTitle { title } => format!("{KEY_TITLE}:{title}"),
        Request::GetByTitleAndAuthor { title, author } => {
            format!("{KEY_TITLE}:{title},{KEY_AUTHOR}:{author}")
        }
    };
    format!("{KEY_METHOD}:{method},{body}\n")
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    writer.write_all(encode_request(request).as_bytes())?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to its wire text
pub fn encode_response(response: &Response) -> String {
    let mut out = format!("{}\n", response.status);
    for block in &response.blocks {
        for field in block {
            out.push_str(&field.key);
            out.push(':');
            out.push_str(&field.value);
            out.push('\n');
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(encode_response(response).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
///
/// Blocks until the terminating empty line arrives.
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Response> {
    let status_line = read_line(reader)?;
    let status: Status = status_line.parse()?;

    let mut blocks = Vec::new();
    loop {
        let line = read_line(reader)?;
        if line.is_empty() {
            break;
        }

        let mut block: Block = vec![parse_field(&line)?];
        loop {
            let line = read_line(reader)?;
            if line.is_empty() {
                break;
            }
            block.push(parse_field(&line)?);
        }
        blocks.push(block);
    }

    Ok(Response { status, blocks })
}

/// Decode a response from its wire text
pub fn decode_response(text: &str) -> Result<Response> {
    read_response(&mut Cursor::new(text.as_bytes()))
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(CatalogError::Io(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            "connection closed mid-response",
        )));
    }
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

fn parse_field(line: &str) -> Result<ResponseField> {
    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| CatalogError::Protocol(format!("Malformed response line: {}", line)))?;
    Ok(ResponseField::new(key, value))
}
