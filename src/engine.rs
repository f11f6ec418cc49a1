//! Engine Module
//!
//! Owns the catalog and serializes every request against it.
//!
//! ## Responsibilities
//! - Hold the one process-wide lock around the catalog
//! - Interpret a request line and run it while holding that lock
//! - Produce exactly one response per request
//! - Clear the catalog at shutdown

use parking_lot::Mutex;

use crate::catalog::{Book, Catalog, Removal, Submission};
use crate::error::CatalogError;
use crate::protocol::{Frame, Request, Response};

/// The catalog engine shared by every connection
///
/// ## Concurrency Model: one coarse lock
///
/// - Every request (reads included) takes `catalog`'s mutex before it is
///   interpreted and releases it once its response is built
/// - Socket reads and writes happen outside the lock
/// - Requests are linearized in lock-acquisition order
pub struct Engine {
    catalog: Mutex<Catalog>,
}

impl Engine {
    /// Create an engine over an empty catalog
    pub fn new() -> Self {
        Self {
            catalog: Mutex::new(Catalog::new()),
        }
    }

    /// Turn one framed request into its response
    pub fn handle_frame(&self, frame: &Frame) -> Response {
        match frame {
            Frame::Line(line) => self.handle_line(line),
            Frame::Rejected(message) => Response::bad_request(message),
        }
    }

    /// Interpret and execute one request line under the catalog lock
    pub fn handle_line(&self, line: &str) -> Response {
        let mut catalog = self.catalog.lock();
        match Request::parse(line) {
            Ok(request) => Self::apply(&mut catalog, request),
            Err(CatalogError::BadRequest(message)) => Response::bad_request(&message),
            Err(e) => Response::bad_request(&e.to_string()),
        }
    }

    /// Execute an already parsed request
    pub fn execute(&self, request: Request) -> Response {
        let mut catalog = self.catalog.lock();
        Self::apply(&mut catalog, request)
    }

    /// Runs with the lock held
    fn apply(catalog: &mut Catalog, request: Request) -> Response {
        tracing::trace!("Executing {:?}", request);

        match request {
            Request::Submit {
                title,
                author,
                location,
            } => {
                let book = Book::new(title, author, location);
                match catalog.submit(book.clone()) {
                    Submission::Submitted(_) => Response::submitted(&book),
                    Submission::Duplicate => Response::duplicate(),
                }
            }
            Request::GetByAuthor { author } => {
                let books = catalog.find_by_author(&author);
                if books.is_empty() {
                    Response::not_found("There are no Books in the Catalog with the given author.")
                } else {
                    Response::retrieved(&books)
                }
            }
            Request::GetByTitle { title } => {
                let books = catalog.find_by_title(&title);
                if books.is_empty() {
                    Response::not_found("There are no Books in the Catalog with the given title.")
                } else {
                    Response::retrieved(&books)
                }
            }
            Request::GetByTitleAndAuthor { title, author } => {
                let books = catalog.find_by_title_and_author(&title, &author);
                if books.is_empty() {
                    Response::not_found(
                        "There were no Books with the given title and author in the Catalog.",
                    )
                } else {
                    Response::retrieved_locations(&books)
                }
            }
            Request::Remove {
                title,
                author,
                location,
            } => match catalog.remove(&title, &author, &location) {
                Removal::Removed(book) => Response::removed(&book),
                Removal::NotFound if catalog.is_empty() => Response::not_found(
                    "The Book Catalog is empty and thus does not contain the Book specified.",
                ),
                Removal::NotFound => {
                    Response::not_found("The Book specified could not be found in the Catalog.")
                }
            },
        }
    }

    // =========================================================================
    // Direct access (shutdown, tests, diagnostics)
    // =========================================================================

    /// Number of stored books
    pub fn len(&self) -> usize {
        self.catalog.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.lock().is_empty()
    }

    /// Copy of the whole catalog in insertion order
    pub fn snapshot(&self) -> Vec<Book> {
        self.catalog.lock().iter().cloned().collect()
    }

    /// Drop every book
    pub fn clear(&self) {
        let mut catalog = self.catalog.lock();
        let dropped = catalog.len();
        catalog.clear();
        tracing::info!("Catalog cleared ({} books dropped)", dropped);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
