//! # bookcat
//!
//! A multi-client book catalog served over TCP:
//! - Line-oriented text protocol (`KEY:VALUE` pairs separated by `,`)
//! - In-memory catalog, cleared at startup and shutdown
//! - One handler thread per connection, one lock around the catalog
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │               (one thread per client)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  request line (read outside the lock)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Engine                                 │
//! │            (single process-wide Mutex)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Protocol   │          │   Catalog   │
//!   │ (tokenizer) │          │   (arena)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod catalog;
pub mod client;
pub mod engine;
pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use catalog::{Book, Catalog};
pub use client::CatalogClient;
pub use config::Config;
pub use engine::Engine;
pub use error::{CatalogError, Result};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of bookcat
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
