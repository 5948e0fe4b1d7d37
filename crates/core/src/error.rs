//! Error types for Reprint operations.
//!
//! This module defines the main error type [`ReprintError`] which represents
//! all possible failures that can occur while detecting, extracting, and
//! rendering an article from a page snapshot.
//!
//! # Example
//!
//! ```rust
//! use reprint_core::{ReprintError, Result};
//!
//! fn check_body(body_html: &str) -> Result<()> {
//!     if body_html.is_empty() {
//!         return Err(ReprintError::EmptyContent);
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for article detection, extraction, and rendering.
///
/// Each variant corresponds to a distinct user-visible failure. Code that
/// runs against the page itself (detection, extraction) never returns these
/// directly; it degrades to negative results, and the orchestrator translates
/// those into the variants below.
#[derive(Error, Debug)]
pub enum ReprintError {
    /// The page context could not be reached at all.
    ///
    /// Corresponds to a privileged or restricted page where script access
    /// is impossible. This is a transport-level failure; the detection and
    /// extraction logic itself never raises.
    #[error("Cannot access this page: {0}")]
    PageInaccessible(String),

    /// Detection exhausted its strategy cascade, including the single
    /// bounded retry, without finding an article.
    #[error("Not a Substack article page")]
    NotAnArticle,

    /// Extraction found no body container through any strategy.
    ///
    /// This is the hard-failure case: neither the preload blob nor any DOM
    /// selector cascade located article content.
    #[error("Failed to extract article content")]
    ExtractionFailed,

    /// A body container was found but its content is empty.
    ///
    /// Distinct from [`ReprintError::ExtractionFailed`]: an empty body is
    /// the signal for paywalled or otherwise inaccessible content.
    #[error("Article content is empty — it may be behind a paywall")]
    EmptyContent,

    /// The rendering surface found nothing in the hand-off mailbox.
    ///
    /// The mailbox is read-once; a second render attempt, or a render
    /// without a preceding save, lands here.
    #[error("No article data found. Please try again from a Substack article")]
    HandoffMissing,

    /// HTML parsing errors, typically an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Invalid URL provided for the page snapshot.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for ReprintError.
///
/// This is a convenience alias for `std::result::Result<T, ReprintError>`.
pub type Result<T> = std::result::Result<T, ReprintError>;
