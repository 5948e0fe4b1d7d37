//! Detection/extraction orchestration.
//!
//! The orchestrator drives a page context through the detect, extract,
//! store, and render steps, holding the policy decisions: one bounded
//! detection retry for pages that hydrate late, and the body checks
//! that decide between extraction failure and empty content. Context
//! calls are async because the real page lives in another execution
//! context; [`SnapshotContext`] adapts an in-memory [`Page`] to the
//! same interface.

use std::time::Duration;

use crate::article::{ArticleData, DetectionResult};
use crate::detect::{self, DetectOptions};
use crate::error::{ReprintError, Result};
use crate::extract;
use crate::handoff::Mailbox;
use crate::page::Page;
use crate::render;

/// A page the orchestrator can interrogate.
///
/// `Err` means the page could not be reached at all; "reached but not an
/// article" is an `Ok` carrying a negative [`DetectionResult`].
pub trait PageContext {
    fn detect(&self) -> impl Future<Output = Result<DetectionResult>>;
    fn extract(&self) -> impl Future<Output = Result<Option<ArticleData>>>;
}

/// [`PageContext`] over a parsed in-memory page.
pub struct SnapshotContext {
    page: Page,
    options: DetectOptions,
}

impl SnapshotContext {
    pub fn new(page: Page) -> Self {
        Self { page, options: DetectOptions::default() }
    }

    pub fn with_options(page: Page, options: DetectOptions) -> Self {
        Self { page, options }
    }
}

impl PageContext for SnapshotContext {
    async fn detect(&self) -> Result<DetectionResult> {
        Ok(detect::detect(&self.page, &self.options))
    }

    async fn extract(&self) -> Result<Option<ArticleData>> {
        Ok(extract::extract(&self.page))
    }
}

/// Configuration for the orchestrator.
///
/// # Example
///
/// ```rust
/// use reprint_core::ReprintConfig;
///
/// let config = ReprintConfig::builder()
///     .reader_text_threshold(400)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ReprintConfig {
    /// Delay before the single detection retry (default: 500ms).
    pub retry_delay: Duration,

    /// Minimum reader-view text length treated as article content
    /// (default: 200).
    pub reader_text_threshold: usize,
}

impl Default for ReprintConfig {
    fn default() -> Self {
        Self { retry_delay: Duration::from_millis(500), reader_text_threshold: 200 }
    }
}

impl ReprintConfig {
    /// Creates a new builder for ReprintConfig.
    pub fn builder() -> ReprintConfigBuilder {
        ReprintConfigBuilder::new()
    }

    pub fn detect_options(&self) -> DetectOptions {
        DetectOptions { reader_text_threshold: self.reader_text_threshold }
    }
}

/// Builder for ReprintConfig.
pub struct ReprintConfigBuilder {
    config: ReprintConfig,
}

impl ReprintConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ReprintConfig::default() }
    }

    /// Sets the delay before the detection retry.
    pub fn retry_delay(mut self, value: Duration) -> Self {
        self.config.retry_delay = value;
        self
    }

    /// Sets the reader-view text threshold.
    pub fn reader_text_threshold(mut self, value: usize) -> Self {
        self.config.reader_text_threshold = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ReprintConfig {
        self.config
    }
}

impl Default for ReprintConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a [`PageContext`] through detection, extraction, handoff, and
/// rendering.
pub struct Orchestrator {
    config: ReprintConfig,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self { config: ReprintConfig::default() }
    }

    pub fn with_config(config: ReprintConfig) -> Self {
        Self { config }
    }

    /// Detects whether the context is on an article page.
    ///
    /// A negative first answer gets one retry after a fixed delay, since
    /// client-rendered pages may not have hydrated yet. A second negative
    /// answer is final and reported as [`ReprintError::NotAnArticle`].
    /// Transport errors are never retried.
    pub async fn detect_article<C: PageContext>(&self, context: &C) -> Result<DetectionResult> {
        let first = context.detect().await?;
        if first.is_article {
            return Ok(first);
        }

        tokio::time::sleep(self.config.retry_delay).await;

        let second = context.detect().await?;
        if second.is_article { Ok(second) } else { Err(ReprintError::NotAnArticle) }
    }

    /// Extracts the article and stores it for the print page.
    ///
    /// Extraction runs once, with no retry. A page that yields no
    /// candidate body is [`ReprintError::ExtractionFailed`]; a candidate
    /// whose body came back blank (typically paywalled) is
    /// [`ReprintError::EmptyContent`]. Nothing is stored on failure.
    pub async fn save_article<C: PageContext>(
        &self,
        context: &C,
        mailbox: &Mailbox<ArticleData>,
    ) -> Result<ArticleData> {
        let data = context.extract().await?.ok_or(ReprintError::ExtractionFailed)?;

        if !data.has_body() {
            return Err(ReprintError::EmptyContent);
        }

        mailbox.put(data.clone());
        Ok(data)
    }

    /// Renders the stored article as a standalone print document,
    /// consuming the stored copy.
    pub fn render_from_mailbox(&self, mailbox: &Mailbox<ArticleData>) -> Result<String> {
        let data = mailbox.take().ok_or(ReprintError::HandoffMissing)?;
        Ok(render::print_document(&data))
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
