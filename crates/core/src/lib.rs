pub mod article;
pub mod detect;
pub mod error;
pub mod extract;
pub mod handoff;
pub mod orchestrate;
pub mod page;
pub mod preload;
pub mod render;
pub mod sanitize;
pub mod selectors;

pub use article::{ArticleData, DetectionResult};
pub use detect::{DetectOptions, detect};
pub use error::{ReprintError, Result};
pub use extract::extract;
pub use handoff::Mailbox;
pub use orchestrate::{
    Orchestrator, PageContext, ReprintConfig, ReprintConfigBuilder, SnapshotContext,
};
pub use page::Page;
pub use render::{format_date, print_document, render_article};
pub use sanitize::{SanitizeRules, sanitize, sanitize_with_rules};
