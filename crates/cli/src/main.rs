mod echo;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use reprint_core::{Mailbox, Orchestrator, Page, ReprintConfig, ReprintError, SnapshotContext};

use crate::echo::{format_size, print_banner, print_detail, print_info, print_step, print_success};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Turn a saved Substack article page into a print-ready document
#[derive(Parser, Debug)]
#[command(name = "reprint")]
#[command(version)]
#[command(about = "Turn Substack article pages into print-ready documents", long_about = None)]
struct Args {
    /// Local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// URL the snapshot was saved from, used as the canonical fallback
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit the article fragment instead of a full standalone document
    #[arg(long)]
    fragment: bool,

    /// Only report whether the page is a Substack article, as JSON
    #[arg(long)]
    detect_only: bool,

    /// Minimum reader-view text length treated as article content
    #[arg(long, default_value = "200", value_name = "NUM")]
    reader_threshold: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let (html, size) = if args.input == "-" {
        if args.verbose {
            print_step(1, 4, "Reading from stdin");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        let len = buffer.len();
        (buffer, len)
    } else {
        if args.verbose {
            print_step(1, 4, &format!("Reading from file {}", args.input));
        }
        let content =
            fs::read_to_string(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?;
        let len = content.len();
        (content, len)
    };

    if args.verbose {
        print_detail("Size", &format_size(size));
        eprintln!();
        print_step(2, 4, "Parsing HTML document");
    }

    let page = match &args.url {
        Some(url) => Page::parse_with_url(&html, url).context("Invalid --url value")?,
        None => Page::parse(&html),
    };

    if args.verbose {
        if let Some(title) = page.document_title() {
            print_detail("Title", &title);
        }
        if page.preloads().is_some() {
            print_detail("Preloads", "found");
        }
        eprintln!();
        print_step(3, 4, "Detecting article");
    }

    // A file snapshot never hydrates, so the retry delay is pointless here.
    let config = ReprintConfig::builder()
        .retry_delay(Duration::ZERO)
        .reader_text_threshold(args.reader_threshold)
        .build();
    let context = SnapshotContext::with_options(page, config.detect_options());
    let orchestrator = Orchestrator::with_config(config);

    let detection = match orchestrator.detect_article(&context).await {
        Ok(result) => result,
        Err(ReprintError::NotAnArticle) if args.detect_only => {
            let json = serde_json::to_string_pretty(&reprint_core::DetectionResult::not_article())?;
            write_output(args.output.as_deref(), &json)?;
            return Ok(());
        }
        Err(err) => return Err(err).context("Detection failed"),
    };

    if args.verbose {
        if let Some(title) = &detection.title {
            print_detail("Detected", title);
        }
        eprintln!();
    }

    if args.detect_only {
        let json = serde_json::to_string_pretty(&detection)?;
        write_output(args.output.as_deref(), &json)?;
        return Ok(());
    }

    if args.verbose {
        print_step(4, 4, "Extracting and rendering");
    }

    let mailbox = Mailbox::new();
    let data = orchestrator
        .save_article(&context, &mailbox)
        .await
        .context("Extraction failed")?;

    if args.verbose {
        print_detail("Title", &data.title);
        if !data.bylines.is_empty() {
            print_detail("Bylines", &data.bylines.join(", "));
        }
        if !data.publication.is_empty() {
            print_detail("Publication", &data.publication);
        }
        eprintln!();
    }

    let output = if args.fragment {
        mailbox.clear();
        reprint_core::render_article(&data)
    } else {
        orchestrator
            .render_from_mailbox(&mailbox)
            .context("Rendering failed")?
    };

    write_output(args.output.as_deref(), &output)?;
    Ok(())
}

fn write_output(path: Option<&std::path::Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display()));
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
