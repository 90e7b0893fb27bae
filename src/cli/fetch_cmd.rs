//! `faleproxy fetch <url>` — one-shot fetch and rewrite.

use crate::cli::output;
use crate::fetch::HttpClient;
use crate::rewrite::Rewriter;
use crate::substitute::Substitution;
use anyhow::{Context, Result};

/// Fetch a single page, rewrite it, and print the result.
///
/// Prints the rewritten markup to stdout (the title goes to stderr so
/// piped output stays clean), or a JSON envelope under `--json`.
pub async fn run(url: &str, target: &str, replacement: &str, timeout_ms: u64) -> Result<()> {
    let substitution =
        Substitution::new(target, replacement).context("invalid word pair configuration")?;
    let rewriter = Rewriter::new(substitution);
    let client = HttpClient::new(timeout_ms);

    let page = client
        .get(url)
        .await
        .context("Failed to fetch content")?;

    let rewritten = rewriter.rewrite(&page.body);

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "success": true,
            "content": rewritten.content,
            "title": rewritten.title,
            "originalUrl": url,
        }));
    } else {
        if !output::is_quiet() && !rewritten.title.is_empty() {
            eprintln!("  Title: {}", rewritten.title);
        }
        println!("{}", rewritten.content);
    }

    Ok(())
}
