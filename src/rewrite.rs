//! Selective rewriting of parsed HTML documents.
//!
//! Visits text nodes below `<body>` and the document title, applies a
//! [`Substitution`] to each, and writes results back in place. Element
//! structure, tag names, and attribute values (hyperlink targets
//! included) are never inspected or modified, so machine-readable links
//! survive while human-visible text changes.

use crate::substitute::Substitution;
use scraper::node::Node;
use scraper::{Html, Selector};
use std::borrow::Cow;

/// A rewritten document: serialized markup plus the rewritten title.
#[derive(Debug, Clone)]
pub struct RewrittenPage {
    /// The full document, re-serialized after mutation.
    pub content: String,
    /// The substituted `<title>` text.
    pub title: String,
}

/// Rewrites documents with a fixed substitution.
///
/// Stateless across calls; the only field is the compiled word pair.
#[derive(Debug, Clone)]
pub struct Rewriter {
    substitution: Substitution,
}

impl Rewriter {
    pub fn new(substitution: Substitution) -> Self {
        Self { substitution }
    }

    /// Parse `markup`, rewrite body text and title, and re-serialize.
    ///
    /// Malformed markup is recovered by the parser, not rejected here;
    /// formatting fidelity of the output is the serializer's concern.
    pub fn rewrite(&self, markup: &str) -> RewrittenPage {
        let mut document = Html::parse_document(markup);

        self.rewrite_body_text(&mut document);
        let title = self.rewrite_title(&mut document);

        RewrittenPage {
            content: document.html(),
            title,
        }
    }

    /// Replace the content of changed text nodes below `<body>`.
    ///
    /// Text inside `<script>` and `<style>` is skipped: the parser
    /// classifies raw script bodies as text nodes, but they are not
    /// visible text. Nodes are only mutated when the substitution
    /// actually changed them.
    fn rewrite_body_text(&self, document: &mut Html) {
        let body_sel = Selector::parse("body").unwrap();

        let edits: Vec<_> = match document.select(&body_sel).next() {
            Some(body) => body
                .descendants()
                .filter_map(|node| {
                    let text = node.value().as_text()?;
                    let parent_is_raw_text = node
                        .parent()
                        .and_then(|p| p.value().as_element().map(|e| e.name().to_owned()))
                        .is_some_and(|name| matches!(name.as_str(), "script" | "style"));
                    if parent_is_raw_text {
                        return None;
                    }
                    match self.substitution.apply(text) {
                        Cow::Owned(changed) => Some((node.id(), changed)),
                        Cow::Borrowed(_) => None,
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        for (id, changed) in edits {
            if let Some(mut node) = document.tree.get_mut(id) {
                if let Node::Text(text) = node.value() {
                    text.text = changed.as_str().into();
                }
            }
        }
    }

    /// Substitute the title's text children and write them back.
    ///
    /// The write-back is unconditional; the substituted title is also
    /// returned so callers can surface it alongside the markup.
    fn rewrite_title(&self, document: &mut Html) -> String {
        let title_sel = Selector::parse("title").unwrap();

        let mut title = String::new();
        let edits: Vec<_> = match document.select(&title_sel).next() {
            Some(element) => element
                .children()
                .filter_map(|child| {
                    let text = child.value().as_text()?;
                    let substituted = self.substitution.apply(text).into_owned();
                    Some((child.id(), substituted))
                })
                .collect(),
            None => Vec::new(),
        };

        // Write-back replaces text in nodes the traversal found; the
        // tree's node set itself is never altered.
        for (id, substituted) in edits {
            title.push_str(&substituted);
            if let Some(mut node) = document.tree.get_mut(id) {
                if let Node::Text(text) = node.value() {
                    text.text = substituted.as_str().into();
                }
            }
        }

        title
    }
}
