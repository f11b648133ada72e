use homescan_core::error::AppError;
use homescan_core::traits::TextExtractor;
use scraper::{Html, Node};

/// Elements whose text content never reaches the reader.
///
/// html5ever parses with scripting enabled, so `noscript` content arrives as
/// one raw-markup text node.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Plain-text extractor built on `scraper` (html5ever).
///
/// Keeps every visible text node, trimmed, one per line. Markup, comments,
/// scripts and styles are dropped. html5ever recovers from malformed input,
/// so broken markup still yields whatever text it contains. Parsing runs on
/// tokio's blocking pool.
#[derive(Clone, Default)]
pub struct HtmlTextExtractor;

impl HtmlTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for HtmlTextExtractor {
    async fn extract_text(&self, html: String) -> Result<String, AppError> {
        let html_len = html.len();
        tokio::task::spawn_blocking(move || visible_text(&html))
            .await
            .map_err(|e| {
                tracing::error!(
                    html_len,
                    error = %e,
                    "Parsing failed for the provided HTML content"
                );
                AppError::ParseFailed(format!("HTML parser task failed: {e}"))
            })
    }
}

fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let segments: Vec<&str> = document
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
                });
                (!hidden).then(|| text.trim())
            }
            _ => None,
        })
        .filter(|segment| !segment.is_empty())
        .collect();

    segments.join("\n")
}
