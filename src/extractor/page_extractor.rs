use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

use crate::domain::models::{Headings, ImageStats, LinkStats, PageSignals};

/// Elements whose text never counts as page content.
const NON_CONTENT_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer",
];

/// Block-level elements whose text forms the readable body.
const BLOCK_TAGS: &[&str] = &[
    "p", "li", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "td", "th",
];

pub struct PageExtractor;

impl PageExtractor {
    /// Collect every structural signal the SEO rubric needs.
    pub fn extract_signals(html: &Html, base_url: &Url) -> PageSignals {
        PageSignals {
            title: Self::extract_title(html),
            meta_description: Self::extract_meta_description(html),
            headings: Self::extract_headings(html),
            images: Self::extract_images(html),
            links: Self::extract_links(html, base_url),
            has_viewport: Self::has_viewport(html),
        }
    }

    pub fn extract_title(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("title").unwrap());
        html.select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn extract_meta_description(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector =
            SELECTOR.get_or_init(|| Selector::parse("meta[name='description']").unwrap());
        html.select(selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn has_viewport(html: &Html) -> bool {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("meta[name='viewport']").unwrap());
        html.select(selector).next().is_some()
    }

    pub fn extract_headings(html: &Html) -> Headings {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("h1, h2, h3").unwrap());

        let mut headings = Headings::default();
        for element in html.select(selector) {
            let text = element.text().collect::<String>().trim().to_string();
            match element.value().name() {
                "h1" => headings.h1.push(text),
                "h2" => headings.h2.push(text),
                "h3" => headings.h3.push(text),
                _ => {}
            }
        }
        headings
    }

    /// An image lacks alt text when the attribute is absent or blank.
    pub fn extract_images(html: &Html) -> ImageStats {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("img").unwrap());

        html.select(selector)
            .fold(ImageStats::default(), |mut stats, img| {
                stats.total += 1;
                let has_alt = img
                    .value()
                    .attr("alt")
                    .map(|a| !a.trim().is_empty())
                    .unwrap_or(false);
                if !has_alt {
                    stats.missing_alt += 1;
                }
                stats
            })
    }

    /// Count http(s) links, split by whether they stay on the page's host.
    pub fn extract_links(html: &Html, base_url: &Url) -> LinkStats {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("a[href]").unwrap());
        let base_host = base_url.host_str();

        let mut stats = LinkStats::default();
        for link in html.select(selector) {
            let Some(href) = link.value().attr("href").map(str::trim) else {
                continue;
            };
            if href.is_empty()
                || href.starts_with('#')
                || href.starts_with("javascript:")
                || href.starts_with("mailto:")
                || href.starts_with("tel:")
            {
                continue;
            }

            let Ok(resolved) = base_url.join(href) else {
                continue;
            };
            if !matches!(resolved.scheme(), "http" | "https") {
                continue;
            }

            if resolved.host_str() == base_host {
                stats.internal += 1;
            } else {
                stats.external += 1;
            }
        }
        stats
    }

    /// Readable body text: block-level elements outside navigation and
    /// scripts, one block per paragraph. Falls back to all visible body
    /// text when the page has no block elements.
    pub fn extract_text(html: &Html) -> String {
        static BLOCKS: OnceLock<Selector> = OnceLock::new();
        let blocks = BLOCKS.get_or_init(|| Selector::parse(&BLOCK_TAGS.join(", ")).unwrap());

        let paragraphs: Vec<String> = html
            .select(blocks)
            .filter(|el| !has_ancestor(el, NON_CONTENT_TAGS) && !has_ancestor(el, BLOCK_TAGS))
            .map(|el| normalize_whitespace(&visible_text(&el)))
            .filter(|text| !text.is_empty())
            .collect();

        if !paragraphs.is_empty() {
            return paragraphs.join("\n\n");
        }

        static BODY: OnceLock<Selector> = OnceLock::new();
        let body = BODY.get_or_init(|| Selector::parse("body").unwrap());
        html.select(body)
            .next()
            .map(|el| normalize_whitespace(&visible_text(&el)))
            .unwrap_or_default()
    }
}

fn has_ancestor(element: &ElementRef, tags: &[&str]) -> bool {
    element
        .ancestors()
        .filter_map(|node| node.value().as_element())
        .any(|el| tags.contains(&el.name()))
}

/// Elements that separate words when text is flattened.
const BREAKING_TAGS: &[&str] = &[
    "p", "li", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "td", "th", "div",
    "section", "article", "main", "aside", "ul", "ol", "dl", "dt", "dd", "table", "tr", "form",
    "figure", "figcaption", "address", "hr", "br",
];

/// Text of `element` with script/style/navigation subtrees skipped.
///
/// Inline markup joins without a separator; only block boundaries and
/// `<br>` become whitespace.
fn visible_text(element: &ElementRef) -> String {
    let mut out = String::new();
    push_visible_text(*element, &mut out);
    out
}

fn push_visible_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if NON_CONTENT_TAGS.contains(&name) {
            continue;
        }
        if BREAKING_TAGS.contains(&name) {
            out.push(' ');
            push_visible_text(child, out);
            out.push(' ');
        } else {
            push_visible_text(child, out);
        }
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
