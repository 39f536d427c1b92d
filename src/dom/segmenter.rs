use crate::dom::labels::{MAX_LABEL_CHARS, dedup_key, infer_label, truncate_chars};
use crate::dom::section::Section;
use crate::dom::section_set::{Admission, SectionSet};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Block-level tags treated as section candidates
pub const SECTION_TAGS: &[&str] = &["section", "header", "main", "article", "aside", "footer"];

/// Upper bound on sections per run, whatever the configuration asks for
pub const MAX_SECTIONS: usize = 20;

/// Tuning knobs for segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Maximum number of sections returned, never above [`MAX_SECTIONS`]
    pub max_sections: usize,

    /// Sections whose markup is shorter than this (in characters) are dropped
    pub min_html_len: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_sections: MAX_SECTIONS,
            min_html_len: 100,
        }
    }
}

#[derive(Clone)]
struct Selectors {
    candidates: Selector,
    headings: Selector,
    major_headings: Selector,
    body: Selector,
}

impl Selectors {
    fn new() -> Self {
        Self {
            candidates: Selector::parse(&SECTION_TAGS.join(", ")).expect("candidate selector"),
            headings: Selector::parse("h1, h2, h3, h4, h5, h6").expect("heading selector"),
            major_headings: Selector::parse("h1, h2, h3").expect("major heading selector"),
            body: Selector::parse("body").expect("body selector"),
        }
    }
}

/// Splits an HTML document into ordered, de-duplicated sections.
///
/// Segmentation is tiered: semantic block tags first, then major headings,
/// then a single whole-document section. It never fails.
#[derive(Clone)]
pub struct Segmenter {
    config: SegmenterConfig,
    selectors: Selectors,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(SegmenterConfig::default())
    }
}

impl Segmenter {
    pub fn new(mut config: SegmenterConfig) -> Self {
        config.max_sections = config.max_sections.min(MAX_SECTIONS);
        Self {
            config,
            selectors: Selectors::new(),
        }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment a document. Always returns at least one section.
    pub fn segment(&self, html: &str) -> Vec<Section> {
        let document = Html::parse_document(html);

        let sections = self.semantic_sections(&document);
        if !sections.is_empty() {
            log::debug!("segmented {} semantic sections", sections.len());
            return sections;
        }

        let sections = self.heading_sections(&document);
        if !sections.is_empty() {
            log::debug!("no semantic sections; split into {} heading sections", sections.len());
            return sections;
        }

        log::debug!("no structure found; returning full page section");
        vec![self.full_page(&document, html)]
    }

    fn semantic_sections(&self, document: &Html) -> Vec<Section> {
        let mut set = SectionSet::with_capacity(self.config.max_sections);

        for (index, element) in document.select(&self.selectors.candidates).enumerate() {
            if set.is_full() {
                break;
            }

            let tag_name = element.value().name().to_ascii_lowercase();
            let outer_html = element.html();
            if outer_html.chars().count() < self.config.min_html_len {
                log::debug!("skipping <{}> #{}: below minimum length", tag_name, index);
                continue;
            }

            let heading = element
                .select(&self.selectors.headings)
                .next()
                .map(|h| element_text(&h))
                .unwrap_or_default();

            let label = infer_label(&tag_name, &heading);
            let id = Section::make_id(index, &label);
            let key = dedup_key(&tag_name, &heading);

            if set.offer(key, Section::new(id, label, outer_html)) == Admission::Duplicate {
                log::debug!("skipping <{}> #{}: duplicate signature", tag_name, index);
            }
        }

        set.into_sections()
    }

    fn heading_sections(&self, document: &Html) -> Vec<Section> {
        let mut set = SectionSet::with_capacity(self.config.max_sections);

        for (index, heading) in document.select(&self.selectors.major_headings).enumerate() {
            if set.is_full() {
                break;
            }

            let text = element_text(&heading);
            let label = {
                let truncated = truncate_chars(&text, MAX_LABEL_CHARS);
                if truncated.is_empty() {
                    format!("Section {}", index + 1)
                } else {
                    truncated
                }
            };

            let block_html = heading_block(&heading);
            if block_html.chars().count() < self.config.min_html_len {
                continue;
            }

            let id = Section::make_id(index, &label);
            set.offer(id.clone(), Section::new(id, label, block_html));
        }

        set.into_sections()
    }

    fn full_page(&self, document: &Html, raw: &str) -> Section {
        let body = document
            .select(&self.selectors.body)
            .next()
            .map(|b| b.inner_html().trim().to_string())
            .unwrap_or_default();

        if body.is_empty() {
            Section::full_page(raw)
        } else {
            Section::full_page(body)
        }
    }
}

/// Segment a document with the default configuration
pub fn segment(html: &str) -> Vec<Section> {
    Segmenter::default().segment(html)
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn heading_level(element: &ElementRef<'_>) -> Option<u8> {
    match element.value().name() {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        _ => None,
    }
}

/// Wrap a heading and its following siblings, up to the next sibling heading
/// of equal or higher weight, in a synthetic `<div>`.
fn heading_block(heading: &ElementRef<'_>) -> String {
    let level = heading_level(heading).unwrap_or(1);
    let mut html = String::from("<div>");
    html.push_str(&heading.html());

    for sibling in heading.next_siblings() {
        match sibling.value() {
            Node::Element(_) => {
                let Some(element) = ElementRef::wrap(sibling) else {
                    continue;
                };
                if heading_level(&element).is_some_and(|l| l <= level) {
                    break;
                }
                html.push_str(&element.html());
            }
            Node::Text(text) => html.push_str(&escape_text(text)),
            Node::Comment(comment) => {
                html.push_str("<!--");
                html.push_str(comment);
                html.push_str("-->");
            }
            _ => {}
        }
    }

    html.push_str("</div>");
    html
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
