/// Keyword to label table, checked in order; the first keyword contained in
/// the lower-cased "tag heading" text wins.
pub const LABEL_KEYWORDS: &[(&str, &str)] = &[
    ("hero", "Hero"),
    ("header", "Header"),
    ("nav", "Navigation"),
    ("main", "Main"),
    ("footer", "Footer"),
    ("pricing", "Pricing"),
    ("testimonial", "Testimonials"),
    ("feature", "Features"),
    ("cta", "Call to Action"),
    ("about", "About"),
    ("contact", "Contact"),
    ("blog", "Blog"),
    ("team", "Team"),
    ("faq", "FAQ"),
];

/// Maximum characters of heading text used as a fallback label
pub const MAX_LABEL_CHARS: usize = 40;

/// Characters of heading text that take part in the de-duplication key
pub const DEDUP_HEADING_CHARS: usize = 20;

/// Infer a human-readable label for a candidate element.
///
/// Without a keyword match or heading the label is the lower-case tag name
/// followed by "Section", e.g. `"article Section"`.
pub fn infer_label(tag_name: &str, heading_text: &str) -> String {
    let haystack = format!("{} {}", tag_name, heading_text).to_lowercase();

    if let Some((_, label)) = LABEL_KEYWORDS.iter().find(|(key, _)| haystack.contains(key)) {
        return (*label).to_string();
    }

    let heading = truncate_chars(heading_text.trim(), MAX_LABEL_CHARS);
    if heading.is_empty() {
        format!("{} Section", tag_name.to_ascii_lowercase())
    } else {
        heading
    }
}

/// De-duplication signature: tag name plus the start of the heading
pub fn dedup_key(tag_name: &str, heading_text: &str) -> String {
    format!("{}-{}", tag_name, truncate_chars(heading_text, DEDUP_HEADING_CHARS))
}

/// Take at most `max` characters of `text`
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
