use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

/// Pages larger than this many characters are refused
pub const MAX_HTML_LENGTH: usize = 1_200_000;

/// Inline `<style>` blocks at or above this many characters are ignored
pub const MAX_STYLE_LENGTH: usize = 100_000;

/// A fetched document plus the assets a generator needs alongside it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapedPage {
    pub html: String,

    /// Absolute stylesheet URLs and inline style blocks
    #[serde(default)]
    pub styles: Vec<String>,

    /// Absolute http(s) image URLs
    #[serde(default)]
    pub images: Vec<String>,

    pub title: String,
}

impl ScrapedPage {
    /// Extract title, styles and images from `html`, resolving relative
    /// references against `base_url`
    pub fn from_html(base_url: &Url, html: impl Into<String>) -> Self {
        let html = html.into();
        let document = Html::parse_document(&html);

        let stylesheet = Selector::parse(r#"link[rel="stylesheet"]"#).expect("stylesheet selector");
        let style = Selector::parse("style").expect("style selector");
        let image = Selector::parse("img[src]").expect("image selector");
        let title = Selector::parse("title").expect("title selector");
        let h1 = Selector::parse("h1").expect("h1 selector");

        let mut styles: Vec<String> = document
            .select(&stylesheet)
            .filter_map(|el| el.value().attr("href"))
            .filter_map(|href| base_url.join(href).ok())
            .map(|url| url.to_string())
            .collect();

        styles.extend(document.select(&style).filter_map(|el| {
            let text = el.inner_html();
            let text = text.trim();
            (!text.is_empty() && text.chars().count() < MAX_STYLE_LENGTH)
                .then(|| format!("/* inline */\n{}", text))
        }));

        let images = document
            .select(&image)
            .filter_map(|el| el.value().attr("src"))
            .filter_map(|src| base_url.join(src).ok())
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .map(|url| url.to_string())
            .collect();

        let text_of = |selector: &Selector| {
            document
                .select(selector)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|t| !t.is_empty())
        };
        let title = text_of(&title)
            .or_else(|| text_of(&h1))
            .unwrap_or_else(|| "Untitled".to_string());

        Self {
            html,
            styles,
            images,
            title,
        }
    }
}
