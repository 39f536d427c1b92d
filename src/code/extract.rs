use regex::Regex;
use std::sync::OnceLock;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"```(?:tsx?|jsx?|javascript)?\s*([\s\S]*?)```").expect("fence regex")
    })
}

/// Pull source code out of raw model output.
///
/// Returns the trimmed interior of the first fenced block when it is
/// non-empty, otherwise the trimmed input. Never fails, never grows the input,
/// and is idempotent.
pub fn extract_code(raw: &str) -> String {
    let trimmed = raw.trim();

    fence_regex()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|inner| inner.as_str().trim())
        .filter(|inner| !inner.is_empty())
        .unwrap_or(trimmed)
        .to_string()
}
