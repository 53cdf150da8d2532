use reqwest::{Client, ClientBuilder};
use scraper::{Html, Selector};
use std::time::Duration;
use once_cell::sync::Lazy;
use crate::error::Result;

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

// Create a static selector to avoid recompiling it each time
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

const MAX_SENTENCES: usize = 5;
const MAX_CHARS: usize = 1200;

/// Text stored at creation time, before the page has been fetched.
pub fn placeholder(url: &str) -> String {
    format!("Generating summary for {}", url)
}

pub async fn fetch_html(url: &str) -> Result<String> {
    let response = CLIENT.get(url).send().await?;
    let html = response.text().await?;
    Ok(html)
}

pub fn extract_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let body = document.select(&BODY_SELECTOR).next()?;
    let text = body
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Naive extractive summary: the leading sentences of the page text, capped
/// in both sentence count and length.
pub fn condense(text: &str) -> String {
    let mut result = String::new();
    let mut sentences = 0;

    for sentence in text.split_inclusive(['.', '!', '?']) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        if sentences == MAX_SENTENCES || result.len() + sentence.len() + 1 > MAX_CHARS {
            break;
        }
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(sentence);
        sentences += 1;
    }

    if result.is_empty() {
        // No sentence punctuation at all, fall back to a plain cut
        result = text.chars().take(MAX_CHARS).collect::<String>().trim().to_string();
    }

    result
}

/// Fetch the page behind `url` and produce its summary text.
pub async fn generate(url: &str) -> Result<Option<String>> {
    let html = fetch_html(url).await?;
    Ok(extract_text(&html).map(|text| condense(&text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_never_empty() {
        assert!(!placeholder("http://foo.bar").is_empty());
        assert!(placeholder("http://foo.bar").contains("http://foo.bar"));
    }

    #[test]
    fn extract_text_collapses_markup() {
        let html = "<html><body><h1>Title</h1><p>First paragraph.</p>\n<p>Second.</p></body></html>";
        let text = extract_text(html).unwrap();
        assert_eq!(text, "Title First paragraph. Second.");
    }

    #[test]
    fn extract_text_empty_body_is_none() {
        assert!(extract_text("<html><body>   </body></html>").is_none());
    }

    #[test]
    fn condense_caps_sentence_count() {
        let text = "One. Two. Three. Four. Five. Six. Seven.";
        assert_eq!(condense(text), "One. Two. Three. Four. Five.");
    }

    #[test]
    fn condense_caps_length() {
        let text = "word ".repeat(600) + ".";
        let condensed = condense(&text);
        assert!(condensed.len() <= MAX_CHARS);
        assert!(!condensed.is_empty());
    }

    #[test]
    fn condense_handles_text_without_punctuation() {
        let condensed = condense("just a fragment with no terminator");
        assert_eq!(condensed, "just a fragment with no terminator");
    }
}
