//! Web post extraction: fetches a URL and scrapes title and text.

use regex::Regex;
use url::Url;

use crate::github::PublishError;

use super::PostContent;

/// Cap on the plain-text excerpt used for drafting prompts.
const BODY_EXCERPT_CHARS: usize = 4_000;

fn pattern(expression: &str) -> Result<Regex, PublishError> {
    Regex::new(expression).map_err(|error| PublishError::Configuration {
        message: format!("invalid extraction pattern: {error}"),
    })
}

/// Decodes the handful of HTML entities that commonly appear in titles.
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

fn first_capture(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|captures| captures.get(1))
        .map(|capture| decode_entities(capture.as_str().trim()))
        .filter(|value| !value.is_empty())
}

/// Picks the page title: `og:title` wins, then `<title>`, then the first
/// `<h1>`.
fn scrape_title(html: &str) -> Result<Option<String>, PublishError> {
    let og_title = pattern(
        r#"(?is)<meta[^>]+property\s*=\s*["']og:title["'][^>]+content\s*=\s*["']([^"']+)["']"#,
    )?;
    let title_tag = pattern(r"(?is)<title[^>]*>(.*?)</title>")?;
    let heading = pattern(r"(?is)<h1[^>]*>(.*?)</h1>")?;

    Ok(first_capture(&og_title, html)
        .or_else(|| first_capture(&title_tag, html))
        .or_else(|| first_capture(&heading, html).map(|text| strip_tags_from(&text))))
}

fn strip_tags_from(fragment: &str) -> String {
    fragment
        .split('<')
        .enumerate()
        .map(|(index, part)| {
            if index == 0 {
                part
            } else {
                part.split_once('>').map_or("", |(_, text)| text)
            }
        })
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Reduces an HTML document to a whitespace-collapsed text excerpt.
fn scrape_body(html: &str) -> Result<String, PublishError> {
    let script = pattern(r"(?is)<script[^>]*>.*?</script>")?;
    let style = pattern(r"(?is)<style[^>]*>.*?</style>")?;
    let tags = pattern(r"(?s)<[^>]+>")?;

    let without_script = script.replace_all(html, " ");
    let without_style = style.replace_all(&without_script, " ");
    let text = tags.replace_all(&without_style, " ");

    let collapsed = decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    Ok(collapsed.chars().take(BODY_EXCERPT_CHARS).collect())
}

/// Fetches a URL and extracts post content from its HTML.
///
/// # Errors
///
/// Returns `PublishError::Extraction` for transport failures, non-success
/// statuses, and pages with no discoverable title.
pub async fn extract_from_url(
    http: &reqwest::Client,
    url: &Url,
) -> Result<PostContent, PublishError> {
    let response = http
        .get(url.clone())
        .send()
        .await
        .map_err(|error| PublishError::Extraction {
            origin: url.to_string(),
            message: format!("fetch failed: {error}"),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(PublishError::Extraction {
            origin: url.to_string(),
            message: format!("fetch returned status {status}"),
        });
    }

    let html = response
        .text()
        .await
        .map_err(|error| PublishError::Extraction {
            origin: url.to_string(),
            message: format!("reading response body failed: {error}"),
        })?;

    let title = scrape_title(&html)?.ok_or_else(|| PublishError::Extraction {
        origin: url.to_string(),
        message: "no <title>, og:title, or <h1> found in page".to_owned(),
    })?;

    Ok(PostContent {
        title,
        body: scrape_body(&html)?,
        source: url.to_string(),
    })
}
