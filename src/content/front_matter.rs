//! Markdown post parsing via YAML front matter.

use serde::Deserialize;

use crate::github::PublishError;

use super::PostContent;

#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: Option<String>,
}

/// Splits `raw` into its front matter block and the markdown body.
///
/// Returns `None` when the document does not open with a `---` fence.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let after_open = raw
        .strip_prefix("---\r\n")
        .or_else(|| raw.strip_prefix("---\n"))?;

    for fence in ["\r\n---", "\n---"] {
        if let Some(end) = after_open.find(fence) {
            let block = after_open.get(..end)?;
            let rest = after_open.get(end + fence.len()..)?;
            // Skip the remainder of the closing fence line.
            let body = rest
                .split_once('\n')
                .map_or("", |(_, remainder)| remainder);
            return Some((block, body));
        }
    }
    None
}

/// Falls back to the first ATX heading when front matter has no title.
fn first_heading(markdown: &str) -> Option<&str> {
    markdown.lines().find_map(|line| {
        let heading = line.trim_start().strip_prefix("# ")?;
        let trimmed = heading.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}

/// Extracts a post's title and body from a markdown document.
///
/// The title comes from the `title:` key of a YAML front matter block, or
/// failing that from the document's first `#` heading. The body is the
/// markdown after the closing fence.
///
/// # Errors
///
/// Returns `PublishError::Extraction` when the front matter is not valid
/// YAML or when no title can be determined.
pub fn extract_markdown(source: &str, raw: &str) -> Result<PostContent, PublishError> {
    let (front_matter_title, body) = match split_front_matter(raw) {
        Some((block, markdown_body)) => {
            let parsed: FrontMatter =
                serde_yaml::from_str(block).map_err(|error| PublishError::Extraction {
                    origin: source.to_owned(),
                    message: format!("front matter is not valid YAML: {error}"),
                })?;
            (parsed.title, markdown_body)
        }
        None => (None, raw),
    };

    let title = front_matter_title
        .as_deref()
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .or_else(|| first_heading(body))
        .ok_or_else(|| PublishError::Extraction {
            origin: source.to_owned(),
            message: "no title found in front matter or headings".to_owned(),
        })?
        .to_owned();

    Ok(PostContent {
        title,
        body: body.trim().to_owned(),
        source: source.to_owned(),
    })
}
