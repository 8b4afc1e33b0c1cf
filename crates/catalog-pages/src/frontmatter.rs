use serde::Serialize;
use serde::de::DeserializeOwned;

/// Line that opens and closes a front matter block.
pub const DELIMITER: &str = "---";

/// Render a document as a front matter block with an empty body.
///
/// Fields appear in declaration order and nested structures are written
/// inline. Nothing follows the closing delimiter, not even a newline.
pub fn render<T: Serialize>(document: &T) -> Result<String, FrontmatterError> {
    let yaml = serde_yaml_ng::to_string(document)
        .map_err(|e| FrontmatterError::Encode(e.to_string()))?;

    let mut out = String::with_capacity(yaml.len() + 2 * DELIMITER.len() + 2);
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(&yaml);
    if !yaml.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(DELIMITER);
    Ok(out)
}

/// Result of parsing a page with optional front matter.
#[derive(Debug, Clone)]
pub struct ParsedDocument<T> {
    pub frontmatter: Option<T>,
    pub body: String,
}

/// Parse a page, decoding its YAML front matter if present.
///
/// Front matter must be delimited by `---` on its own line at the very
/// start of the document.
pub fn parse<T: DeserializeOwned>(content: &str) -> Result<ParsedDocument<T>, FrontmatterError> {
    let trimmed = content.trim_start();

    if !trimmed.starts_with(DELIMITER) {
        return Ok(ParsedDocument {
            frontmatter: None,
            body: content.to_owned(),
        });
    }

    let after_opening = &trimmed[DELIMITER.len()..];
    let Some(end_pos) = after_opening.find("\n---") else {
        return Ok(ParsedDocument {
            frontmatter: None,
            body: content.to_owned(),
        });
    };

    let yaml_str = &after_opening[..end_pos];
    let rest_start = end_pos + 1 + DELIMITER.len();
    let body = after_opening[rest_start..]
        .strip_prefix('\n')
        .unwrap_or(&after_opening[rest_start..]);

    let frontmatter: T = serde_yaml_ng::from_str(yaml_str)
        .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok(ParsedDocument {
        frontmatter: Some(frontmatter),
        body: body.to_owned(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("failed to encode front matter: {0}")]
    Encode(String),
    #[error("invalid YAML in front matter: {0}")]
    InvalidYaml(String),
}
