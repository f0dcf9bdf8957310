//! Front-matter extraction
//!
//! Every content file starts with a YAML block delimited by `---` lines.
//! The block is detached from the body and parsed into a plain
//! [`serde_yaml::Value`] here; the kind-specific schema is applied later
//! by the collection. A file without a well-formed block is an error,
//! never treated as body text.

use thiserror::Error;

/// Errors produced while extracting a front-matter block
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("missing front-matter block")]
    Missing,

    #[error("unterminated front-matter block")]
    Unterminated,

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a content file into its raw front-matter and markdown body.
///
/// Returns the parsed key/value structure and the body with the block
/// stripped.
pub fn extract(source: &str) -> Result<(serde_yaml::Value, &str), FrontmatterError> {
    let content = source.trim_start();

    let rest = content.strip_prefix("---").ok_or(FrontmatterError::Missing)?;
    let rest = rest.trim_start_matches(['\r', '\n']);

    let end_pos = rest.find("\n---").ok_or(FrontmatterError::Unterminated)?;
    let yaml_content = &rest[..end_pos];
    let body = rest[end_pos + 4..].trim_start_matches(['\r', '\n']);

    let value: serde_yaml::Value = serde_yaml::from_str(yaml_content)?;
    Ok((value, body))
}
