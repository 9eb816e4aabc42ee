//! Markdown documents on disk.
//!
//! A document is a markdown file, optionally preceded by TOML front matter:
//!
//! ```text
//! +++
//! unique_id = "sku-1"
//! +++
//! A sturdy **stoneware** mug.
//! ```
//!
//! Without front matter (or without a `unique_id` key) the file stem is the id.

use super::{ContentError, ContentSource};
use crate::model::{ContentDocument, RichText};
use async_trait::async_trait;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const DELIMITER: &str = "+++";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FrontMatter {
    unique_id: Option<String>,
}

/// Reads content documents from files under `root`.
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ContentSource for FsContentSource {
    async fn fetch(&self, relative_path: &str) -> Result<ContentDocument, ContentError> {
        let relative = validate_path(relative_path)?;
        let full = self.root.join(relative);
        debug!(path = %full.display(), "Reading content document");

        let text = tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ContentError::Missing(relative_path.to_string()),
                _ => ContentError::Unavailable(e),
            })?;

        parse_document(relative, &text)
    }
}

/// Accepts only plain relative `.md` paths that stay inside the content root.
fn validate_path(relative_path: &str) -> Result<&Path, ContentError> {
    let path = Path::new(relative_path);
    let inside_root = path
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    let is_markdown = path.extension().is_some_and(|ext| ext == "md");

    if relative_path.is_empty() || !inside_root || !is_markdown {
        return Err(ContentError::InvalidPath(relative_path.to_string()));
    }
    Ok(path)
}

fn parse_document(path: &Path, text: &str) -> Result<ContentDocument, ContentError> {
    let malformed = |reason: String| ContentError::Malformed {
        path: path.display().to_string(),
        reason,
    };

    let (front, body) = split_front_matter(text).map_err(|reason| malformed(reason.into()))?;
    let front: FrontMatter = match front {
        Some(raw) => toml::from_str(raw).map_err(|e| malformed(e.to_string()))?,
        None => FrontMatter::default(),
    };

    let unique_id = match front.unique_id {
        Some(id) => id,
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| malformed("no file stem".into()))?,
    };

    Ok(ContentDocument {
        unique_id,
        description: RichText::new(body.trim_start_matches(['\r', '\n'])),
    })
}

/// Splits `+++`-delimited front matter from the body.
fn split_front_matter(text: &str) -> Result<(Option<&str>, &str), &'static str> {
    let first_line_end = text.find('\n').map_or(text.len(), |i| i + 1);
    if text[..first_line_end].trim_end() != DELIMITER {
        return Ok((None, text));
    }

    let rest = &text[first_line_end..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Ok((Some(&rest[..offset]), &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err("unterminated front matter")
}
