use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::frontmatter::{self, FrontmatterError};

/// File name of a category's section page.
pub const SECTION_INDEX: &str = "_index.md";

/// Errors that can occur while materializing a page.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Encode(#[from] FrontmatterError),
}

/// Where generated pages land under the output directory.
///
/// Layout:
/// - `output/category_base/slug/_index.md`
/// - `output/product_base/slug.md`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub output_dir: PathBuf,
    pub category_base: String,
    pub product_base: String,
}

impl OutputLayout {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        category_base: impl Into<String>,
        product_base: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            category_base: category_base.into(),
            product_base: product_base.into(),
        }
    }

    /// Section page for a category, or `None` if the slug cannot be used
    /// as a single path component.
    pub fn category_path(&self, slug: &str) -> Option<PathBuf> {
        is_path_safe(slug).then(|| {
            self.output_dir
                .join(&self.category_base)
                .join(slug)
                .join(SECTION_INDEX)
        })
    }

    /// Flat page for a product, or `None` if the slug cannot be used as a
    /// file stem.
    pub fn product_path(&self, slug: &str) -> Option<PathBuf> {
        is_path_safe(slug).then(|| {
            self.output_dir
                .join(&self.product_base)
                .join(format!("{slug}.md"))
        })
    }
}

/// Write a document as a front matter page. Creates parent directories as
/// needed and replaces any existing file at `path` entirely.
///
/// The replacement is not atomic: a crash mid-write can leave a partial
/// file behind.
pub fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), WriteError> {
    let text = frontmatter::render(document)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| WriteError::Io {
            path: parent.to_owned(),
            source,
        })?;
    }
    std::fs::write(path, text).map_err(|source| WriteError::Io {
        path: path.to_owned(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "wrote page");
    Ok(())
}

fn is_path_safe(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use crate::model::Category;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("catalog-pages-writer-{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn layout() -> OutputLayout {
        OutputLayout::new("/site/content", "category", "product")
    }

    #[test]
    fn category_path_is_section_index() {
        assert_eq!(
            layout().category_path("shoes"),
            Some(PathBuf::from("/site/content/category/shoes/_index.md"))
        );
    }

    #[test]
    fn product_path_is_flat() {
        assert_eq!(
            layout().product_path("red-widget"),
            Some(PathBuf::from("/site/content/product/red-widget.md"))
        );
    }

    #[test]
    fn unsafe_slugs_have_no_path() {
        let layout = layout();
        for slug in ["", ".", "..", "a/b", "a\\b"] {
            assert_eq!(layout.category_path(slug), None, "slug {slug:?}");
            assert_eq!(layout.product_path(slug), None, "slug {slug:?}");
        }
    }

    #[test]
    fn write_document_creates_dirs_and_writes() {
        let dir = scratch_dir("create");
        let path = dir.join("category/shoes/_index.md");
        let category = Category {
            slug: "shoes".into(),
            name: "Shoes".into(),
            ..Default::default()
        };

        write_document(&path, &category).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("---\n"));
        assert!(text.ends_with("\n---"));
        assert!(text.contains("name: Shoes"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_document_tolerates_existing_dirs() {
        let dir = scratch_dir("existing");
        std::fs::create_dir_all(dir.join("product")).unwrap();

        let result = write_document(&dir.join("product/a.md"), &Category::default());
        assert!(result.is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_document_replaces_longer_content() {
        let dir = scratch_dir("replace");
        let path = dir.join("_index.md");
        std::fs::create_dir_all(&dir).unwrap();
        let stale = format!("---\n{}stale_key: left over\n---", "padding: x\n".repeat(50));
        std::fs::write(&path, &stale).unwrap();

        let category = Category {
            slug: "short".into(),
            ..Default::default()
        };
        write_document(&path, &category).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, frontmatter::render(&category).unwrap());
        assert!(!text.contains("stale_key"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_document_reports_io_errors() {
        let dir = scratch_dir("blocked");
        std::fs::create_dir_all(&dir).unwrap();
        // A file where a directory is expected.
        std::fs::write(dir.join("product"), "not a dir").unwrap();

        let result = write_document(&dir.join("product/a.md"), &Category::default());
        assert!(matches!(result, Err(WriteError::Io { .. })));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
