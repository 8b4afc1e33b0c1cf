use std::path::PathBuf;

use chrono::NaiveDate;

use crate::feedback::Feedback;
use crate::fetch;
use crate::source::{CatalogSource, FetchError};
use crate::transform;
use crate::writer::{OutputLayout, WriteError, write_document};

/// Errors that abort a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("write failed: {0}")]
    Write(#[from] WriteError),
}

/// Summary of one build pass.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub written: u64,
    pub skipped: u64,
    /// Pages written, in write order.
    pub paths: Vec<PathBuf>,
    pub feedback: Vec<Feedback>,
}

impl BuildReport {
    fn record(&mut self, path: PathBuf) {
        self.written += 1;
        self.paths.push(path);
    }

    fn skip(&mut self, message: String) {
        tracing::warn!("{message}");
        self.skipped += 1;
        self.feedback.push(Feedback::warning(message));
    }
}

/// Reports for a full run: categories first, then products.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub categories: BuildReport,
    pub products: BuildReport,
}

/// Write one section page per category.
///
/// The category listing already has the page shape, so records are written
/// as fetched. Fetch and write failures are fatal.
pub async fn build_categories(
    source: &dyn CatalogSource,
    layout: &OutputLayout,
) -> Result<BuildReport, BuildError> {
    let categories = fetch::all_categories(source).await?;
    let mut report = BuildReport::default();

    for category in &categories {
        let Some(path) = layout.category_path(&category.slug) else {
            report.skip(format!(
                "skipping category {:?}: slug is not a valid path component",
                category.slug
            ));
            continue;
        };
        write_document(&path, category)?;
        report.record(path);
    }

    Ok(report)
}

/// Write one page per product.
///
/// Listing failures and write failures are fatal. A detail fetch that fails
/// in transport or with a non-200 status only skips that product.
pub async fn build_products(
    source: &dyn CatalogSource,
    layout: &OutputLayout,
    today: NaiveDate,
) -> Result<BuildReport, BuildError> {
    let summaries = fetch::all_products(source).await?;
    let mut report = BuildReport::default();

    for summary in &summaries {
        let Some(path) = layout.product_path(&summary.slug) else {
            report.skip(format!(
                "skipping product {:?}: slug is not a valid file name",
                summary.slug
            ));
            continue;
        };

        let product = match source.product(&summary.slug).await {
            Ok(product) => product,
            Err(e) if e.is_skippable() => {
                report.skip(format!("could not write product {}: {e}", summary.name));
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        write_document(&path, &transform::into_page(product, today))?;
        report.record(path);
    }

    Ok(report)
}

/// Run the category pass, then the product pass. The two passes share no
/// data; a fatal error in the first means the second never starts.
pub async fn generate(
    source: &dyn CatalogSource,
    layout: &OutputLayout,
    today: NaiveDate,
) -> Result<GenerateReport, BuildError> {
    let categories = build_categories(source, layout).await?;
    let products = build_products(source, layout, today).await?;
    Ok(GenerateReport {
        categories,
        products,
    })
}
