use crate::model::{Category, ProductSummary};
use crate::source::{CatalogSource, FetchError};

/// Number of product summaries requested per listing page.
pub const PRODUCT_PAGE_SIZE: u64 = 1000;

/// Paging state for the product listing.
///
/// The total page count is unknown until the first response arrives, so
/// it starts at one and is replaced by whatever each response reports.
/// The count is assumed to stay stable for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    total_pages: u64,
    page_size: u64,
}

impl Pagination {
    pub fn new(page_size: u64) -> Self {
        Self {
            page: 0,
            total_pages: 1,
            page_size,
        }
    }

    /// The page to request next, or `None` once every page has been read.
    pub fn next_page(&self) -> Option<u64> {
        (self.page < self.total_pages).then_some(self.page)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Record a completed page and the total the server reported with it.
    /// Negative totals are treated as zero.
    pub fn advance(&mut self, reported_total_pages: i64) {
        let reported = u64::try_from(reported_total_pages).unwrap_or(0);
        if self.page > 0 && reported != self.total_pages {
            tracing::warn!(
                page = self.page,
                previous = self.total_pages,
                reported,
                "product listing page count changed mid-run"
            );
        }
        self.total_pages = reported;
        self.page += 1;
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PRODUCT_PAGE_SIZE)
    }
}

/// Fetch every category. Any failure is returned as-is.
pub async fn all_categories(source: &dyn CatalogSource) -> Result<Vec<Category>, FetchError> {
    let categories = source.categories().await?;
    tracing::debug!(source = source.label(), count = categories.len(), "fetched categories");
    Ok(categories)
}

/// Walk the paginated product listing and collect every summary in fetch
/// order. A failure on any page aborts the whole listing.
pub async fn all_products(source: &dyn CatalogSource) -> Result<Vec<ProductSummary>, FetchError> {
    let mut pagination = Pagination::default();
    let mut products = Vec::new();

    while let Some(page) = pagination.next_page() {
        let response = source.product_page(page, pagination.page_size()).await?;
        tracing::debug!(
            source = source.label(),
            page,
            count = response.products.len(),
            total_pages = response.total_pages,
            "fetched product page"
        );
        products.extend(response.products);
        pagination.advance(response.total_pages);
    }

    tracing::debug!(
        source = source.label(),
        pages = pagination.total_pages(),
        count = products.len(),
        "product listing complete"
    );
    Ok(products)
}
