use std::sync::Arc;

use crate::model::{Category, Product, ProductPage};

/// Errors that can occur when fetching from a catalog source.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with something other than 200.
    #[error("{status}\n{body}")]
    Status { status: String, body: String },

    #[error("decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether a failed product detail fetch may be skipped instead of
    /// aborting the run. Transport and status failures can be skipped;
    /// a malformed body cannot.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status { .. })
    }
}

/// A remote catalog of categories and products.
///
/// Implementations issue one request per call and hold no state between
/// calls beyond their connection configuration.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable label identifying this source.
    fn label(&self) -> &str;

    /// Fetch every category in a single request.
    async fn categories(&self) -> Result<Vec<Category>, FetchError>;

    /// Fetch one page of product summaries. Pages are zero-based.
    async fn product_page(&self, page: u64, page_size: u64) -> Result<ProductPage, FetchError>;

    /// Fetch the full product record for a slug.
    async fn product(&self, slug: &str) -> Result<Product, FetchError>;
}

#[async_trait::async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    fn label(&self) -> &str {
        (**self).label()
    }

    async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        (**self).categories().await
    }

    async fn product_page(&self, page: u64, page_size: u64) -> Result<ProductPage, FetchError> {
        (**self).product_page(page, page_size).await
    }

    async fn product(&self, slug: &str) -> Result<Product, FetchError> {
        (**self).product(slug).await
    }
}
