use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::{CatalogSource, Category, FetchError, Product, ProductPage, ProductSummary};

/// In-memory catalog for testing. Serves products in insertion order and
/// records which listing pages were requested.
pub struct InMemoryCatalog {
    label: String,
    categories: Vec<Category>,
    products: Vec<Product>,
    page_size: Option<u64>,
    fail_categories: bool,
    failing_pages: HashSet<u64>,
    missing_details: HashSet<String>,
    unreachable_details: HashSet<String>,
    reported_totals: HashMap<u64, i64>,
    pages_requested: Mutex<Vec<u64>>,
}

impl InMemoryCatalog {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            categories: Vec::new(),
            products: Vec::new(),
            page_size: None,
            fail_categories: false,
            failing_pages: HashSet::new(),
            missing_details: HashSet::new(),
            unreachable_details: HashSet::new(),
            reported_totals: HashMap::new(),
            pages_requested: Mutex::new(Vec::new()),
        }
    }

    /// Override the page size requested by callers.
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub fn add_product(&mut self, product: Product) {
        self.products.push(product);
    }

    pub fn add_product_named(&mut self, slug: &str, name: &str) {
        self.add_product(Product {
            slug: slug.to_owned(),
            name: name.to_owned(),
            ..Default::default()
        });
    }

    /// Make the category listing answer with a server error.
    pub fn fail_categories(&mut self) {
        self.fail_categories = true;
    }

    /// Make one listing page answer with a server error.
    pub fn fail_page(&mut self, page: u64) {
        self.failing_pages.insert(page);
    }

    /// Make the detail fetch for a slug answer with 404.
    pub fn hide_detail(&mut self, slug: &str) {
        self.missing_details.insert(slug.to_owned());
    }

    /// Make the detail fetch for a slug fail in transport.
    pub fn drop_detail(&mut self, slug: &str) {
        self.unreachable_details.insert(slug.to_owned());
    }

    /// Report `total_pages` on one listing page instead of the real count.
    pub fn report_total_pages(&mut self, page: u64, total_pages: i64) {
        self.reported_totals.insert(page, total_pages);
    }

    pub fn pages_requested(&self) -> Vec<u64> {
        self.pages_requested
            .lock()
            .map(|pages| pages.clone())
            .unwrap_or_default()
    }

    fn server_error() -> FetchError {
        FetchError::Status {
            status: "500 Internal Server Error".into(),
            body: "{}".into(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for InMemoryCatalog {
    fn label(&self) -> &str {
        &self.label
    }

    async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        if self.fail_categories {
            return Err(Self::server_error());
        }
        Ok(self.categories.clone())
    }

    async fn product_page(&self, page: u64, page_size: u64) -> Result<ProductPage, FetchError> {
        if let Ok(mut pages) = self.pages_requested.lock() {
            pages.push(page);
        }
        if self.failing_pages.contains(&page) {
            return Err(Self::server_error());
        }

        let size = self.page_size.unwrap_or(page_size).max(1) as usize;
        let total = self.products.len();
        let products = self
            .products
            .iter()
            .skip(page as usize * size)
            .take(size)
            .map(|p| ProductSummary {
                slug: p.slug.clone(),
                name: p.name.clone(),
            })
            .collect();

        Ok(ProductPage {
            products,
            total_records: total as i64,
            total_pages: self
                .reported_totals
                .get(&page)
                .copied()
                .unwrap_or(total.div_ceil(size) as i64),
        })
    }

    async fn product(&self, slug: &str) -> Result<Product, FetchError> {
        if self.unreachable_details.contains(slug) {
            return Err(FetchError::Network(format!(
                "request for {slug} failed: connection reset"
            )));
        }
        if self.missing_details.contains(slug) {
            return Err(FetchError::Status {
                status: "404 Not Found".into(),
                body: String::new(),
            });
        }
        self.products
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: "404 Not Found".into(),
                body: String::new(),
            })
    }
}
